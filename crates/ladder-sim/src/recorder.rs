//! JSON-lines frame output.
//!
//! One line per position update, in sweep order, so a renderer can play
//! the ladder back frame by frame.

use std::io::Write;

use ladder_pricer::LadderSnapshot;
use serde::Serialize;

use crate::error::AppResult;

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: usize,
    generation: u64,
    #[serde(flatten)]
    snapshot: &'a LadderSnapshot,
}

/// Writes ladder frames as JSON lines.
pub struct FrameRecorder<W: Write> {
    writer: W,
    frames_written: usize,
}

impl<W: Write> FrameRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    /// Append one frame.
    pub fn record(&mut self, generation: u64, snapshot: &LadderSnapshot) -> AppResult<()> {
        let record = FrameRecord {
            frame: self.frames_written,
            generation,
            snapshot,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn flush(&mut self) -> AppResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
