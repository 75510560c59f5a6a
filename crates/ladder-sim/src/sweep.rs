//! Scripted position sweep.

/// Sinusoidal position sequence:
/// `position_k = amplitude * sin(2π * cycles * k / frames)` for `k in 0..frames`.
#[derive(Debug, Clone)]
pub struct PositionSweep {
    amplitude: f64,
    cycles: f64,
    frames: usize,
    next: usize,
}

impl PositionSweep {
    pub fn new(amplitude: f64, cycles: f64, frames: usize) -> Self {
        Self {
            amplitude,
            cycles,
            frames,
            next: 0,
        }
    }

    pub fn position_at(&self, k: usize) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        let phase = std::f64::consts::TAU * self.cycles * k as f64 / self.frames as f64;
        self.amplitude * phase.sin()
    }
}

impl Iterator for PositionSweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.frames {
            return None;
        }
        let position = self.position_at(self.next);
        self.next += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frames - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PositionSweep {}
