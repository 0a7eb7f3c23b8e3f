//! Continuous wheel spin accumulator.

/// Accumulated wheel roll angle in radians.
///
/// Unbounded: it is never clamped or wrapped, so the spin stays continuous.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollState {
    /// Total roll so far (radians).
    pub accumulated: f32,
}

impl RollState {
    /// Roll state starting at the given angle.
    pub fn new(accumulated: f32) -> Self {
        Self { accumulated }
    }

    /// Advance by one frame's roll step.
    #[must_use]
    pub fn advance(self, speed: f32) -> Self {
        Self {
            accumulated: self.accumulated + speed,
        }
    }

    /// Advance by `frames` reference frames at `speed` radians per frame.
    #[must_use]
    pub fn advance_scaled(self, speed: f32, frames: f32) -> Self {
        self.advance(speed * frames.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_accumulation() {
        let roll = (0..20).fold(RollState::default(), |roll, _| roll.advance(0.05));
        assert!((roll.accumulated - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_each_step_adds_speed() {
        let mut roll = RollState::new(3.0);
        for _ in 0..10 {
            let next = roll.advance(0.25);
            assert_eq!(next.accumulated, roll.accumulated + 0.25);
            roll = next;
        }
    }

    #[test]
    fn test_never_wraps() {
        let roll = (0..1000).fold(RollState::default(), |roll, _| roll.advance(0.1));
        assert!(roll.accumulated > std::f32::consts::TAU * 15.0);
    }

    #[test]
    fn test_scaled_advance() {
        let roll = RollState::default().advance_scaled(0.05, 2.0);
        assert!((roll.accumulated - 0.1).abs() < 1e-7);
        assert_eq!(RollState::new(1.0).advance_scaled(0.05, -1.0).accumulated, 1.0);
    }
}
