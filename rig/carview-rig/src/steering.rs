//! Keyboard steering with clamping and decay.
//!
//! The constants are calibrated per frame at [`crate::REFERENCE_HZ`].
//! [`SteeringController::update`] applies exactly one frame;
//! [`SteeringController::update_scaled`] applies a fractional number of
//! reference frames so the visual rate does not depend on the display.

use std::f32::consts::FRAC_PI_4;

use crate::input::{SteerDirection, SteerInput};

/// Maximum steering lock in radians.
pub const MAX_STEER_ANGLE: f32 = FRAC_PI_4;
/// Steering change per frame while a key is held (radians).
pub const STEER_STEP: f32 = 0.05;
/// Multiplier applied each frame with no net input.
pub const STEER_DECAY: f32 = 0.9;
/// Below this magnitude the angle snaps to zero.
pub const STEER_SNAP_THRESHOLD: f32 = 0.01;

/// Steering controller parameters.
///
/// Holds no per-frame state: the current angle is passed in and returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringController {
    /// Maximum absolute steering angle (radians).
    pub max_angle: f32,
    /// Angle change per reference frame while steering (radians).
    pub angular_step: f32,
    /// Decay multiplier per reference frame with no net input.
    pub decay_factor: f32,
    /// Magnitude at or below which a decaying angle snaps to zero.
    pub snap_threshold: f32,
}

impl Default for SteeringController {
    fn default() -> Self {
        Self {
            max_angle: MAX_STEER_ANGLE,
            angular_step: STEER_STEP,
            decay_factor: STEER_DECAY,
            snap_threshold: STEER_SNAP_THRESHOLD,
        }
    }
}

impl SteeringController {
    /// Advance the steering angle by one frame.
    pub fn update(&self, input: &SteerInput, previous: f32) -> f32 {
        match input.direction() {
            SteerDirection::Left => (previous + self.angular_step).min(self.max_angle),
            SteerDirection::Right => (previous - self.angular_step).max(-self.max_angle),
            SteerDirection::None => self.decay(previous, self.decay_factor),
        }
    }

    /// Advance the steering angle by `frames` reference frames.
    ///
    /// `frames` is typically `dt * REFERENCE_HZ`. With `frames == 1.0` this
    /// returns exactly what [`Self::update`] returns.
    pub fn update_scaled(&self, input: &SteerInput, previous: f32, frames: f32) -> f32 {
        let frames = frames.max(0.0);
        match input.direction() {
            SteerDirection::Left => {
                (previous + self.angular_step * frames).min(self.max_angle)
            }
            SteerDirection::Right => {
                (previous - self.angular_step * frames).max(-self.max_angle)
            }
            SteerDirection::None => self.decay(previous, self.decay_factor.powf(frames)),
        }
    }

    fn decay(&self, previous: f32, factor: f32) -> f32 {
        if previous.abs() > self.snap_threshold {
            previous * factor
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::input::SteerKey;

    fn run(controller: &SteeringController, input: SteerInput, start: f32, frames: usize) -> f32 {
        (0..frames).fold(start, |angle, _| controller.update(&input, angle))
    }

    #[test]
    fn test_hold_left_then_release() {
        let controller = SteeringController::default();
        let angle = run(&controller, SteerInput::new(true, false), 0.0, 10);
        assert!((angle - 0.5).abs() < 1e-5, "angle after 10 frames: {angle}");

        let angle = run(&controller, SteerInput::default(), angle, 5);
        let expected = 0.5 * 0.9_f32.powi(5);
        assert!((angle - expected).abs() < 1e-5, "angle after decay: {angle}");
        assert!((angle - 0.295).abs() < 1e-3);
    }

    #[test]
    fn test_clamps_at_max_angle() {
        let controller = SteeringController::default();
        let left = run(&controller, SteerInput::new(true, false), 0.0, 100);
        assert_eq!(left, MAX_STEER_ANGLE);

        let right = run(&controller, SteerInput::new(false, true), 0.0, 100);
        assert_eq!(right, -MAX_STEER_ANGLE);
    }

    #[test]
    fn test_both_keys_decays() {
        let controller = SteeringController::default();
        let angle = controller.update(&SteerInput::new(true, true), 0.4);
        assert!((angle - 0.36).abs() < 1e-6);
    }

    #[test]
    fn test_decay_snaps_to_exact_zero() {
        let controller = SteeringController::default();
        let angle = run(&controller, SteerInput::default(), MAX_STEER_ANGLE, 200);
        assert_eq!(angle, 0.0);
        assert!(angle.is_sign_positive());

        // At or below the threshold the next frame is exactly zero.
        assert_eq!(controller.update(&SteerInput::default(), 0.01), 0.0);
        assert_eq!(controller.update(&SteerInput::default(), -0.009), 0.0);
        // Just above the threshold it still decays.
        let above = controller.update(&SteerInput::default(), 0.011);
        assert!(above > 0.0 && above < 0.011);
    }

    #[test]
    fn test_decay_is_monotonic() {
        let controller = SteeringController::default();
        let mut angle = -MAX_STEER_ANGLE;
        loop {
            let next = controller.update(&SteerInput::default(), angle);
            assert!(next.abs() <= angle.abs());
            assert!(next <= 0.0, "decay must not overshoot zero");
            if next == 0.0 {
                break;
            }
            angle = next;
        }
    }

    #[test]
    fn test_scaled_matches_unscaled_at_one_frame() {
        let controller = SteeringController::default();
        for input in [
            SteerInput::new(true, false),
            SteerInput::new(false, true),
            SteerInput::default(),
        ] {
            for previous in [-0.7, -0.2, 0.0, 0.005, 0.3, MAX_STEER_ANGLE] {
                assert_eq!(
                    controller.update_scaled(&input, previous, 1.0),
                    controller.update(&input, previous),
                );
            }
        }
    }

    #[test]
    fn test_scaled_two_half_frames_match_one_frame() {
        let controller = SteeringController::default();
        let mut input = SteerInput::default();
        input.press(SteerKey::Left);

        let whole = controller.update_scaled(&input, 0.1, 1.0);
        let half = controller.update_scaled(&input, 0.1, 0.5);
        let halves = controller.update_scaled(&input, half, 0.5);
        assert!((whole - halves).abs() < 1e-6);

        input.release(SteerKey::Left);
        let whole = controller.update_scaled(&input, 0.5, 1.0);
        let half = controller.update_scaled(&input, 0.5, 0.5);
        let halves = controller.update_scaled(&input, half, 0.5);
        assert!((whole - halves).abs() < 1e-6);
    }

    #[test]
    fn test_scaled_zero_frames_holds_angle() {
        let controller = SteeringController::default();
        let input = SteerInput::new(true, false);
        assert_eq!(controller.update_scaled(&input, 0.2, 0.0), 0.2);
        assert_eq!(controller.update_scaled(&input, 0.2, -3.0), 0.2);
    }

    proptest! {
        #[test]
        fn prop_angle_stays_within_lock(
            keys in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..400),
        ) {
            let controller = SteeringController::default();
            let mut angle = 0.0_f32;
            for (left, right) in keys {
                angle = controller.update(&SteerInput::new(left, right), angle);
                prop_assert!(angle.abs() <= MAX_STEER_ANGLE);
            }
        }

        #[test]
        fn prop_scaled_angle_stays_within_lock(
            steps in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), 0.0_f32..8.0),
                0..200,
            ),
        ) {
            let controller = SteeringController::default();
            let mut angle = 0.0_f32;
            for (left, right, frames) in steps {
                angle = controller.update_scaled(&SteerInput::new(left, right), angle, frames);
                prop_assert!(angle.abs() <= MAX_STEER_ANGLE);
            }
        }
    }
}
