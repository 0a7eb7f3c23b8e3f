//! The per-frame tick.
//!
//! All state that survives between frames is the two scalars in [`RigState`].
//! The host owns it, passes it in, and stores what comes back.

use crate::{
    axis::AxisConfig, input::SteerInput, roll::RollState, steering::SteeringController,
};

/// Display rate the per-frame constants were calibrated against.
pub const REFERENCE_HZ: f32 = 60.0;

/// How much simulated time a tick covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Exactly one reference frame, regardless of wall-clock time.
    PerFrame,
    /// Elapsed seconds, converted to reference frames at [`REFERENCE_HZ`].
    Elapsed(f32),
}

impl FrameStep {
    /// Number of reference frames this step covers.
    pub fn frames(self) -> f32 {
        match self {
            FrameStep::PerFrame => 1.0,
            FrameStep::Elapsed(dt) => dt.max(0.0) * REFERENCE_HZ,
        }
    }
}

/// Scalar state carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigState {
    /// Current steering angle (radians), within the controller's lock.
    pub steering_angle: f32,
    /// Accumulated wheel roll.
    pub roll: RollState,
}

impl RigState {
    /// Current roll angle (radians).
    pub fn roll_angle(&self) -> f32 {
        self.roll.accumulated
    }
}

/// Advance the rig state by one tick.
///
/// Steering is updated from the held keys, then the roll accumulator advances
/// by the configured roll speed.
#[must_use]
pub fn tick(
    state: RigState,
    input: &SteerInput,
    config: &AxisConfig,
    controller: &SteeringController,
    step: FrameStep,
) -> RigState {
    match step {
        FrameStep::PerFrame => RigState {
            steering_angle: controller.update(input, state.steering_angle),
            roll: state.roll.advance(config.manual_roll_speed),
        },
        FrameStep::Elapsed(_) => {
            let frames = step.frames();
            RigState {
                steering_angle: controller.update_scaled(input, state.steering_angle, frames),
                roll: state.roll.advance_scaled(config.manual_roll_speed, frames),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::SteerKey,
        solver::compute_all,
        steering::MAX_STEER_ANGLE,
        wheel::{WheelRig, WheelRole},
    };

    fn run(state: RigState, input: &SteerInput, config: &AxisConfig, frames: usize) -> RigState {
        let controller = SteeringController::default();
        (0..frames).fold(state, |state, _| {
            tick(state, input, config, &controller, FrameStep::PerFrame)
        })
    }

    #[test]
    fn test_steer_then_release_scenario() {
        let config = AxisConfig::default();
        let mut input = SteerInput::default();

        input.press(SteerKey::Left);
        let state = run(RigState::default(), &input, &config, 10);
        assert!((state.steering_angle - 0.5).abs() < 1e-5);
        assert!(state.steering_angle < MAX_STEER_ANGLE);

        input.release(SteerKey::Left);
        let state = run(state, &input, &config, 5);
        assert!((state.steering_angle - 0.295).abs() < 1e-3);
        assert!((state.roll_angle() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_roll_accumulates_linearly() {
        let config = AxisConfig {
            manual_roll_speed: 0.05,
            ..AxisConfig::default()
        };
        let state = run(RigState::default(), &SteerInput::default(), &config, 20);
        assert!((state.roll_angle() - 1.0).abs() < 1e-5);
        assert_eq!(state.steering_angle, 0.0);
    }

    #[test]
    fn test_roll_speed_change_takes_effect_next_tick() {
        let controller = SteeringController::default();
        let input = SteerInput::default();
        let mut config = AxisConfig {
            manual_roll_speed: 0.1,
            ..AxisConfig::default()
        };
        let state = tick(RigState::default(), &input, &config, &controller, FrameStep::PerFrame);
        config.manual_roll_speed = 0.4;
        let state = tick(state, &input, &config, &controller, FrameStep::PerFrame);
        assert!((state.roll_angle() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_step_at_reference_rate() {
        let config = AxisConfig::default();
        let controller = SteeringController::default();
        let input = SteerInput::new(true, false);

        // Two half-length frames cover the same ground as one reference frame.
        let half = FrameStep::Elapsed(0.5 / REFERENCE_HZ);
        let state = tick(RigState::default(), &input, &config, &controller, half);
        let state = tick(state, &input, &config, &controller, half);

        let whole = tick(
            RigState::default(),
            &input,
            &config,
            &controller,
            FrameStep::PerFrame,
        );
        assert!((state.steering_angle - whole.steering_angle).abs() < 1e-6);
        assert!((state.roll_angle() - whole.roll_angle()).abs() < 1e-6);
    }

    #[test]
    fn test_frame_step_frames() {
        assert_eq!(FrameStep::PerFrame.frames(), 1.0);
        assert!((FrameStep::Elapsed(1.0).frames() - REFERENCE_HZ).abs() < 1e-6);
        assert_eq!(FrameStep::Elapsed(-0.2).frames(), 0.0);
    }

    #[test]
    fn test_orientations_do_not_drift() {
        // Solving after a long run equals solving directly from the final scalars.
        let mut rig = WheelRig::new();
        for role in WheelRole::ALL {
            rig.capture(role, role.node_name(), glam::Quat::from_rotation_z(0.3))
                .unwrap();
        }
        let config = AxisConfig::default();
        let mut input = SteerInput::default();
        input.press(SteerKey::Right);
        let state = run(RigState::default(), &input, &config, 5_000);

        let solved = compute_all(rig.iter(), state.steering_angle, &config, state.roll_angle());
        let fresh = RigState {
            steering_angle: state.steering_angle,
            roll: RollState::new(state.roll_angle()),
        };
        let again = compute_all(rig.iter(), fresh.steering_angle, &config, fresh.roll_angle());
        assert_eq!(solved, again);
        for wheel in &solved {
            assert!(wheel.orientation.is_normalized());
        }
        assert_eq!(state.steering_angle, -MAX_STEER_ANGLE);
    }
}
