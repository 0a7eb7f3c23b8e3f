//! Per-frame wheel orientation.
//!
//! Every orientation is rebuilt from the wheel's rest orientation and the two
//! scalar accumulators (steering angle, roll angle). Nothing is composed onto
//! the previous frame's result, so there is no drift to correct.
//!
//! Composition order, all in the wheel's local frame:
//!
//! ```text
//! front: rest * steer(effective, steering_axis) * roll(roll, roll_axis)
//! rear:  rest * roll(roll, roll_axis)
//! ```

use glam::Quat;

use crate::{
    axis::AxisConfig,
    wheel::{WheelRestState, WheelRole},
};

/// Final orientation for one wheel this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedWheel<'a> {
    /// Identifier of the wheel's scene node.
    pub wheel_id: &'a str,
    /// Position of the wheel on the vehicle.
    pub role: WheelRole,
    /// Orientation that replaces the node's rotation.
    pub orientation: Quat,
}

/// Steering angle actually applied to a wheel.
///
/// Rear wheels never steer. The front-right wheel is mirrored, so it receives
/// the negated command.
pub fn effective_steer(role: WheelRole, steering_angle: f32, config: &AxisConfig) -> f32 {
    if !role.is_front() {
        return 0.0;
    }
    let steer = steering_angle + config.manual_steering_offset;
    if role.is_mirrored() { -steer } else { steer }
}

/// Orientation of a wheel before roll is applied.
pub fn steered_orientation(
    wheel: &WheelRestState,
    steering_angle: f32,
    config: &AxisConfig,
) -> Quat {
    if !wheel.role.is_front() {
        return wheel.rest_orientation;
    }
    let steer = Quat::from_axis_angle(
        config.steering_axis.unit(),
        effective_steer(wheel.role, steering_angle, config),
    );
    wheel.rest_orientation * steer
}

/// Final orientation of a single wheel.
pub fn solve_wheel(
    wheel: &WheelRestState,
    steering_angle: f32,
    config: &AxisConfig,
    roll_angle: f32,
) -> Quat {
    let roll = Quat::from_axis_angle(config.roll_axis.unit(), roll_angle);
    steered_orientation(wheel, steering_angle, config) * roll
}

/// Solve every wheel independently.
pub fn compute_all<'a>(
    wheels: impl IntoIterator<Item = &'a WheelRestState>,
    steering_angle: f32,
    config: &AxisConfig,
    roll_angle: f32,
) -> Vec<SolvedWheel<'a>> {
    wheels
        .into_iter()
        .map(|wheel| SolvedWheel {
            wheel_id: &wheel.wheel_id,
            role: wheel.role,
            orientation: solve_wheel(wheel, steering_angle, config, roll_angle),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use glam::Vec3;
    use proptest::prelude::*;

    use super::*;
    use crate::{axis::Axis, wheel::WheelRig};

    fn wheel(role: WheelRole, rest: Quat) -> WheelRestState {
        WheelRestState {
            wheel_id: role.node_name().to_string(),
            rest_orientation: rest,
            role,
        }
    }

    fn full_rig() -> WheelRig {
        // Right-side wheels authored flipped half a turn about Y.
        let mut rig = WheelRig::new();
        for role in WheelRole::ALL {
            let rest = match role {
                WheelRole::FrontRight | WheelRole::RearRight => Quat::from_rotation_y(PI),
                _ => Quat::IDENTITY,
            };
            rig.capture(role, role.node_name(), rest).unwrap();
        }
        rig
    }

    #[test]
    fn test_front_right_mirrored_pre_roll() {
        let config = AxisConfig {
            steering_axis: Axis::Y,
            manual_steering_offset: 0.0,
            ..AxisConfig::default()
        };
        let fr = wheel(WheelRole::FrontRight, Quat::IDENTITY);

        let pre_roll = steered_orientation(&fr, 0.3, &config);
        assert!(pre_roll.abs_diff_eq(Quat::from_rotation_y(-0.3), 1e-6));

        // With zero roll the final orientation is the pre-roll one.
        let solved = solve_wheel(&fr, 0.3, &config, 0.0);
        assert!(solved.abs_diff_eq(Quat::from_rotation_y(-0.3), 1e-6));
    }

    #[test]
    fn test_mirroring_negates_effective_steer() {
        let config = AxisConfig {
            manual_steering_offset: 0.07,
            ..AxisConfig::default()
        };
        for angle in [-0.7, -0.1, 0.0, 0.25, 0.785] {
            let left = effective_steer(WheelRole::FrontLeft, angle, &config);
            let right = effective_steer(WheelRole::FrontRight, angle, &config);
            assert_eq!(right, -left);
            assert_eq!(left, angle + 0.07);
        }
    }

    #[test]
    fn test_rear_wheels_ignore_steering() {
        let config = AxisConfig {
            manual_steering_offset: 0.2,
            ..AxisConfig::default()
        };
        for role in [WheelRole::RearLeft, WheelRole::RearRight] {
            let w = wheel(role, Quat::from_rotation_x(0.4));
            assert_eq!(effective_steer(role, 0.5, &config), 0.0);
            let a = solve_wheel(&w, 0.0, &config, 1.3);
            let b = solve_wheel(&w, 0.6, &config, 1.3);
            let c = solve_wheel(&w, -0.6, &config, 1.3);
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }

    #[test]
    fn test_solve_is_stateless() {
        let rig = full_rig();
        let config = AxisConfig::default();
        let first = compute_all(rig.iter(), 0.33, &config, 12.5);
        let second = compute_all(rig.iter(), 0.33, &config, 12.5);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_compute_all_preserves_ids_and_roles() {
        let rig = full_rig();
        let solved = compute_all(rig.iter(), 0.1, &AxisConfig::default(), 0.0);
        for (solved, role) in solved.iter().zip(WheelRole::ALL) {
            assert_eq!(solved.role, role);
            assert_eq!(solved.wheel_id, role.node_name());
        }
    }

    #[test]
    fn test_compute_all_skips_missing_wheels() {
        let mut rig = WheelRig::new();
        rig.capture(WheelRole::RearLeft, "wheel_rear_left", Quat::IDENTITY)
            .unwrap();
        let solved = compute_all(rig.iter(), 0.1, &AxisConfig::default(), 0.5);
        assert_eq!(solved.len(), 1);
        assert_eq!(solved[0].role, WheelRole::RearLeft);
    }

    #[test]
    fn test_steering_applied_in_local_frame() {
        // Rest pose tipped a quarter turn about Z: the wheel's local Y now
        // points along world -X.
        let rest = Quat::from_rotation_z(FRAC_PI_2);
        let fl = wheel(WheelRole::FrontLeft, rest);
        let config = AxisConfig {
            steering_axis: Axis::Y,
            ..AxisConfig::default()
        };

        let steered = steered_orientation(&fl, 0.4, &config);
        assert!(steered.abs_diff_eq(rest * Quat::from_rotation_y(0.4), 1e-6));
        assert!(!steered.abs_diff_eq(Quat::from_rotation_y(0.4) * rest, 1e-3));

        // The local steering axis is unchanged by steering about it.
        let axis_before = rest * Vec3::Y;
        let axis_after = steered * Vec3::Y;
        assert!(axis_before.abs_diff_eq(axis_after, 1e-6));
    }

    #[test]
    fn test_roll_about_current_local_axis() {
        let fl = wheel(WheelRole::FrontLeft, Quat::from_rotation_x(0.2));
        let config = AxisConfig {
            steering_axis: Axis::Y,
            roll_axis: Axis::X,
            ..AxisConfig::default()
        };

        let pre_roll = steered_orientation(&fl, 0.5, &config);
        for roll in [0.0, 0.7, 3.0, 40.0] {
            let solved = solve_wheel(&fl, 0.5, &config, roll);
            // Roll spins about the already-steered local X axis, leaving it fixed.
            let spin_axis = pre_roll * Vec3::X;
            assert!((solved * Vec3::X).abs_diff_eq(spin_axis, 1e-5));
        }
    }

    #[test]
    fn test_axis_selection_changes_rotation_axis() {
        let fl = wheel(WheelRole::FrontLeft, Quat::IDENTITY);
        for axis in Axis::ALL {
            let config = AxisConfig {
                steering_axis: axis,
                roll_axis: axis,
                ..AxisConfig::default()
            };
            let solved = solve_wheel(&fl, 0.3, &config, 0.2);
            let expected = Quat::from_axis_angle(axis.unit(), 0.5);
            assert!(solved.abs_diff_eq(expected, 1e-6), "axis {axis}");
        }
    }

    proptest! {
        #[test]
        fn prop_front_wheels_mirror(
            angle in -1.0_f32..1.0,
            offset in -0.5_f32..0.5,
            roll in -100.0_f32..100.0,
        ) {
            let config = AxisConfig {
                manual_steering_offset: offset,
                ..AxisConfig::default()
            };
            let fl = wheel(WheelRole::FrontLeft, Quat::IDENTITY);
            let fr = wheel(WheelRole::FrontRight, Quat::IDENTITY);

            // With identical rest poses the mirrored wheel gets the inverse steer.
            let left = steered_orientation(&fl, angle, &config);
            let right = steered_orientation(&fr, angle, &config);
            prop_assert!(right.abs_diff_eq(left.inverse(), 1e-5));

            let solved = solve_wheel(&fr, angle, &config, roll);
            prop_assert!(solved.is_normalized());
        }
    }
}
