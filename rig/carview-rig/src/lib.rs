//! Steering and wheel orientation model for a vehicle viewer.
//!
//! This crate has no renderer dependency. The host supplies wheel rest
//! orientations once, calls [`tick`] every frame with the held keys, and
//! applies what [`compute_all`] returns to its scene nodes.
//!
//! # Example
//!
//! ```
//! use carview_rig::{
//!     AxisConfig, FrameStep, RigState, SteerInput, SteerKey, SteeringController, WheelRig,
//!     WheelRole, compute_all, tick,
//! };
//! use glam::Quat;
//!
//! let mut rig = WheelRig::new();
//! for role in WheelRole::ALL {
//!     rig.capture(role, role.node_name(), Quat::IDENTITY).unwrap();
//! }
//!
//! let controller = SteeringController::default();
//! let config = AxisConfig::default();
//! let mut input = SteerInput::default();
//! input.press(SteerKey::Left);
//!
//! let state = tick(RigState::default(), &input, &config, &controller, FrameStep::PerFrame);
//! let wheels = compute_all(rig.iter(), state.steering_angle, &config, state.roll_angle());
//! assert_eq!(wheels.len(), 4);
//! ```

mod axis;
mod error;
mod frame;
mod input;
mod roll;
mod solver;
mod steering;
mod wheel;

pub use axis::{Axis, AxisConfig, DEFAULT_ROLL_SPEED};
pub use error::{Result, RigError};
pub use frame::{FrameStep, REFERENCE_HZ, RigState, tick};
pub use input::{SteerDirection, SteerInput, SteerKey};
pub use roll::RollState;
pub use solver::{SolvedWheel, compute_all, effective_steer, solve_wheel, steered_orientation};
pub use steering::{
    MAX_STEER_ANGLE, STEER_DECAY, STEER_SNAP_THRESHOLD, STEER_STEP, SteeringController,
};
pub use wheel::{WheelRestState, WheelRig, WheelRole};
