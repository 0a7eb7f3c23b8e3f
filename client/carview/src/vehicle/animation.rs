//! Per-frame wheel animation.
//!
//! Each frame the held steering keys advance the rig state, every captured
//! wheel is solved from its rest orientation, and the result replaces the
//! wheel node's local rotation.

use bevy::prelude::*;
use carview_rig::{
    Axis, AxisConfig, FrameStep, RigState, SteeringController, WheelRig, WheelRole, compute_all,
    tick,
};
use leafwing_input_manager::prelude::*;

use crate::input::{HeldSteerKeys, ViewerAction};

// ============================================================================
// Resources
// ============================================================================

/// Operator-adjustable rig settings. Changes apply on the next tick.
#[derive(Resource, Debug, Clone)]
pub struct RigSettings {
    /// Steering/roll axes and manual overrides.
    pub axes: AxisConfig,
    /// Steering limits and rates.
    pub controller: SteeringController,
    /// Scale rates by elapsed time instead of applying them once per frame.
    pub time_scaled: bool,
    /// Draw each wheel's steering and roll axes.
    pub show_axes: bool,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            axes: AxisConfig::default(),
            controller: SteeringController::default(),
            time_scaled: true,
            show_axes: false,
        }
    }
}

impl RigSettings {
    /// How much time the next tick covers.
    pub fn frame_step(&self, dt: f32) -> FrameStep {
        if self.time_scaled {
            FrameStep::Elapsed(dt)
        } else {
            FrameStep::PerFrame
        }
    }
}

/// Scalar rig state carried between frames.
#[derive(Resource, Debug, Default)]
pub struct RigRuntime {
    /// Steering angle and roll accumulator.
    pub state: RigState,
    /// Ticks applied since the vehicle was loaded.
    pub ticks: u64,
}

/// Captured wheels and the scene nodes they drive.
#[derive(Resource, Default)]
pub struct VehicleRig {
    /// Rest orientations, one slot per role.
    pub rig: WheelRig,
    /// Scene node for each role.
    nodes: [Option<Entity>; 4],
}

impl VehicleRig {
    /// Scene node for a role, if captured.
    pub fn node(&self, role: WheelRole) -> Option<Entity> {
        self.nodes[role.index()]
    }

    /// Record the scene node driven by a role.
    pub(super) fn set_node(&mut self, role: WheelRole, entity: Entity) {
        self.nodes[role.index()] = Some(entity);
    }

    /// Scene nodes of all captured wheels.
    pub fn nodes(&self) -> impl Iterator<Item = (WheelRole, Entity)> + '_ {
        WheelRole::ALL
            .into_iter()
            .filter_map(|role| self.node(role).map(|entity| (role, entity)))
    }
}

/// Whether the animation loop is running.
///
/// Once stopped, the tick system does not run again until restarted.
#[derive(Resource, Debug, Default)]
pub struct AnimationControl {
    running: bool,
}

impl AnimationControl {
    /// Whether ticks are being applied.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume ticking.
    pub fn start(&mut self) {
        if !self.running {
            tracing::info!("Wheel animation started");
        }
        self.running = true;
    }

    /// Stop ticking. No further ticks run until [`Self::start`].
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!("Wheel animation stopped");
        }
        self.running = false;
    }

    /// Flip between running and stopped.
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }
}

// ============================================================================
// Run conditions
// ============================================================================

/// Run condition: the animation loop is running and has wheels to drive.
pub(super) fn animation_running(control: Res<AnimationControl>, rig: Res<VehicleRig>) -> bool {
    control.is_running() && !rig.rig.is_empty()
}

/// Run condition: wheel axis gizmos are enabled.
pub(super) fn show_axes_enabled(settings: Res<RigSettings>) -> bool {
    settings.show_axes
}

// ============================================================================
// Systems
// ============================================================================

/// Advance the rig and write each wheel's orientation to its node.
pub(super) fn tick_wheel_rig(
    time: Res<Time>,
    held: Res<HeldSteerKeys>,
    settings: Res<RigSettings>,
    vehicle: Res<VehicleRig>,
    mut runtime: ResMut<RigRuntime>,
    mut transforms: Query<&mut Transform>,
) {
    let step = settings.frame_step(time.delta_secs());
    runtime.state = tick(
        runtime.state,
        &held.0,
        &settings.axes,
        &settings.controller,
        step,
    );
    runtime.ticks += 1;

    let solved = compute_all(
        vehicle.rig.iter(),
        runtime.state.steering_angle,
        &settings.axes,
        runtime.state.roll_angle(),
    );
    for wheel in solved {
        let Some(entity) = vehicle.node(wheel.role) else {
            continue;
        };
        // The node may already be gone if the vehicle is being torn down.
        if let Ok(mut transform) = transforms.get_mut(entity) {
            transform.rotation = wheel.orientation;
        }
    }
}

/// Start or stop the animation with Space.
pub(super) fn toggle_animation(
    action_query: Query<&ActionState<ViewerAction>>,
    mut control: ResMut<AnimationControl>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };
    if action_state.just_pressed(&ViewerAction::ToggleAnimation) {
        control.toggle();
    }
}

/// Length of the axis arrows drawn on each wheel (meters).
const AXIS_GIZMO_LENGTH: f32 = 0.6;

fn axis_color(axis: Axis, alpha: f32) -> Color {
    match axis {
        Axis::X => Color::srgba(0.9, 0.2, 0.2, alpha),
        Axis::Y => Color::srgba(0.2, 0.9, 0.2, alpha),
        Axis::Z => Color::srgba(0.2, 0.4, 0.9, alpha),
    }
}

/// World-space steering and roll directions for a wheel.
///
/// `global` and `local` must describe the same frame; the parent's rotation is
/// recovered as `global * local.inverse()`. The steering direction (front wheels only,
/// given their rest orientation) is taken from the rest pose, so it does not
/// move as the wheel steers or rolls.
fn wheel_axis_directions(
    global: Quat,
    local: Quat,
    front_rest: Option<Quat>,
    axes: &AxisConfig,
) -> (Option<Vec3>, Vec3) {
    let parent = global * local.inverse();
    let steer = front_rest.map(|rest| parent * rest * axes.steering_axis.unit());
    let roll = global * axes.roll_axis.unit();
    (steer, roll)
}

/// Draw each wheel's local steering and roll axes.
///
/// Runs after transform propagation so the global and local rotations agree.
pub(super) fn draw_wheel_axes(
    mut gizmos: Gizmos,
    settings: Res<RigSettings>,
    vehicle: Res<VehicleRig>,
    nodes: Query<(&GlobalTransform, &Transform)>,
) {
    for (role, entity) in vehicle.nodes() {
        let Ok((global, local)) = nodes.get(entity) else {
            continue;
        };
        let (_, rotation, origin) = global.to_scale_rotation_translation();
        let front_rest = vehicle
            .rig
            .get(role)
            .filter(|_| role.is_front())
            .map(|rest| rest.rest_orientation);

        let (steer_dir, roll_dir) =
            wheel_axis_directions(rotation, local.rotation, front_rest, &settings.axes);
        if let Some(steer_dir) = steer_dir {
            gizmos.arrow(
                origin,
                origin + steer_dir * AXIS_GIZMO_LENGTH,
                axis_color(settings.axes.steering_axis, 1.0),
            );
        }
        gizmos.arrow(
            origin,
            origin + roll_dir * AXIS_GIZMO_LENGTH,
            axis_color(settings.axes.roll_axis, 0.6),
        );
    }
}
