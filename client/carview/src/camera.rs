//! Orbit camera for inspecting the vehicle.
//!
//! Left-drag orbits around the focus point, right-drag pans the focus point,
//! and the scroll wheel zooms. The camera can be re-framed on the vehicle's
//! wheels once they are known.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::input::ViewerAction;

// ============================================================================
// Constants
// ============================================================================

/// Closest the camera may get to its focus point (meters).
pub const MIN_RADIUS: f32 = 0.5;
/// Farthest the camera may get from its focus point (meters).
pub const MAX_RADIUS: f32 = 200.0;
/// Pitch is kept this far short of straight up/down to avoid flipping.
const PITCH_MARGIN: f32 = 0.05;
/// Radius used when framing, as a multiple of the wheel spread.
const FRAMING_MARGIN: f32 = 2.5;

// ============================================================================
// Orbit state
// ============================================================================

/// Spherical camera placement around a focus point.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub focus: Vec3,
    /// Rotation about world Y (radians). Zero looks down -Z.
    pub yaw: f32,
    /// Elevation above the horizontal plane (radians).
    pub pitch: f32,
    /// Distance from the focus point (meters).
    pub radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::new(0.0, 0.5, 0.0),
            yaw: 0.6,
            pitch: 0.35,
            radius: 8.0,
        }
    }
}

impl OrbitCamera {
    /// Rotate around the focus point.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let max_pitch = FRAC_PI_2 - PITCH_MARGIN;
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-max_pitch, max_pitch);
    }

    /// Move the focus point in the camera's view plane.
    ///
    /// `delta` is in screen units; the distance moved scales with the radius
    /// so panning feels the same at every zoom level.
    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        let rotation = self.transform().rotation;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let scale = self.radius * sensitivity;
        self.focus += (-right * delta.x + up * delta.y) * scale;
    }

    /// Zoom in (positive steps) or out (negative steps).
    pub fn zoom(&mut self, steps: f32) {
        self.radius = (self.radius * 0.9_f32.powf(steps)).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.focus + offset * self.radius
    }

    /// Camera transform looking at the focus point.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.focus, Vec3::Y)
    }

    /// Centre on a set of points and back off far enough to see all of them.
    ///
    /// Returns false (and leaves the camera untouched) if there are no points.
    pub fn frame_points(&mut self, points: &[Vec3]) -> bool {
        let Some((center, spread)) = framing_for(points) else {
            return false;
        };
        self.focus = center;
        self.radius = (spread * FRAMING_MARGIN).clamp(MIN_RADIUS, MAX_RADIUS);
        true
    }
}

/// Centroid and largest distance from it, for a set of points.
pub fn framing_for(points: &[Vec3]) -> Option<(Vec3, f32)> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let center = points.iter().copied().sum::<Vec3>() / points.len() as f32;
    let spread = points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f32, f32::max);
    Some((center, spread))
}

// ============================================================================
// Settings
// ============================================================================

/// Settings for camera movement.
#[derive(Resource)]
pub struct CameraSettings {
    /// Radians of orbit per pixel of mouse motion.
    pub orbit_sensitivity: f32,
    /// Fraction of the radius panned per pixel of mouse motion.
    pub pan_sensitivity: f32,
    /// Zoom steps per scroll unit.
    pub zoom_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_sensitivity: 1.0,
        }
    }
}

/// Pending request to frame the camera on a set of world-space points.
#[derive(Resource, Default)]
pub struct FramingRequest {
    pending: Option<Vec<Vec3>>,
}

impl FramingRequest {
    /// Request framing on the given points.
    pub fn request(&mut self, points: Vec<Vec3>) {
        self.pending = Some(points);
    }

    /// Take the pending request, if any.
    fn take(&mut self) -> Option<Vec<Vec3>> {
        self.pending.take()
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin for the orbit camera.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .init_resource::<FramingRequest>()
            .add_systems(
                Update,
                (orbit_camera_input, process_framing_request, sync_camera_transform).chain(),
            );
    }
}

/// Bundle for spawning the viewer camera.
pub fn orbit_camera_bundle(orbit: OrbitCamera) -> impl Bundle {
    (
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: std::f32::consts::FRAC_PI_4,
            near: 0.05,
            far: 1_000.0,
            ..Default::default()
        }),
        orbit.transform(),
        orbit,
    )
}

// ============================================================================
// Systems
// ============================================================================

/// Apply mouse orbit, pan and zoom to the orbit camera.
fn orbit_camera_input(
    action_query: Query<&ActionState<ViewerAction>>,
    settings: Res<CameraSettings>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    let delta = action_state.axis_pair(&ViewerAction::Pointer);
    let scroll = action_state.value(&ViewerAction::Zoom);
    let orbiting = action_state.pressed(&ViewerAction::Orbit);
    let panning = action_state.pressed(&ViewerAction::Pan);

    if scroll == 0.0 && (delta == Vec2::ZERO || !(orbiting || panning)) {
        return;
    }

    for mut orbit in &mut cameras {
        if orbiting {
            orbit.orbit(
                -delta.x * settings.orbit_sensitivity,
                delta.y * settings.orbit_sensitivity,
            );
        } else if panning {
            orbit.pan(delta, settings.pan_sensitivity);
        }
        if scroll != 0.0 {
            orbit.zoom(scroll * settings.zoom_sensitivity);
        }
    }
}

/// Frame the camera on requested points.
fn process_framing_request(
    mut request: ResMut<FramingRequest>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let Some(points) = request.take() else {
        return;
    };
    for mut orbit in &mut cameras {
        if orbit.frame_points(&points) {
            tracing::info!(
                "Framed camera on {} point(s): focus {:.2}, radius {:.2}",
                points.len(),
                orbit.focus,
                orbit.radius
            );
        }
    }
}

/// Write the orbit state into the camera transform.
fn sync_camera_transform(mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (orbit, mut transform) in &mut cameras {
        *transform = orbit.transform();
    }
}
