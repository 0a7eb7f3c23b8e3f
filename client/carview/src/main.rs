//! Interactive 3D vehicle viewer using Bevy.
//!
//! Loads a glTF vehicle, rigs its four wheels by node name, and animates them:
//! the front wheels steer with the arrow keys (or A/D) and every wheel rolls
//! continuously about its local axis.

mod camera;
mod input;
mod launch_params;
mod ui;
mod vehicle;

use bevy::light::light_consts::lux;
use bevy::prelude::*;
use camera::{OrbitCamera, OrbitCameraPlugin, orbit_camera_bundle};
use input::InputPlugin;
use ui::DebugUiPlugin;
use vehicle::VehiclePlugin;

/// Side length of the ground plane (meters).
const GROUND_SIZE: f32 = 40.0;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((InputPlugin, OrbitCameraPlugin, VehiclePlugin, DebugUiPlugin))
            .insert_resource(ClearColor(Color::srgb(0.52, 0.6, 0.68)))
            .add_systems(Startup, setup_scene);
    }
}

/// Set up the camera, lights and ground.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((Name::new("Camera"), orbit_camera_bundle(OrbitCamera::default())));

    // Key light from above and in front, with shadows so the wheels read clearly.
    commands.spawn((
        Name::new("Key light"),
        DirectionalLight {
            illuminance: lux::AMBIENT_DAYLIGHT,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Dimmer fill from the opposite side.
    commands.spawn((
        Name::new("Fill light"),
        DirectionalLight {
            illuminance: lux::OVERCAST_DAY,
            ..default()
        },
        Transform::from_xyz(-6.0, 3.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.32, 0.34, 0.36),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::default(),
    ));

    tracing::info!(
        "Scene setup complete - arrows or A/D to steer, Space to pause, F to frame, Q for UI"
    );
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = launch_params::parse();

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "carview".to_string(),
        resolution: (1600, 900).into(),
        position: WindowPosition::Centered(MonitorSelection::Primary),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    app.insert_resource(params).add_plugins(AppPlugin).run();
}
