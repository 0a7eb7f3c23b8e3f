//! Vehicle loading and wheel rigging.
//!
//! Loads the vehicle glTF scene, finds the four wheel nodes by name once the
//! scene is spawned, captures their rest orientations, and drives them every
//! frame from the steering rig.
//!
//! Each load gets a generation number. Completions that arrive for an older
//! generation (the vehicle was reloaded or torn down in the meantime) are
//! ignored, so a late scene never touches the current rig.

mod animation;

use bevy::{
    asset::LoadState, ecs::system::SystemParam, gltf::Gltf, prelude::*,
    scene::SceneInstanceReady, transform::TransformSystems,
};
use carview_rig::{RigError, WheelRole};
use leafwing_input_manager::prelude::*;

pub use animation::{AnimationControl, RigRuntime, RigSettings, VehicleRig};

use crate::{camera::FramingRequest, input::ViewerAction, launch_params::LaunchParams};

/// Plugin for vehicle loading and wheel animation.
pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VehicleLoader>()
            .init_resource::<VehicleActions>()
            .init_resource::<RigSettings>()
            .init_resource::<VehicleRig>()
            .init_resource::<RigRuntime>()
            .init_resource::<AnimationControl>()
            .add_systems(Startup, (apply_launch_settings, start_loading_vehicle).chain())
            .add_systems(
                Update,
                (
                    process_vehicle_actions,
                    check_vehicle_load_state,
                    animation::toggle_animation,
                    animation::tick_wheel_rig.run_if(animation::animation_running),
                    frame_vehicle,
                )
                    .chain(),
            )
            .add_systems(
                PostUpdate,
                animation::draw_wheel_axes
                    .run_if(animation::show_axes_enabled)
                    .after(TransformSystems::Propagate),
            )
            .add_observer(on_vehicle_scene_ready);
    }
}

// ============================================================================
// Loading state
// ============================================================================

/// Progress of the current vehicle load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for the scene to load and spawn.
    Loading,
    /// Scene spawned; this many wheels were rigged.
    Ready { wheels: usize },
    /// The model could not be loaded.
    Failed(String),
}

/// Marker for the root entity of a spawned vehicle scene.
#[derive(Component)]
pub struct VehicleRoot {
    /// Load generation that spawned this root.
    pub generation: u64,
}

/// Tracks the vehicle model load.
#[derive(Resource, Default)]
pub struct VehicleLoader {
    /// Model path, relative to the asset folder.
    model: String,
    /// Incremented on every load; older completions are discarded.
    generation: u64,
    /// Root entity of the current vehicle scene.
    scene_entity: Option<Entity>,
    /// Handle to the scene being loaded.
    handle: Option<Handle<Scene>>,
    /// Handle to the glTF file itself, which reports file-level failures.
    gltf: Option<Handle<Gltf>>,
    /// Current load status.
    status: LoadStatus,
    /// Frame the camera on the wheels on the next update.
    frame_pending: bool,
}

impl VehicleLoader {
    /// Model path being displayed.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Current load status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }
}

/// Pending vehicle actions.
#[derive(Resource, Default)]
pub struct VehicleActions {
    /// Whether to tear down and reload the model.
    reload: bool,
    /// Whether to frame the camera on the wheels.
    frame: bool,
}

impl VehicleActions {
    /// Request the model be reloaded from disk.
    pub fn request_reload(&mut self) {
        self.reload = true;
    }

    /// Request the camera be framed on the wheels.
    pub fn request_frame(&mut self) {
        self.frame = true;
    }
}

// ============================================================================
// Systems
// ============================================================================

/// Seed the rig settings from the launch parameters.
fn apply_launch_settings(params: Res<LaunchParams>, mut settings: ResMut<RigSettings>) {
    settings.axes = params.axes;
    settings.time_scaled = params.time_scaled;
    tracing::info!(
        "Steering axis {}, roll axis {}, roll speed {:.3} rad/frame{}",
        settings.axes.steering_axis,
        settings.axes.roll_axis,
        settings.axes.manual_roll_speed,
        if settings.time_scaled { " (time scaled)" } else { "" }
    );
}

/// Start loading the vehicle on startup.
fn start_loading_vehicle(
    mut commands: Commands,
    params: Res<LaunchParams>,
    asset_server: Res<AssetServer>,
    mut loader: ResMut<VehicleLoader>,
) {
    loader.model.clone_from(&params.model);
    spawn_vehicle_scene(&mut commands, &asset_server, &mut loader);
}

/// Spawn a new vehicle scene root for the loader's model.
fn spawn_vehicle_scene(
    commands: &mut Commands,
    asset_server: &AssetServer,
    loader: &mut VehicleLoader,
) {
    loader.generation += 1;
    let handle: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(loader.model.clone()));

    let scene_entity = commands
        .spawn((
            Name::new("Vehicle"),
            VehicleRoot {
                generation: loader.generation,
            },
            SceneRoot(handle.clone()),
            Transform::default(),
        ))
        .id();

    loader.scene_entity = Some(scene_entity);
    loader.handle = Some(handle);
    loader.gltf = Some(asset_server.load(loader.model.clone()));
    loader.status = LoadStatus::Loading;
    loader.frame_pending = false;

    tracing::info!(
        "Loading vehicle model: {} (generation {})",
        loader.model,
        loader.generation
    );
}

/// Stop the animation and remove the current vehicle.
///
/// The rig is cleared before the scene is despawned, so no tick can address a
/// node from the old scene.
fn teardown_vehicle(
    commands: &mut Commands,
    loader: &mut VehicleLoader,
    vehicle: &mut VehicleRig,
    runtime: &mut RigRuntime,
    control: &mut AnimationControl,
) {
    control.stop();
    *vehicle = VehicleRig::default();
    *runtime = RigRuntime::default();
    if let Some(entity) = loader.scene_entity.take() {
        commands.entity(entity).despawn();
    }
    loader.handle = None;
    loader.gltf = None;
    loader.status = LoadStatus::Idle;
    loader.frame_pending = false;
}

/// Process pending reload requests.
fn process_vehicle_actions(
    mut commands: Commands,
    mut actions: ResMut<VehicleActions>,
    mut loader: ResMut<VehicleLoader>,
    mut vehicle: ResMut<VehicleRig>,
    mut runtime: ResMut<RigRuntime>,
    mut control: ResMut<AnimationControl>,
    asset_server: Res<AssetServer>,
) {
    if !std::mem::take(&mut actions.reload) {
        return;
    }

    teardown_vehicle(
        &mut commands,
        &mut loader,
        &mut vehicle,
        &mut runtime,
        &mut control,
    );
    spawn_vehicle_scene(&mut commands, &asset_server, &mut loader);
}

/// Report a failed model load and continue with an empty scene.
fn check_vehicle_load_state(
    mut commands: Commands,
    mut loader: ResMut<VehicleLoader>,
    asset_server: Res<AssetServer>,
) {
    if loader.status != LoadStatus::Loading {
        return;
    }
    let scene_state = loader
        .handle
        .as_ref()
        .and_then(|handle| asset_server.get_load_state(handle.id()));
    let gltf_state = loader
        .gltf
        .as_ref()
        .and_then(|handle| asset_server.get_load_state(handle.id()));

    let failure = [gltf_state, scene_state]
        .into_iter()
        .flatten()
        .find_map(|state| match state {
            LoadState::Failed(err) => Some(err),
            _ => None,
        });

    if let Some(err) = failure {
        tracing::error!("Failed to load vehicle model '{}': {err}", loader.model);
        if let Some(entity) = loader.scene_entity.take() {
            commands.entity(entity).despawn();
        }
        loader.handle = None;
        loader.gltf = None;
        loader.status = LoadStatus::Failed(err.to_string());
    }
}

/// Whether a spawned scene root belongs to the current load.
///
/// A root from an earlier generation, or one that is no longer the tracked
/// scene entity, was reloaded or torn down while it was loading.
fn is_current_scene(loader: &VehicleLoader, root: Entity, generation: u64) -> bool {
    loader.scene_entity == Some(root) && loader.generation == generation
}

/// Resources touched when a vehicle scene finishes spawning.
#[derive(SystemParam)]
struct SceneReadyParams<'w, 's> {
    loader: ResMut<'w, VehicleLoader>,
    vehicle: ResMut<'w, VehicleRig>,
    runtime: ResMut<'w, RigRuntime>,
    control: ResMut<'w, AnimationControl>,
    roots: Query<'w, 's, &'static VehicleRoot>,
    children: Query<'w, 's, &'static Children>,
    nodes: Query<'w, 's, (&'static Name, &'static Transform)>,
}

/// Observer called when a vehicle scene finishes spawning.
fn on_vehicle_scene_ready(trigger: On<SceneInstanceReady>, params: SceneReadyParams) {
    rig_ready_scene(In(trigger.event_target()), params);
}

/// Rig the wheels of a freshly spawned scene, unless the scene is stale.
fn rig_ready_scene(In(root): In<Entity>, mut params: SceneReadyParams) {
    let Ok(vehicle_root) = params.roots.get(root) else {
        return;
    };
    if !is_current_scene(&params.loader, root, vehicle_root.generation) {
        tracing::debug!(
            "Ignoring stale vehicle scene (generation {}, current {})",
            vehicle_root.generation,
            params.loader.generation
        );
        return;
    }

    let wheel_nodes = params.children.iter_descendants(root).filter_map(|entity| {
        let (name, transform) = params.nodes.get(entity).ok()?;
        Some((entity, name.as_str(), transform.rotation))
    });
    *params.vehicle = rig_wheels(wheel_nodes);
    *params.runtime = RigRuntime::default();

    let wheels = params.vehicle.rig.len();
    let missing = params.vehicle.rig.missing();
    if missing.is_empty() {
        tracing::info!("Vehicle ready with {wheels} wheels rigged");
    } else {
        let missing: Vec<_> = missing.iter().map(|role| role.node_name()).collect();
        tracing::warn!(
            "Vehicle ready with {wheels} wheel(s) rigged; missing nodes: {}",
            missing.join(", ")
        );
    }

    params.loader.status = LoadStatus::Ready { wheels };
    params.loader.frame_pending = wheels > 0;
    if wheels > 0 {
        params.control.start();
    }
}

/// Capture rest orientations from named scene nodes.
///
/// Nodes that do not follow the wheel naming convention are left alone. If a
/// wheel name appears more than once, the first node wins.
fn rig_wheels<'a>(nodes: impl IntoIterator<Item = (Entity, &'a str, Quat)>) -> VehicleRig {
    let mut vehicle = VehicleRig::default();
    for (entity, name, rotation) in nodes {
        match vehicle.rig.capture_named(name, rotation) {
            Ok(role) => vehicle.set_node(role, entity),
            Err(RigError::UnknownWheelNode { .. }) => {}
            Err(e) => tracing::warn!("Skipping node {entity:?}: {e}"),
        }
    }
    vehicle
}

/// Frame the camera on the wheels after loading, or when F is pressed.
fn frame_vehicle(
    action_query: Query<&ActionState<ViewerAction>>,
    mut loader: ResMut<VehicleLoader>,
    mut actions: ResMut<VehicleActions>,
    mut framing: ResMut<FramingRequest>,
    vehicle: Res<VehicleRig>,
    nodes: Query<&GlobalTransform>,
) {
    let requested = action_query
        .single()
        .is_ok_and(|action_state| action_state.just_pressed(&ViewerAction::Frame));
    let requested = std::mem::take(&mut actions.frame) || requested;
    if !std::mem::take(&mut loader.frame_pending) && !requested {
        return;
    }

    let points: Vec<Vec3> = WheelRole::ALL
        .into_iter()
        .filter_map(|role| vehicle.node(role))
        .filter_map(|entity| nodes.get(entity).ok())
        .map(GlobalTransform::translation)
        .collect();
    if points.is_empty() {
        tracing::debug!("No wheel nodes to frame");
        return;
    }
    framing.request(points);
}
