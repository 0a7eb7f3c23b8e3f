//! Centralized input action definitions.
//!
//! Defines viewer actions using `leafwing-input-manager` for declarative,
//! rebindable input mapping, and mirrors the steering actions into the rig's
//! held-key set once per frame.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use carview_rig::{SteerInput, SteerKey};
use leafwing_input_manager::{plugin::InputManagerSystem, prelude::*};

// ============================================================================
// Action enums
// ============================================================================

/// Steering actions. Each is bound to an arrow key and a letter key.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum SteerAction {
    /// Steer left (Left arrow, A).
    Left,
    /// Steer right (Right arrow, D).
    Right,
}

impl SteerAction {
    /// The rig key this action holds.
    pub fn key(self) -> SteerKey {
        match self {
            SteerAction::Left => SteerKey::Left,
            SteerAction::Right => SteerKey::Right,
        }
    }
}

/// Actions for the orbit camera and general viewer control.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum ViewerAction {
    /// Mouse motion, used for orbiting and panning.
    #[actionlike(DualAxis)]
    Pointer,
    /// Hold to orbit (left mouse button).
    Orbit,
    /// Hold to pan (right mouse button).
    Pan,
    /// Zoom with mouse scroll.
    #[actionlike(Axis)]
    Zoom,
    /// Toggle UI visibility (Q).
    ToggleUi,
    /// Start or stop the wheel animation (Space).
    ToggleAnimation,
    /// Re-frame the camera on the vehicle (F).
    Frame,
}

// ============================================================================
// Input maps
// ============================================================================

/// Create the default input map for steering actions.
pub fn default_steer_input_map() -> InputMap<SteerAction> {
    InputMap::default()
        .with(SteerAction::Left, KeyCode::ArrowLeft)
        .with(SteerAction::Left, KeyCode::KeyA)
        .with(SteerAction::Right, KeyCode::ArrowRight)
        .with(SteerAction::Right, KeyCode::KeyD)
}

/// Create the default input map for viewer actions.
pub fn default_viewer_input_map() -> InputMap<ViewerAction> {
    InputMap::default()
        .with_dual_axis(ViewerAction::Pointer, MouseMove::default())
        .with(ViewerAction::Orbit, MouseButton::Left)
        .with(ViewerAction::Pan, MouseButton::Right)
        .with_axis(ViewerAction::Zoom, MouseScrollAxis::Y)
        .with(ViewerAction::ToggleUi, KeyCode::KeyQ)
        .with(ViewerAction::ToggleAnimation, KeyCode::Space)
        .with(ViewerAction::Frame, KeyCode::KeyF)
}

// ============================================================================
// Plugin
// ============================================================================

/// Held steering keys as seen by the rig this frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct HeldSteerKeys(pub SteerInput);

/// Plugin that registers input action types, the input focus system and the
/// steering key snapshot.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<SteerAction>::default())
            .add_plugins(InputManagerPlugin::<ViewerAction>::default())
            .init_resource::<HeldSteerKeys>()
            .add_systems(Startup, spawn_input_maps)
            .add_systems(
                PreUpdate,
                (manage_input_focus, sync_held_steer_keys)
                    .chain()
                    .after(InputManagerSystem::Update),
            );
    }
}

/// Spawn the entity carrying both input maps.
fn spawn_input_maps(mut commands: Commands) {
    commands.spawn((
        Name::new("Input"),
        default_steer_input_map(),
        ActionState::<SteerAction>::default(),
        default_viewer_input_map(),
        ActionState::<ViewerAction>::default(),
    ));
}

// ============================================================================
// Input focus management
// ============================================================================

/// Keyboard-bound viewer actions that should be disabled when egui wants keyboard input.
const KEYBOARD_ACTIONS: &[ViewerAction] = &[
    ViewerAction::ToggleUi,
    ViewerAction::ToggleAnimation,
    ViewerAction::Frame,
];

/// Pointer-bound viewer actions that should be disabled while the pointer is over egui.
const POINTER_ACTIONS: &[ViewerAction] = &[
    ViewerAction::Pointer,
    ViewerAction::Orbit,
    ViewerAction::Pan,
    ViewerAction::Zoom,
];

fn set_actions(
    action_state: &mut ActionState<ViewerAction>,
    actions: &[ViewerAction],
    enabled: bool,
) {
    for action in actions {
        if enabled {
            action_state.enable_action(action);
        } else {
            action_state.disable_action(action);
        }
    }
}

/// Manage input focus based on egui state.
///
/// Steering and keyboard shortcuts are disabled while a text field has focus,
/// and camera drags are disabled while the pointer is over a panel.
fn manage_input_focus(
    mut viewer_query: Query<&mut ActionState<ViewerAction>>,
    mut steer_query: Query<&mut ActionState<SteerAction>>,
    mut contexts: EguiContexts,
) {
    let (egui_wants_kb, egui_wants_pointer) = contexts
        .ctx_mut()
        .ok()
        .map_or((false, false), |ctx| {
            (ctx.wants_keyboard_input(), ctx.is_pointer_over_area())
        });

    for mut action_state in &mut viewer_query {
        set_actions(&mut action_state, KEYBOARD_ACTIONS, !egui_wants_kb);
        set_actions(&mut action_state, POINTER_ACTIONS, !egui_wants_pointer);
    }

    for mut action_state in &mut steer_query {
        if egui_wants_kb {
            action_state.disable_all_actions();
        } else {
            action_state.enable_all_actions();
        }
    }
}

/// Copy the held steering actions into the rig's key set.
///
/// Runs once per frame before the animation tick, so the tick always observes
/// a consistent snapshot.
fn sync_held_steer_keys(
    steer_query: Query<&ActionState<SteerAction>>,
    mut held: ResMut<HeldSteerKeys>,
) {
    let mut input = SteerInput::default();
    for action_state in &steer_query {
        for action in [SteerAction::Left, SteerAction::Right] {
            if action_state.pressed(&action) {
                input.press(action.key());
            }
        }
    }
    if held.0 != input {
        tracing::trace!("Steering keys changed: {input:?}");
        held.0 = input;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_action_keys() {
        assert_eq!(SteerAction::Left.key(), SteerKey::Left);
        assert_eq!(SteerAction::Right.key(), SteerKey::Right);
    }
}
