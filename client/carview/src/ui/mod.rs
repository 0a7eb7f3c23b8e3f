//! Debug UI for tuning the wheel rig and inspecting the camera.
//!
//! Shows the steering/roll state of the rig, its axis configuration, and the
//! orbit camera. Toggled with Q.

mod camera;
mod rig;

use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use leafwing_input_manager::prelude::*;

use crate::{input::ViewerAction, vehicle::VehicleActions};

/// Resource controlling whether the debug UI is visible.
#[derive(Resource)]
pub struct UiVisible(pub bool);

impl Default for UiVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Plugin for the debug UI overlay.
pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .init_resource::<DebugUiState>()
            .init_resource::<UiVisible>()
            .add_systems(Update, toggle_ui_visible)
            .add_systems(
                EguiPrimaryContextPass,
                debug_ui_system.run_if(|visible: Res<UiVisible>| visible.0),
            );
    }
}

/// Which tab is currently selected in the debug UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DebugTab {
    #[default]
    Rig,
    Camera,
}

/// State for the debug UI.
#[derive(Resource, Default)]
struct DebugUiState {
    /// Currently selected tab.
    selected_tab: DebugTab,
}

/// Toggle UI visibility with Q.
fn toggle_ui_visible(
    action_query: Query<&ActionState<ViewerAction>>,
    mut visible: ResMut<UiVisible>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&ViewerAction::ToggleUi) {
        visible.0 = !visible.0;
    }
}

/// Render the debug UI overlay.
fn debug_ui_system(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<DebugUiState>,
    mut vehicle_actions: ResMut<VehicleActions>,
    mut rig_params: rig::RigParams,
    mut camera_params: camera::CameraParams,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Vehicle")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (tab, label) in [(DebugTab::Rig, "Wheel rig"), (DebugTab::Camera, "Camera")] {
                    if ui
                        .selectable_label(ui_state.selected_tab == tab, label)
                        .clicked()
                    {
                        ui_state.selected_tab = tab;
                    }
                }
            });
            ui.separator();

            match ui_state.selected_tab {
                DebugTab::Rig => {
                    rig::render_rig_tab(ui, &mut rig_params, &mut vehicle_actions);
                }
                DebugTab::Camera => {
                    camera::render_camera_tab(ui, &mut camera_params, &mut vehicle_actions);
                }
            }
        });

    Ok(())
}
