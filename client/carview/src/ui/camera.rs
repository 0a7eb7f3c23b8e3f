//! Camera tab for the debug UI.

use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    ecs::system::SystemParam,
    prelude::*,
};
use bevy_egui::egui;

use crate::{
    camera::{CameraSettings, MAX_RADIUS, MIN_RADIUS, OrbitCamera},
    vehicle::VehicleActions,
};

/// Resources for camera display and control.
#[derive(SystemParam)]
pub(super) struct CameraParams<'w, 's> {
    pub settings: ResMut<'w, CameraSettings>,
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub camera_query: Query<'w, 's, &'static mut OrbitCamera>,
}

/// Render the camera tab content.
pub(super) fn render_camera_tab(
    ui: &mut egui::Ui,
    camera: &mut CameraParams,
    vehicle_actions: &mut VehicleActions,
) {
    if let Some(fps) = camera
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
    {
        ui.label(format!("FPS: {fps:.0}"));
    }

    if let Ok(mut orbit) = camera.camera_query.single_mut() {
        ui.label(format!(
            "Focus: ({:.2}, {:.2}, {:.2})",
            orbit.focus.x, orbit.focus.y, orbit.focus.z
        ));
        ui.label(format!(
            "Yaw: {:.1}°  Pitch: {:.1}°",
            orbit.yaw.to_degrees(),
            orbit.pitch.to_degrees()
        ));
        ui.horizontal(|ui| {
            ui.label("Distance:");
            ui.add(
                egui::Slider::new(&mut orbit.radius, MIN_RADIUS..=MAX_RADIUS)
                    .logarithmic(true)
                    .suffix(" m"),
            );
        });
    } else {
        ui.label("No camera");
    }

    if ui.button("Frame wheels (F)").clicked() {
        vehicle_actions.request_frame();
    }

    ui.separator();

    ui.collapsing("Sensitivity", |ui| {
        ui.horizontal(|ui| {
            ui.label("Orbit:");
            ui.add(
                egui::Slider::new(&mut camera.settings.orbit_sensitivity, 0.001..=0.02)
                    .logarithmic(true),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Pan:");
            ui.add(
                egui::Slider::new(&mut camera.settings.pan_sensitivity, 0.0002..=0.01)
                    .logarithmic(true),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Zoom:");
            ui.add(egui::Slider::new(
                &mut camera.settings.zoom_sensitivity,
                0.1..=4.0,
            ));
        });
    });

    ui.label("Left drag: orbit, right drag: pan, scroll: zoom");
}
