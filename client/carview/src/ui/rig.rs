//! Wheel rig tab for the debug UI.
//!
//! Axis selection and manual overrides apply on the next frame; the rig
//! itself is never rebuilt from here.

use bevy::{ecs::system::SystemParam, prelude::*};
use bevy_egui::egui;
use carview_rig::{Axis, MAX_STEER_ANGLE, SteerDirection, WheelRole, effective_steer};

use crate::{
    input::HeldSteerKeys,
    vehicle::{
        AnimationControl, LoadStatus, RigRuntime, RigSettings, VehicleActions, VehicleLoader,
        VehicleRig,
    },
};

/// Resources for the wheel rig tab.
#[derive(SystemParam)]
pub(super) struct RigParams<'w> {
    pub settings: ResMut<'w, RigSettings>,
    pub control: ResMut<'w, AnimationControl>,
    pub runtime: Res<'w, RigRuntime>,
    pub vehicle: Res<'w, VehicleRig>,
    pub loader: Res<'w, VehicleLoader>,
    pub held: Res<'w, HeldSteerKeys>,
}

/// Render the wheel rig tab content.
pub(super) fn render_rig_tab(
    ui: &mut egui::Ui,
    rig: &mut RigParams,
    vehicle_actions: &mut VehicleActions,
) {
    render_load_status(ui, rig, vehicle_actions);
    ui.separator();
    render_state(ui, rig);
    ui.separator();
    render_axis_config(ui, rig);
    ui.separator();
    render_wheels(ui, rig);
}

fn render_load_status(
    ui: &mut egui::Ui,
    rig: &mut RigParams,
    vehicle_actions: &mut VehicleActions,
) {
    ui.label(format!("Model: {}", rig.loader.model()));
    match rig.loader.status() {
        LoadStatus::Idle => ui.label("Status: Idle"),
        LoadStatus::Loading => ui.label("Status: Loading..."),
        LoadStatus::Ready { wheels } => ui.label(format!("Status: Ready ({wheels}/4 wheels)")),
        LoadStatus::Failed(err) => {
            ui.colored_label(egui::Color32::LIGHT_RED, format!("Status: Failed ({err})"))
        }
    };

    ui.horizontal(|ui| {
        if ui.button("Reload model").clicked() {
            vehicle_actions.request_reload();
        }

        let running = rig.control.is_running();
        let label = if running {
            "Stop animation (Space)"
        } else {
            "Start animation (Space)"
        };
        if ui.button(label).clicked() {
            rig.control.toggle();
        }
    });
}

fn render_state(ui: &mut egui::Ui, rig: &RigParams) {
    let direction = match rig.held.0.direction() {
        SteerDirection::Left => "Left",
        SteerDirection::Right => "Right",
        SteerDirection::None => "None",
    };
    ui.label(format!("Steering input: {direction}"));

    let state = rig.runtime.state;
    let lock = rig.settings.controller.max_angle;
    ui.label(format!(
        "Steering angle: {:+.1}° (lock ±{:.0}°)",
        state.steering_angle.to_degrees(),
        lock.to_degrees()
    ));
    ui.add(
        egui::ProgressBar::new((state.steering_angle / lock).abs().min(1.0))
            .desired_width(200.0)
            .show_percentage(),
    );
    ui.label(format!(
        "Roll: {:.2} rad ({:.1} turns)",
        state.roll_angle(),
        state.roll_angle() / std::f32::consts::TAU
    ));
    ui.label(format!("Ticks: {}", rig.runtime.ticks));
}

fn axis_combo(ui: &mut egui::Ui, id: &str, axis: &mut Axis) {
    let mut index = axis.index();
    egui::ComboBox::from_id_salt(id).show_index(ui, &mut index, Axis::ALL.len(), |i| {
        Axis::from_index(i).label()
    });
    *axis = Axis::from_index(index);
}

fn render_axis_config(ui: &mut egui::Ui, rig: &mut RigParams) {
    let settings = &mut rig.settings;

    ui.horizontal(|ui| {
        ui.label("Steering axis:");
        axis_combo(ui, "steering_axis", &mut settings.axes.steering_axis);
        ui.label("Roll axis:");
        axis_combo(ui, "roll_axis", &mut settings.axes.roll_axis);
    });

    ui.horizontal(|ui| {
        ui.label("Steering offset:");
        ui.add(
            egui::Slider::new(
                &mut settings.axes.manual_steering_offset,
                -MAX_STEER_ANGLE..=MAX_STEER_ANGLE,
            )
            .suffix(" rad"),
        );
        if ui.small_button("Reset").clicked() {
            settings.axes.manual_steering_offset = 0.0;
        }
    });

    ui.horizontal(|ui| {
        ui.label("Roll speed:");
        ui.add(
            egui::Slider::new(&mut settings.axes.manual_roll_speed, -0.5..=0.5)
                .suffix(" rad/frame"),
        );
    });

    ui.checkbox(&mut settings.time_scaled, "Scale by elapsed time");
    ui.checkbox(&mut settings.show_axes, "Show wheel axes");
}

fn render_wheels(ui: &mut egui::Ui, rig: &RigParams) {
    let steering_angle = rig.runtime.state.steering_angle;
    egui::Grid::new("wheels").striped(true).show(ui, |ui| {
        ui.label("Wheel");
        ui.label("Node");
        ui.label("Steer");
        ui.end_row();

        for role in WheelRole::ALL {
            ui.label(role.to_string());
            match rig.vehicle.rig.get(role) {
                Some(wheel) => {
                    ui.label(&wheel.wheel_id);
                    let steer = effective_steer(role, steering_angle, &rig.settings.axes);
                    ui.label(format!("{:+.1}°", steer.to_degrees()));
                }
                None => {
                    ui.colored_label(egui::Color32::YELLOW, "missing");
                    ui.label("-");
                }
            }
            ui.end_row();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_combo_keeps_selection() {
        let ctx = egui::Context::default();
        for original in Axis::ALL {
            let mut axis = original;
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    axis_combo(ui, "axis", &mut axis);
                });
            });
            assert_eq!(axis, original);
        }
    }
}
