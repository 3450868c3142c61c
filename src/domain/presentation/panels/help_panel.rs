use bevy_egui::egui;

use crate::domain::simulation::GolfSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &GolfSettings) {
    if settings.show_help {
        egui::Window::new("Help")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .show(ctx, |ui| {
                ui.label("Left Mouse on ball: Aim (drag back, release to shoot)");
                ui.label("Right Mouse: Orbit Camera (drag)");
                ui.label("Mouse Wheel: Zoom");
                ui.label("R: Reset Course");
                ui.label("H: Toggle Help");
                ui.label("F3: Toggle Diagnostics");
            });
    }
}
