use bevy_egui::egui::{self, Color32};

use crate::domain::presentation::HudState;

pub const POWER_BAR_MAX_WIDTH: f32 = 150.0;
const POWER_BAR_HEIGHT: f32 = 14.0;

pub fn show_hud_panel(ctx: &mut egui::Context, hud: &HudState, max_force: f32) {
    egui::Area::new("hud".into())
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("Shots: {}", hud.shots))
                    .size(20.0)
                    .color(Color32::WHITE),
            );

            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(POWER_BAR_MAX_WIDTH, POWER_BAR_HEIGHT),
                egui::Sense::hover(),
            );
            ui.painter().rect_filled(rect, 3.0, Color32::from_gray(40));
            let mut fill = rect;
            fill.set_width(power_bar_width(hud.power, max_force));
            ui.painter()
                .rect_filled(fill, 3.0, Color32::from_rgb(235, 170, 40));
        });
}

/// Bar width in points for the given shot power.
pub fn power_bar_width(power: f32, max_force: f32) -> f32 {
    if max_force <= 0.0 {
        return 0.0;
    }
    (power / max_force * POWER_BAR_MAX_WIDTH).clamp(0.0, POWER_BAR_MAX_WIDTH)
}
