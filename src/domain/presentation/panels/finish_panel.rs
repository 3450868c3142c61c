use bevy::prelude::*;
use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::simulation::ResetEvent;

pub fn show_finish_panel(
    ctx: &mut egui::Context,
    final_score: u32,
    ev_reset: &mut EventWriter<ResetEvent>,
) {
    egui::Window::new("Finish")
        .title_bar(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Goal Scored!")
                        .font(FontId::proportional(40.0))
                        .color(Color32::GREEN),
                );
                ui.label(final_score_text(final_score));
                if ui.button("Play Again").clicked() {
                    ev_reset.send(ResetEvent);
                }
            });
        });
}

fn final_score_text(shots: u32) -> String {
    format!("Final Score: {} shots", shots)
}
