use bevy::diagnostic::{
    DiagnosticsStore, EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
};
use bevy::math::Vec3;
use bevy_egui::egui;

use crate::domain::simulation::GolfSettings;

/// Speed readout next to whether the governor would snap the ball to rest.
pub fn ball_readout(linvel: Vec3, settings: &GolfSettings) -> String {
    let speed = linvel.length();
    if speed < settings.stop_speed {
        format!("Ball: {:.2} u/s (at rest)", speed)
    } else {
        format!("Ball: {:.2} u/s", speed)
    }
}

pub fn show_diagnostics_panel(
    ctx: &mut egui::Context,
    diagnostics: &DiagnosticsStore,
    ball_linvel: Option<Vec3>,
    settings: &GolfSettings,
) {
    if !settings.show_diagnostics {
        return;
    }
    egui::Window::new("Diagnostics").show(ctx, |ui| {
        if let Some(fps) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|d| d.smoothed())
        {
            ui.label(format!("FPS: {:.1}", fps));
        }
        if let Some(count) = diagnostics
            .get(&EntityCountDiagnosticsPlugin::ENTITY_COUNT)
            .and_then(|d| d.value())
        {
            ui.label(format!("Entities: {}", count));
        }
        match ball_linvel {
            Some(linvel) => ui.label(ball_readout(linvel, settings)),
            None => ui.label("Ball: not spawned"),
        };
    });
}
