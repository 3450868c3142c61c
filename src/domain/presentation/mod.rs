mod panels;

use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};
use bevy_rapier3d::prelude::Velocity;

use crate::domain::simulation::{
    AppState, Ball, GolfSettings, Holed, PowerChanged, ResetEvent, ShotTaken,
};
use panels::diagnostics_panel::show_diagnostics_panel;
use panels::finish_panel::show_finish_panel;
use panels::help_panel::show_help_panel;
use panels::hud_panel::show_hud_panel;

/// What the overlay shows, fed only by the game events.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct HudState {
    pub shots: u32,
    pub power: f32,
    pub final_score: Option<u32>,
}

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<HudState>()
            .add_systems(Update, (track_hud, ui_system).chain())
            .add_systems(Update, finish_ui.run_if(in_state(AppState::Holed)));
    }
}

fn track_hud(
    mut hud: ResMut<HudState>,
    mut ev_power: EventReader<PowerChanged>,
    mut ev_shot: EventReader<ShotTaken>,
    mut ev_holed: EventReader<Holed>,
    mut ev_reset: EventReader<ResetEvent>,
) {
    if ev_reset.read().last().is_some() {
        *hud = HudState::default();
    }
    if let Some(PowerChanged(power)) = ev_power.read().last() {
        hud.power = *power;
    }
    if let Some(ShotTaken(count)) = ev_shot.read().last() {
        hud.shots = *count;
    }
    if let Some(Holed(count)) = ev_holed.read().last() {
        hud.final_score = Some(*count);
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    settings: Res<GolfSettings>,
    diagnostics: Res<DiagnosticsStore>,
    balls: Query<&Velocity, With<Ball>>,
) {
    let ball_linvel = balls.get_single().ok().map(|v| v.linvel);
    let ctx = contexts.ctx_mut();
    show_hud_panel(ctx, &hud, settings.max_force);
    show_help_panel(ctx, &settings);
    show_diagnostics_panel(ctx, &diagnostics, ball_linvel, &settings);
}

fn finish_ui(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    mut ev_reset: EventWriter<ResetEvent>,
) {
    let final_score = hud.final_score.unwrap_or(hud.shots);
    show_finish_panel(contexts.ctx_mut(), final_score, &mut ev_reset);
}
