mod aim;
mod camera;
mod pointer;

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use bevy_rapier3d::prelude::PhysicsSet;

use crate::domain::simulation::{AppState, GolfSettings, ResetEvent};

use aim::AimSession;
pub use camera::OrbitCamera;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AimSession>()
            .add_systems(Startup, pointer::spawn_aim_arrow)
            .add_systems(
                Update,
                (
                    pointer::aim_with_pointer.run_if(in_state(AppState::Playing)),
                    pointer::cancel_aim_on_reset,
                    camera::orbit_controls,
                    reset_trigger,
                    help_toggle,
                    diagnostics_toggle,
                ),
            )
            .add_systems(
                PostUpdate,
                camera::follow_ball
                    .after(PhysicsSet::Writeback)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

fn reset_trigger(mut ev_reset: EventWriter<ResetEvent>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyR) {
        ev_reset.send(ResetEvent);
    }
}

fn help_toggle(mut settings: ResMut<GolfSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::KeyH) {
        settings.show_help = !settings.show_help;
    }
}

fn diagnostics_toggle(mut settings: ResMut<GolfSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}
