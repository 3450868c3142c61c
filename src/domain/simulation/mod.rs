mod ball;
mod course;
mod governor;

use bevy::prelude::*;
use bevy_rapier3d::prelude::PhysicsSet;

pub use ball::{Ball, BallHandle, RigidBall};
pub use course::Course;

#[cfg(test)]
pub(crate) use ball::TestBall;

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    Holed,
}

/// Power of the shot being aimed, in `[0, max_force]`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PowerChanged(pub f32);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotTaken(pub u32);

/// Ball entered the capture volume of the cup; carries the final shot count.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holed(pub u32);

#[derive(Event, Default)]
pub struct ResetEvent;

#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotState {
    pub shot_count: u32,
}

#[derive(Resource, Clone, Debug)]
pub struct GolfSettings {
    pub max_force: f32,
    /// Shot power gained per world unit of drag.
    pub power_per_unit: f32,
    pub indicator_scale: f32,
    pub indicator_max_length: f32,
    pub indicator_initial_scale: f32,
    /// Below this speed the ball is snapped to rest.
    pub stop_speed: f32,
    pub damping: f32,
    pub camera_radius_range: Vec2, // min, max
    pub orbit_sensitivity: f32,
    pub zoom_step: f32,
    pub show_help: bool,
    pub show_diagnostics: bool,
}

impl Default for GolfSettings {
    fn default() -> Self {
        Self {
            max_force: 10.0,
            power_per_unit: 2.0,
            indicator_scale: 0.2,
            indicator_max_length: 5.0,
            indicator_initial_scale: 0.1,
            stop_speed: 0.5,
            damping: 0.95,
            camera_radius_range: Vec2::new(5.0, 30.0),
            orbit_sensitivity: 0.005,
            zoom_step: 1.0,
            show_help: true,
            show_diagnostics: false,
        }
    }
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_resource::<GolfSettings>()
            .init_resource::<ShotState>()
            .init_resource::<Course>()
            .add_event::<PowerChanged>()
            .add_event::<ShotTaken>()
            .add_event::<Holed>()
            .add_event::<ResetEvent>()
            .add_systems(Startup, course::spawn_course)
            .add_systems(Update, course::handle_reset)
            .add_systems(
                PostUpdate,
                (governor::govern_ball, governor::finish_on_holed)
                    .chain()
                    .after(PhysicsSet::Writeback)
                    .run_if(any_with_component::<Ball>),
            );
    }
}
