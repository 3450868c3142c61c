use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};

use super::ball::{Ball, BallHandle, RigidBall};
use super::{AppState, GolfSettings, Holed, ShotState};

/// Capture volume around the cup.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct GoalTrigger {
    pub position: Vec3,
    pub capture_radius: f32,
    pub capture_height: f32,
}

impl GoalTrigger {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            capture_radius: 1.5,
            capture_height: 1.5,
        }
    }

    pub fn captures(&self, ball_pos: Vec3) -> bool {
        ball_pos.distance(self.position) < self.capture_radius && ball_pos.y < self.capture_height
    }
}

/// Everything the governor touches during one frame.
pub struct FrameContext<'a, B: BallHandle> {
    pub ball: &'a mut B,
    pub goal: &'a GoalTrigger,
    pub settings: &'a GolfSettings,
    pub shots: ShotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Shot count at the moment the ball was found in the cup.
    pub holed: Option<u32>,
    /// The ball was moving and got snapped to rest this frame.
    pub stopped: bool,
}

/// Per-frame rolling-friction stand-in and cup detection.
///
/// Must run after the physics step has written back this frame's
/// velocities. The cup check does not short-circuit the damping.
pub fn govern<B: BallHandle>(cx: FrameContext<'_, B>) -> FrameReport {
    let FrameContext {
        ball,
        goal,
        settings,
        shots,
    } = cx;

    let holed = goal
        .captures(ball.position())
        .then_some(shots.shot_count);

    let mut stopped = false;
    if ball.linear_velocity().length() < settings.stop_speed {
        stopped = ball.linear_velocity() != Vec3::ZERO || ball.angular_velocity() != Vec3::ZERO;
        ball.set_linear_velocity(Vec3::ZERO);
        ball.set_angular_velocity(Vec3::ZERO);
    }

    // Re-read so a ball stopped above stays exactly at rest.
    let damped = ball.linear_velocity() * settings.damping;
    ball.set_linear_velocity(damped);

    FrameReport { holed, stopped }
}

pub(super) fn govern_ball(
    settings: Res<GolfSettings>,
    goal: Res<GoalTrigger>,
    shots: Res<ShotState>,
    state: Res<State<AppState>>,
    mut balls: Query<(&Transform, &mut Velocity, &mut ExternalImpulse), With<Ball>>,
    mut ev_holed: EventWriter<Holed>,
) {
    let Ok((transform, velocity, impulse)) = balls.get_single_mut() else {
        return;
    };
    let mut ball = RigidBall::new(transform.translation, velocity, impulse);

    let report = govern(FrameContext {
        ball: &mut ball,
        goal: &goal,
        settings: &settings,
        shots: *shots,
    });

    if report.stopped {
        debug!("Ball snapped to rest at {:?}", transform.translation);
    }
    // The governor keeps reporting while the ball sits in the cup; only the
    // first report of a round becomes an event.
    if let Some(final_count) = report.holed {
        if *state.get() == AppState::Playing {
            ev_holed.send(Holed(final_count));
        }
    }
}

pub(super) fn finish_on_holed(
    mut ev_holed: EventReader<Holed>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if let Some(Holed(final_count)) = ev_holed.read().last() {
        info!("Ball holed in {} shots", final_count);
        next_state.set(AppState::Holed);
    }
}
