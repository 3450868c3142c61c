//! Drag-to-shoot aiming.
//!
//! Pointer-down on the ball opens a drag, pointer-move pulls it back, and
//! pointer-up turns the horizontal pull into an impulse. The host plugs in
//! picking, the camera rig, the direction arrow and HUD feedback through
//! the traits below.

use bevy::prelude::*;

use crate::domain::simulation::{BallHandle, GolfSettings, ShotState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub point: Vec3,
    pub on_ball: bool,
}

pub trait ScenePicker {
    /// World point under the cursor, if anything was hit.
    fn pick(&self, cursor: Vec2) -> Option<PickHit>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    /// `None` leaves the polar angle free.
    pub beta: Option<(f32, f32)>,
    pub radius: (f32, f32),
}

impl OrbitLimits {
    pub fn free(settings: &GolfSettings) -> Self {
        Self {
            beta: None,
            radius: (
                settings.camera_radius_range.x,
                settings.camera_radius_range.y,
            ),
        }
    }

    /// Pins the rig to its current view.
    pub fn frozen(beta: f32, radius: f32) -> Self {
        Self {
            beta: Some((beta, beta)),
            radius: (radius, radius),
        }
    }
}

pub trait CameraRig {
    fn beta(&self) -> f32;
    fn radius(&self) -> f32;
    fn set_orbit_limits(&mut self, limits: OrbitLimits);
}

pub trait AimIndicator {
    fn set_visible(&mut self, visible: bool);
    fn set_position(&mut self, pos: Vec3);
    fn set_length_scale(&mut self, scale: f32);
    fn set_yaw(&mut self, yaw: f32);
}

pub trait ShotFeedback {
    fn power_changed(&mut self, power: f32);
    fn shot_taken(&mut self, shot_count: u32);
}

/// The drag in progress. `Default` is the idle state.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct AimSession {
    pub active: bool,
    pub start_point: Vec3,
    pub end_point: Vec3,
    pub power: f32,
}

impl AimSession {
    /// Pull-back vector, flattened onto the ground plane.
    pub fn drag_vector(&self) -> Vec3 {
        let mut v = self.start_point - self.end_point;
        v.y = 0.0;
        v
    }

    pub fn drag_distance(&self) -> f32 {
        self.start_point.distance(self.end_point)
    }

    pub fn impulse(&self) -> Vec3 {
        self.drag_vector().normalize_or_zero() * self.power
    }
}

/// Left-button transition, in delivery order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Down,
    Up,
}

pub fn shot_power(drag_distance: f32, settings: &GolfSettings) -> f32 {
    (drag_distance * settings.power_per_unit).clamp(0.0, settings.max_force)
}

pub struct AimContext<'a, P, B, C, I, F> {
    pub settings: &'a GolfSettings,
    pub picker: &'a P,
    pub ball: &'a mut B,
    pub camera: &'a mut C,
    pub indicator: &'a mut I,
    pub feedback: &'a mut F,
    pub shots: &'a mut ShotState,
}

impl<P, B, C, I, F> AimContext<'_, P, B, C, I, F>
where
    P: ScenePicker,
    B: BallHandle,
    C: CameraRig,
    I: AimIndicator,
    F: ShotFeedback,
{
    /// Returns true when a drag was started.
    pub fn pointer_down(&mut self, session: &mut AimSession, cursor: Vec2) -> bool {
        let Some(hit) = self.picker.pick(cursor) else {
            return false;
        };
        if !hit.on_ball {
            return false;
        }

        *session = AimSession {
            active: true,
            start_point: hit.point,
            end_point: hit.point,
            power: 0.0,
        };

        let frozen = OrbitLimits::frozen(self.camera.beta(), self.camera.radius());
        self.camera.set_orbit_limits(frozen);

        self.indicator.set_visible(true);
        self.indicator.set_position(self.ball.position());
        self.indicator
            .set_length_scale(self.settings.indicator_initial_scale);

        debug!("Aim started at {:?}", hit.point);
        true
    }

    /// Returns true when the drag was updated. Misses leave it untouched.
    pub fn pointer_move(&mut self, session: &mut AimSession, cursor: Vec2) -> bool {
        if !session.active {
            return false;
        }
        let Some(hit) = self.picker.pick(cursor) else {
            return false;
        };

        session.end_point = hit.point;
        let distance = session.drag_distance();
        let drag = session.drag_vector();

        self.indicator.set_position(self.ball.position());
        self.indicator.set_length_scale(
            (distance * self.settings.indicator_scale).min(self.settings.indicator_max_length),
        );
        self.indicator.set_yaw(drag.x.atan2(drag.z));

        session.power = shot_power(distance, self.settings);
        self.feedback.power_changed(session.power);
        true
    }

    /// Fires the shot and returns the impulse handed to the ball.
    pub fn pointer_up(&mut self, session: &mut AimSession) -> Option<Vec3> {
        if !session.active {
            return None;
        }
        let released = std::mem::take(session);

        self.camera
            .set_orbit_limits(OrbitLimits::free(self.settings));
        self.indicator.set_visible(false);

        let impulse = released.impulse();
        let at = self.ball.position();
        self.ball.apply_impulse(impulse, at);

        self.shots.shot_count += 1;
        self.feedback.shot_taken(self.shots.shot_count);
        self.feedback.power_changed(0.0);

        info!(
            "Shot {} taken: power {:.2}, impulse {:?}",
            self.shots.shot_count, released.power, impulse
        );
        Some(impulse)
    }

    /// Handles one frame of pointer input. Cursor moves land before the
    /// first release so a drag is measured before it fires; any left over
    /// apply to whatever drag is open at the end of the frame.
    pub fn pointer_frame(
        &mut self,
        session: &mut AimSession,
        buttons: &[PointerButton],
        moves: &[Vec2],
        cursor: Option<Vec2>,
    ) {
        let mut pending = moves;
        for button in buttons {
            match button {
                PointerButton::Down => {
                    if let Some(cursor) = cursor {
                        self.pointer_down(session, cursor);
                    }
                }
                PointerButton::Up => {
                    for &at in pending {
                        self.pointer_move(session, at);
                    }
                    pending = &[];
                    self.pointer_up(session);
                }
            }
        }
        for &at in pending {
            self.pointer_move(session, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::TestBall;

    #[derive(Default)]
    struct StubPicker {
        hit: Option<PickHit>,
        /// Cursor that lands on the ball regardless of `hit`.
        ball_at: Option<(Vec2, PickHit)>,
    }

    impl ScenePicker for StubPicker {
        fn pick(&self, cursor: Vec2) -> Option<PickHit> {
            match self.ball_at {
                Some((at, hit)) if at == cursor => Some(hit),
                _ => self.hit,
            }
        }
    }

    struct StubCamera {
        beta: f32,
        radius: f32,
        limits: Vec<OrbitLimits>,
    }

    impl CameraRig for StubCamera {
        fn beta(&self) -> f32 {
            self.beta
        }
        fn radius(&self) -> f32 {
            self.radius
        }
        fn set_orbit_limits(&mut self, limits: OrbitLimits) {
            self.limits.push(limits);
        }
    }

    #[derive(Default)]
    struct StubArrow {
        visible: bool,
        position: Vec3,
        length: f32,
        yaw: f32,
    }

    impl AimIndicator for StubArrow {
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
        fn set_position(&mut self, pos: Vec3) {
            self.position = pos;
        }
        fn set_length_scale(&mut self, scale: f32) {
            self.length = scale;
        }
        fn set_yaw(&mut self, yaw: f32) {
            self.yaw = yaw;
        }
    }

    #[derive(Default)]
    struct Recorder {
        powers: Vec<f32>,
        shots: Vec<u32>,
    }

    impl ShotFeedback for Recorder {
        fn power_changed(&mut self, power: f32) {
            self.powers.push(power);
        }
        fn shot_taken(&mut self, shot_count: u32) {
            self.shots.push(shot_count);
        }
    }

    struct Rig {
        settings: GolfSettings,
        picker: StubPicker,
        ball: TestBall,
        camera: StubCamera,
        arrow: StubArrow,
        feedback: Recorder,
        shots: ShotState,
        session: AimSession,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                settings: GolfSettings::default(),
                picker: StubPicker::default(),
                ball: TestBall {
                    position: Vec3::new(0.0, 0.25, 5.0),
                    ..default()
                },
                camera: StubCamera {
                    beta: 1.0,
                    radius: 20.0,
                    limits: Vec::new(),
                },
                arrow: StubArrow::default(),
                feedback: Recorder::default(),
                shots: ShotState::default(),
                session: AimSession::default(),
            }
        }

        fn aim(&mut self, hit: Option<PickHit>) -> &mut Self {
            self.picker.hit = hit;
            self
        }

        fn down(&mut self) -> bool {
            let mut cx = AimContext {
                settings: &self.settings,
                picker: &self.picker,
                ball: &mut self.ball,
                camera: &mut self.camera,
                indicator: &mut self.arrow,
                feedback: &mut self.feedback,
                shots: &mut self.shots,
            };
            cx.pointer_down(&mut self.session, Vec2::ZERO)
        }

        fn drag(&mut self) -> bool {
            let mut cx = AimContext {
                settings: &self.settings,
                picker: &self.picker,
                ball: &mut self.ball,
                camera: &mut self.camera,
                indicator: &mut self.arrow,
                feedback: &mut self.feedback,
                shots: &mut self.shots,
            };
            cx.pointer_move(&mut self.session, Vec2::ZERO)
        }

        fn up(&mut self) -> Option<Vec3> {
            let mut cx = AimContext {
                settings: &self.settings,
                picker: &self.picker,
                ball: &mut self.ball,
                camera: &mut self.camera,
                indicator: &mut self.arrow,
                feedback: &mut self.feedback,
                shots: &mut self.shots,
            };
            cx.pointer_up(&mut self.session)
        }

        fn frame(&mut self, buttons: &[PointerButton], moves: &[Vec2], cursor: Vec2) {
            let mut cx = AimContext {
                settings: &self.settings,
                picker: &self.picker,
                ball: &mut self.ball,
                camera: &mut self.camera,
                indicator: &mut self.arrow,
                feedback: &mut self.feedback,
                shots: &mut self.shots,
            };
            cx.pointer_frame(&mut self.session, buttons, moves, Some(cursor));
        }
    }

    fn on_ball(point: Vec3) -> Option<PickHit> {
        Some(PickHit {
            point,
            on_ball: true,
        })
    }

    fn on_course(point: Vec3) -> Option<PickHit> {
        Some(PickHit {
            point,
            on_ball: false,
        })
    }

    #[test]
    fn power_is_twice_the_drag_clamped_at_max() {
        let settings = GolfSettings::default();
        assert_eq!(shot_power(0.0, &settings), 0.0);
        assert_eq!(shot_power(1.5, &settings), 3.0);
        assert_eq!(shot_power(5.0, &settings), 10.0);
        assert_eq!(shot_power(250.0, &settings), 10.0);

        let mut last = 0.0;
        for i in 0..100 {
            let p = shot_power(i as f32 * 0.1, &settings);
            assert!(p >= last);
            assert!(p <= settings.max_force);
            last = p;
        }
    }

    #[test]
    fn straight_pull_back_shoots_forward() {
        let mut rig = Rig::new();
        assert!(rig.aim(on_ball(Vec3::ZERO)).down());
        assert!(rig.aim(on_course(Vec3::new(2.0, 0.0, 0.0))).drag());
        assert_eq!(rig.session.power, 4.0);

        let impulse = rig.up().expect("shot fired");
        assert_eq!(impulse, Vec3::new(-4.0, 0.0, 0.0));
        assert_eq!(rig.ball.impulses, vec![(impulse, rig.ball.position)]);
        assert_eq!(rig.shots.shot_count, 1);
        assert_eq!(rig.feedback.shots, vec![1]);
        assert_eq!(rig.feedback.powers, vec![4.0, 0.0]);
    }

    #[test]
    fn release_without_pull_fires_zero_impulse() {
        let mut rig = Rig::new();
        let p = Vec3::new(0.1, 0.3, 5.0);
        rig.aim(on_ball(p)).down();
        rig.aim(on_ball(p)).drag();

        let impulse = rig.up().expect("shot fired");
        assert_eq!(impulse, Vec3::ZERO);
        assert!(!impulse.is_nan());
        assert_eq!(rig.shots.shot_count, 1);
    }

    #[test]
    fn vertical_pull_has_no_direction() {
        let mut rig = Rig::new();
        rig.aim(on_ball(Vec3::new(0.0, 0.5, 5.0))).down();
        rig.aim(on_course(Vec3::new(0.0, -0.5, 5.0))).drag();
        assert_eq!(rig.session.power, 2.0);
        assert_eq!(rig.up(), Some(Vec3::ZERO));
    }

    #[test]
    fn down_off_the_ball_does_not_start_a_drag() {
        let mut rig = Rig::new();
        assert!(!rig.aim(on_course(Vec3::ZERO)).down());
        assert!(!rig.aim(None).down());
        assert!(!rig.session.active);
        assert!(rig.camera.limits.is_empty());
        assert!(!rig.arrow.visible);

        assert_eq!(rig.up(), None);
        assert_eq!(rig.shots.shot_count, 0);
        assert!(rig.feedback.shots.is_empty());
    }

    #[test]
    fn missed_move_keeps_the_drag() {
        let mut rig = Rig::new();
        rig.aim(on_ball(Vec3::ZERO)).down();
        rig.aim(on_course(Vec3::new(0.0, 0.0, -1.0))).drag();
        let before = rig.session;

        assert!(!rig.aim(None).drag());
        assert_eq!(rig.session, before);
        assert_eq!(rig.feedback.powers, vec![2.0]);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut rig = Rig::new();
        assert!(!rig.aim(on_course(Vec3::ONE)).drag());
        assert!(rig.feedback.powers.is_empty());
    }

    #[test]
    fn aiming_freezes_and_release_restores_camera() {
        let mut rig = Rig::new();
        rig.aim(on_ball(Vec3::ZERO)).down();
        assert_eq!(rig.camera.limits, vec![OrbitLimits::frozen(1.0, 20.0)]);

        rig.up();
        assert_eq!(
            rig.camera.limits.last(),
            Some(&OrbitLimits {
                beta: None,
                radius: (5.0, 30.0),
            })
        );
    }

    #[test]
    fn arrow_follows_the_pull() {
        let mut rig = Rig::new();
        rig.aim(on_ball(Vec3::new(0.0, 0.25, 5.0))).down();
        assert!(rig.arrow.visible);
        assert_eq!(rig.arrow.position, rig.ball.position);
        assert_eq!(rig.arrow.length, 0.1);

        // Pulling towards -z aims down +z.
        rig.aim(on_course(Vec3::new(0.0, 0.25, 2.0))).drag();
        assert!((rig.arrow.length - 0.6).abs() < 1e-6);
        assert_eq!(rig.arrow.yaw, 0.0);

        // A long pull caps the arrow, not only the power.
        rig.aim(on_course(Vec3::new(40.0, 0.25, 5.0))).drag();
        assert_eq!(rig.arrow.length, 5.0);
        assert_eq!(rig.session.power, 10.0);
        assert!((rig.arrow.yaw + std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        rig.up();
        assert!(!rig.arrow.visible);
    }

    #[test]
    fn shots_accumulate_and_session_resets() {
        let mut rig = Rig::new();
        for _ in 0..3 {
            rig.aim(on_ball(Vec3::ZERO)).down();
            rig.aim(on_course(Vec3::new(0.0, 0.0, 1.0))).drag();
            rig.up();
        }
        assert_eq!(rig.shots.shot_count, 3);
        assert_eq!(rig.feedback.shots, vec![1, 2, 3]);
        assert_eq!(rig.session, AimSession::default());
    }

    const BALL_CURSOR: Vec2 = Vec2::new(400.0, 300.0);

    fn frame_rig() -> Rig {
        let mut rig = Rig::new();
        rig.picker.ball_at = Some((
            BALL_CURSOR,
            PickHit {
                point: Vec3::ZERO,
                on_ball: true,
            },
        ));
        rig.picker.hit = on_course(Vec3::new(2.0, 0.0, 0.0));
        rig
    }

    #[test]
    fn click_and_release_in_one_frame_fires_after_the_pull() {
        let mut rig = frame_rig();
        rig.frame(
            &[PointerButton::Down, PointerButton::Up],
            &[Vec2::ZERO],
            BALL_CURSOR,
        );

        assert_eq!(rig.ball.impulses.len(), 1);
        assert_eq!(rig.ball.impulses[0].0, Vec3::new(-4.0, 0.0, 0.0));
        assert!(!rig.session.active);
    }

    #[test]
    fn release_then_press_in_one_frame_keeps_the_aimed_shot() {
        let mut rig = frame_rig();
        rig.frame(&[PointerButton::Down], &[], BALL_CURSOR);
        assert!(rig.session.active);

        rig.frame(
            &[PointerButton::Up, PointerButton::Down],
            &[Vec2::ZERO],
            BALL_CURSOR,
        );

        assert_eq!(rig.ball.impulses.len(), 1);
        assert_eq!(rig.ball.impulses[0].0, Vec3::new(-4.0, 0.0, 0.0));
        assert_eq!(rig.shots.shot_count, 1);
        // The second press opened a fresh drag.
        assert!(rig.session.active);
        assert_eq!(rig.session.power, 0.0);
    }

    #[test]
    fn moves_without_buttons_update_the_open_drag() {
        let mut rig = frame_rig();
        rig.frame(&[PointerButton::Down], &[], BALL_CURSOR);
        rig.frame(&[], &[Vec2::ZERO], BALL_CURSOR);
        assert_eq!(rig.session.power, 4.0);
        assert!(rig.ball.impulses.is_empty());
    }
}
