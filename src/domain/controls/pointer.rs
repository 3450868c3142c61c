use std::f32::consts::FRAC_PI_2;

use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::aim::{
    AimContext, AimIndicator, AimSession, CameraRig, OrbitLimits, PickHit, PointerButton,
    ScenePicker, ShotFeedback,
};
use super::camera::OrbitCamera;
use crate::domain::simulation::{
    Ball, GolfSettings, PowerChanged, ResetEvent, RigidBall, ShotState, ShotTaken,
};
use crate::MainCamera;

const MAX_PICK_DISTANCE: f32 = 500.0;

/// Direction arrow shown while aiming.
#[derive(Component, Default)]
pub struct AimArrow {
    yaw: f32,
    length: f32,
}

/// Casts the cursor ray against the physics colliders.
pub struct RapierPicker<'a> {
    pub context: &'a RapierContext,
    pub camera: &'a Camera,
    pub camera_transform: &'a GlobalTransform,
    pub ball: Entity,
}

impl ScenePicker for RapierPicker<'_> {
    fn pick(&self, cursor: Vec2) -> Option<PickHit> {
        let ray = self.camera.viewport_to_world(self.camera_transform, cursor)?;
        let dir: Vec3 = *ray.direction;
        let (entity, toi) = self.context.cast_ray(
            ray.origin,
            dir,
            MAX_PICK_DISTANCE,
            true,
            QueryFilter::default(),
        )?;
        Some(PickHit {
            point: ray.origin + dir * toi,
            on_ball: entity == self.ball,
        })
    }
}

pub struct ArrowIndicator<'a> {
    arrow: Mut<'a, AimArrow>,
    transform: Mut<'a, Transform>,
    visibility: Mut<'a, Visibility>,
}

impl ArrowIndicator<'_> {
    // The arrow mesh runs along local +Y; lay it flat along +Z, then yaw.
    fn orient(&mut self) {
        self.transform.rotation =
            Quat::from_rotation_y(self.arrow.yaw) * Quat::from_rotation_x(FRAC_PI_2);
        self.transform.scale = Vec3::new(1.0, self.arrow.length, 1.0);
    }
}

impl AimIndicator for ArrowIndicator<'_> {
    fn set_visible(&mut self, visible: bool) {
        *self.visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    fn set_position(&mut self, pos: Vec3) {
        self.transform.translation = pos;
    }

    fn set_length_scale(&mut self, scale: f32) {
        self.arrow.length = scale;
        self.orient();
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.arrow.yaw = yaw;
        self.orient();
    }
}

pub struct HudEvents<'a, 'w, 'x> {
    power: &'a mut EventWriter<'w, PowerChanged>,
    shots: &'a mut EventWriter<'x, ShotTaken>,
}

impl ShotFeedback for HudEvents<'_, '_, '_> {
    fn power_changed(&mut self, power: f32) {
        self.power.send(PowerChanged(power));
    }

    fn shot_taken(&mut self, shot_count: u32) {
        self.shots.send(ShotTaken(shot_count));
    }
}

pub(super) fn spawn_aim_arrow(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("arrow"),
        AimArrow::default(),
        PbrBundle {
            mesh: meshes.add(Cone {
                radius: 0.1,
                height: 2.0,
            }),
            material: mats.add(Color::srgb(1.0, 0.85, 0.1)),
            transform: Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            visibility: Visibility::Hidden,
            ..default()
        },
    ));
}

/// Routes left-button pointer events through the aim controller.
#[allow(clippy::too_many_arguments)]
pub(super) fn aim_with_pointer(
    mut mousebtn_evr: EventReader<MouseButtonInput>,
    mut cursor_evr: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    q_cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut rigs: Query<&mut OrbitCamera>,
    rapier: Res<RapierContext>,
    mut balls: Query<(Entity, &Transform, &mut Velocity, &mut ExternalImpulse), With<Ball>>,
    mut arrows: Query<(&mut AimArrow, &mut Transform, &mut Visibility), Without<Ball>>,
    mut session: ResMut<AimSession>,
    mut shots: ResMut<ShotState>,
    settings: Res<GolfSettings>,
    mut ev_power: EventWriter<PowerChanged>,
    mut ev_shot: EventWriter<ShotTaken>,
) {
    let buttons: Vec<PointerButton> = mousebtn_evr
        .read()
        .filter(|ev| ev.button == MouseButton::Left)
        .map(|ev| match ev.state {
            ButtonState::Pressed => PointerButton::Down,
            ButtonState::Released => PointerButton::Up,
        })
        .collect();
    let moves: Vec<Vec2> = cursor_evr.read().map(|ev| ev.position).collect();
    if buttons.is_empty() && (moves.is_empty() || !session.active) {
        return;
    }

    let Ok(win) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = q_cam.get_single() else {
        return;
    };
    let Ok(mut rig) = rigs.get_single_mut() else {
        return;
    };
    let Ok((ball_entity, ball_transform, velocity, impulse)) = balls.get_single_mut() else {
        return;
    };
    let Ok((arrow, arrow_transform, visibility)) = arrows.get_single_mut() else {
        return;
    };

    let picker = RapierPicker {
        context: &rapier,
        camera,
        camera_transform,
        ball: ball_entity,
    };
    let mut ball = RigidBall::new(ball_transform.translation, velocity, impulse);
    let mut indicator = ArrowIndicator {
        arrow,
        transform: arrow_transform,
        visibility,
    };
    let mut feedback = HudEvents {
        power: &mut ev_power,
        shots: &mut ev_shot,
    };
    let mut cx = AimContext {
        settings: &settings,
        picker: &picker,
        ball: &mut ball,
        camera: &mut *rig,
        indicator: &mut indicator,
        feedback: &mut feedback,
        shots: &mut *shots,
    };

    cx.pointer_frame(&mut session, &buttons, &moves, win.cursor_position());
}

/// Drops any open drag when the course is reset.
pub(super) fn cancel_aim_on_reset(
    mut ev_reset: EventReader<ResetEvent>,
    mut session: ResMut<AimSession>,
    mut rigs: Query<&mut OrbitCamera>,
    mut arrows: Query<&mut Visibility, With<AimArrow>>,
    settings: Res<GolfSettings>,
    mut ev_power: EventWriter<PowerChanged>,
) {
    if ev_reset.is_empty() {
        return;
    }
    ev_reset.clear();

    if session.active {
        debug!("Reset dropped an open aim");
    }
    *session = AimSession::default();
    for mut rig in &mut rigs {
        rig.set_orbit_limits(OrbitLimits::free(&settings));
    }
    for mut vis in &mut arrows {
        *vis = Visibility::Hidden;
    }
    ev_power.send(PowerChanged(0.0));
}
