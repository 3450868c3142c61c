use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::ball::Ball;
use super::governor::GoalTrigger;
use super::{AppState, ResetEvent, ShotState};

#[derive(Clone, Debug)]
pub struct WallDef {
    pub name: &'static str,
    pub size: Vec3,
    pub position: Vec3,
}

/// Static layout of the hole.
#[derive(Resource, Clone, Debug)]
pub struct Course {
    pub tee: Vec3,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub surface_center: Vec3,
    pub surface_size: Vec3,
    pub cup_center: Vec3,
    /// Side of the square opening cut into the surface.
    pub cup_width: f32,
    pub goal_position: Vec3,
    pub goal_thickness: f32,
    pub walls: Vec<WallDef>,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            tee: Vec3::new(0.0, 0.3, 5.0),
            ball_radius: 0.25,
            ball_mass: 0.1,
            surface_center: Vec3::new(0.0, -0.5, 15.0),
            surface_size: Vec3::new(10.0, 1.0, 40.0),
            cup_center: Vec3::new(0.0, -0.5, 20.0),
            cup_width: 2.5,
            goal_position: Vec3::new(0.0, -2.0, 20.0),
            goal_thickness: 0.2,
            walls: vec![
                WallDef {
                    name: "leftWall",
                    size: Vec3::new(1.0, 2.0, 40.0),
                    position: Vec3::new(-5.5, 1.0, 15.0),
                },
                WallDef {
                    name: "rightWall",
                    size: Vec3::new(1.0, 2.0, 40.0),
                    position: Vec3::new(5.5, 1.0, 15.0),
                },
                WallDef {
                    name: "backWall",
                    size: Vec3::new(10.0, 2.0, 1.0),
                    position: Vec3::new(0.0, 1.0, 30.0),
                },
                WallDef {
                    name: "frontWall",
                    size: Vec3::new(10.0, 2.0, 1.0),
                    position: Vec3::new(0.0, 1.0, 0.0),
                },
            ],
        }
    }
}

impl Course {
    /// Surface slabs (center, size) laid around the cup opening.
    pub fn surface_slabs(&self) -> Vec<(Vec3, Vec3)> {
        let min = self.surface_center - self.surface_size * 0.5;
        let max = self.surface_center + self.surface_size * 0.5;
        let half_cup = self.cup_width * 0.5;
        let cup_min_x = self.cup_center.x - half_cup;
        let cup_max_x = self.cup_center.x + half_cup;
        let cup_min_z = self.cup_center.z - half_cup;
        let cup_max_z = self.cup_center.z + half_cup;

        // (min_x, max_x, min_z, max_z)
        let rects = [
            (min.x, max.x, min.z, cup_min_z),
            (min.x, max.x, cup_max_z, max.z),
            (min.x, cup_min_x, cup_min_z, cup_max_z),
            (cup_max_x, max.x, cup_min_z, cup_max_z),
        ];

        rects
            .into_iter()
            .filter(|(x0, x1, z0, z1)| x1 > x0 && z1 > z0)
            .map(|(x0, x1, z0, z1)| {
                let center = Vec3::new((x0 + x1) * 0.5, self.surface_center.y, (z0 + z1) * 0.5);
                let size = Vec3::new(x1 - x0, self.surface_size.y, z1 - z0);
                (center, size)
            })
            .collect()
    }

    pub fn goal_trigger(&self) -> GoalTrigger {
        GoalTrigger::new(self.goal_position)
    }
}

pub(super) fn spawn_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    course: Res<Course>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 20.0, 8.0)
            .looking_at(Vec3::new(0.0, 0.0, 15.0), Vec3::Y),
        ..default()
    });

    let wall_mat = mats.add(Color::srgb(0.2, 0.2, 0.2));
    for wall in &course.walls {
        commands.spawn((
            Name::new(wall.name),
            PbrBundle {
                mesh: meshes.add(Cuboid::from_size(wall.size)),
                material: wall_mat.clone(),
                transform: Transform::from_translation(wall.position),
                ..default()
            },
            RigidBody::Fixed,
            Collider::cuboid(wall.size.x * 0.5, wall.size.y * 0.5, wall.size.z * 0.5),
            Restitution::coefficient(1.0),
        ));
    }

    let turf_mat = mats.add(Color::srgb(0.13, 0.55, 0.13));
    for (center, size) in course.surface_slabs() {
        commands.spawn((
            Name::new("surface"),
            PbrBundle {
                mesh: meshes.add(Cuboid::from_size(size)),
                material: turf_mat.clone(),
                transform: Transform::from_translation(center),
                ..default()
            },
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5, size.z * 0.5),
            Friction::coefficient(0.5),
            Restitution::coefficient(0.1),
        ));
    }

    let goal_size = Vec3::new(course.cup_width, course.goal_thickness, course.cup_width);
    commands.spawn((
        Name::new("goal"),
        PbrBundle {
            mesh: meshes.add(Cuboid::from_size(goal_size)),
            material: mats.add(StandardMaterial {
                base_color: Color::srgba(1.0, 0.0, 0.0, 0.3),
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            transform: Transform::from_translation(course.goal_position),
            ..default()
        },
        RigidBody::Fixed,
        Collider::cuboid(goal_size.x * 0.5, goal_size.y * 0.5, goal_size.z * 0.5),
    ));
    commands.insert_resource(course.goal_trigger());

    commands.spawn((
        Name::new("ball"),
        Ball,
        PbrBundle {
            mesh: meshes.add(Sphere::new(course.ball_radius)),
            material: mats.add(Color::srgb(0.95, 0.95, 0.95)),
            transform: Transform::from_translation(course.tee),
            ..default()
        },
        RigidBody::Dynamic,
        Collider::ball(course.ball_radius),
        ColliderMassProperties::Mass(course.ball_mass),
        Friction::coefficient(0.0),
        Restitution::coefficient(0.1),
        Damping {
            linear_damping: 0.3,
            angular_damping: 1.0,
        },
        Velocity::zero(),
        ExternalImpulse::default(),
        Ccd::enabled(),
    ));

    info!(
        "Course ready: {} walls, cup at {:?}",
        course.walls.len(),
        course.cup_center
    );
}

pub(super) fn handle_reset(
    mut ev_reset: EventReader<ResetEvent>,
    course: Res<Course>,
    mut balls: Query<(&mut Transform, &mut Velocity, &mut ExternalImpulse), With<Ball>>,
    mut shots: ResMut<ShotState>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if ev_reset.is_empty() {
        return;
    }
    ev_reset.clear();

    if let Ok((mut t, mut vel, mut impulse)) = balls.get_single_mut() {
        t.translation = course.tee;
        t.rotation = Quat::IDENTITY;
        *vel = Velocity::zero();
        *impulse = ExternalImpulse::default();
    } else {
        warn!("Reset requested before the ball was spawned");
    }

    *shots = ShotState::default();
    next_state.set(AppState::Playing);
    info!("Course reset");
}
