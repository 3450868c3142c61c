mod domain;

use bevy::core_pipeline::bloom::BloomSettings;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use domain::simulation::Course;
use domain::{InputPlugin, OrbitCamera, SimPlugin, UiPlugin};

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.53, 0.72, 0.9)))
        .insert_resource(Msaa::Sample4)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "minigolf-rs".into(),
                resolution: (1280., 800.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins((SimPlugin, UiPlugin, InputPlugin))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    let rig = OrbitCamera::default();
    let target = Course::default().tee;
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            transform: Transform::from_translation(target + rig.offset())
                .looking_at(target, Vec3::Y),
            ..default()
        },
        BloomSettings::NATURAL,
        rig,
        MainCamera,
    ));
}

#[derive(Component)]
pub struct MainCamera;
