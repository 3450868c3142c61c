use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::aim::{CameraRig, OrbitLimits};
use crate::domain::simulation::{Ball, GolfSettings};

const BETA_EPSILON: f32 = 0.01;

/// Orbit rig around the ball: azimuth `alpha`, polar `beta`, distance `radius`.
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub limits: OrbitLimits,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: -FRAC_PI_2,
            beta: FRAC_PI_3,
            radius: 20.0,
            limits: OrbitLimits::free(&GolfSettings::default()),
        }
    }
}

impl OrbitCamera {
    pub fn clamp(&mut self) {
        let (lo, hi) = self.limits.beta.unwrap_or((BETA_EPSILON, PI - BETA_EPSILON));
        self.beta = self.beta.clamp(lo, hi);
        let (lo, hi) = self.limits.radius;
        self.radius = self.radius.clamp(lo, hi);
    }

    /// Camera position relative to the target.
    pub fn offset(&self) -> Vec3 {
        let (sin_b, cos_b) = self.beta.sin_cos();
        let (sin_a, cos_a) = self.alpha.sin_cos();
        self.radius * Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b)
    }
}

impl CameraRig for OrbitCamera {
    fn beta(&self) -> f32 {
        self.beta
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn set_orbit_limits(&mut self, limits: OrbitLimits) {
        self.limits = limits;
        self.clamp();
    }
}

pub(super) fn orbit_controls(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    settings: Res<GolfSettings>,
    mut rigs: Query<&mut OrbitCamera>,
) {
    let Ok(mut rig) = rigs.get_single_mut() else {
        return;
    };

    if buttons.pressed(MouseButton::Right) {
        for m in motion.read() {
            rig.alpha -= m.delta.x * settings.orbit_sensitivity;
            rig.beta -= m.delta.y * settings.orbit_sensitivity;
        }
    } else {
        motion.clear();
    }

    for ev in scroll_evr.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
        rig.radius -= lines * settings.zoom_step;
    }

    rig.clamp();
}

pub(super) fn follow_ball(
    balls: Query<&Transform, (With<Ball>, Without<OrbitCamera>)>,
    mut cams: Query<(&mut Transform, &OrbitCamera)>,
) {
    let Ok(ball) = balls.get_single() else {
        return;
    };
    let Ok((mut t, rig)) = cams.get_single_mut() else {
        return;
    };
    let target = ball.translation;
    *t = Transform::from_translation(target + rig.offset()).looking_at(target, Vec3::Y);
}
