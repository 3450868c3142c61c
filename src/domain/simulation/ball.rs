use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, Velocity};

#[derive(Component)]
pub struct Ball;

/// Read/write access to the physics body of the ball.
///
/// The rigid body itself is owned by the physics backend; the shot
/// controller and the motion governor only ever go through this trait.
pub trait BallHandle {
    fn position(&self) -> Vec3;
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, vel: Vec3);
    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, vel: Vec3);
    fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3);
}

/// Ball handle backed by the Rapier components of the ball entity.
pub struct RigidBall<'a> {
    position: Vec3,
    velocity: Mut<'a, Velocity>,
    impulse: Mut<'a, ExternalImpulse>,
}

impl<'a> RigidBall<'a> {
    pub fn new(
        position: Vec3,
        velocity: Mut<'a, Velocity>,
        impulse: Mut<'a, ExternalImpulse>,
    ) -> Self {
        Self {
            position,
            velocity,
            impulse,
        }
    }
}

impl BallHandle for RigidBall<'_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn set_linear_velocity(&mut self, vel: Vec3) {
        self.velocity.linvel = vel;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.velocity.angvel
    }

    fn set_angular_velocity(&mut self, vel: Vec3) {
        self.velocity.angvel = vel;
    }

    fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3) {
        // Rapier clears the accumulated impulse after every step.
        self.impulse.impulse += impulse;
        self.impulse.torque_impulse += (world_point - self.position).cross(impulse);
    }
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct TestBall {
    pub position: Vec3,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub impulses: Vec<(Vec3, Vec3)>,
}

#[cfg(test)]
impl BallHandle for TestBall {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linvel
    }

    fn set_linear_velocity(&mut self, vel: Vec3) {
        self.linvel = vel;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angvel
    }

    fn set_angular_velocity(&mut self, vel: Vec3) {
        self.angvel = vel;
    }

    fn apply_impulse(&mut self, impulse: Vec3, world_point: Vec3) {
        self.impulses.push((impulse, world_point));
    }
}
