use nalgebra as na;

use crate::{
    constants::{EYE_HEIGHT, JUMP_SPEED, MOVE_SPEED},
    ground::GroundSensor,
    interaction::InteractionState,
    keys::KeyState,
};

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Exclusive handle to the player's dynamic rigid body.
///
/// The physics engine integrates the body; the controller only reads its state and commands a
/// linear velocity once per frame.
pub trait PlayerBody {
    fn linvel(&self) -> Vec3;
    fn set_linvel(&mut self, linvel: Vec3);
    fn translation(&self) -> Vec3;
}

/// Output of a single [`MovementController::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepMovementResult {
    /// Linear velocity submitted to the body this frame.
    pub linvel: Vec3,
    /// Where the camera should be placed, `None` while movement is frozen.
    pub eye: Option<Vec3>,
    /// Whether a jump fired this frame.
    pub jumped: bool,
}

/// First-person movement controller for one player body.
///
/// Holds the player's held-key record and grounded flag. Input handlers write `keys`, the
/// physics step routes foot sensor events into `ground`, and [`MovementController::step`]
/// consumes both once per simulated frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementController {
    pub keys: KeyState,
    pub ground: GroundSensor,
}

impl MovementController {
    /// Perform one frame of movement.
    ///
    /// Behavior
    /// - No body yet: nothing happens and `None` is returned.
    /// - Content open: the body is stopped dead on all three axes; jumping and the camera are
    ///   left alone.
    /// - Otherwise the camera-relative planar velocity from [`desired_planar_velocity`] is
    ///   combined with either the jump launch speed (jump held and grounded, consuming the
    ///   grounded flag) or the body's current vertical velocity, and the eye position is
    ///   derived from the body.
    pub fn step<B: PlayerBody>(
        &mut self,
        body: Option<&mut B>,
        camera_rotation: &Quat,
        interaction: &InteractionState,
    ) -> Option<StepMovementResult> {
        let body = body?;

        if interaction.movement_frozen() {
            let linvel = Vec3::zeros();
            body.set_linvel(linvel);
            return Some(StepMovementResult {
                linvel,
                eye: None,
                jumped: false,
            });
        }

        let planar = camera_relative(desired_planar_velocity(&self.keys), camera_rotation);

        // Gravity is the engine's business: vertical velocity carries over unless we launch.
        let jumped = self.keys.jump && self.ground.take();
        let vy = if jumped {
            JUMP_SPEED
        } else {
            body.linvel().y
        };

        let linvel = Vec3::new(planar.x, vy, planar.z);
        body.set_linvel(linvel);

        let eye = eye_position(body.translation());

        Some(StepMovementResult {
            linvel,
            eye: Some(eye),
            jumped,
        })
    }
}

/// Camera-space planar velocity requested by the held keys.
///
/// Forward is -Z, backward +Z, left -X, right +X. Opposing keys cancel. The result is either
/// exactly zero or has length [`MOVE_SPEED`].
#[inline]
pub fn desired_planar_velocity(keys: &KeyState) -> Vec3 {
    let front = Vec3::new(0.0, 0.0, axis(keys.backward, keys.forward));
    let side = Vec3::new(axis(keys.left, keys.right), 0.0, 0.0);

    (front - side)
        .try_normalize(f32::EPSILON)
        .map_or_else(Vec3::zeros, |dir| dir * MOVE_SPEED)
}

/// Rotate a camera-space direction into world space.
///
/// The full camera orientation is applied, so looking up or down shortens the horizontal
/// component (pitch leaks into the walk direction). Only `x` and `z` of the result are used.
#[inline]
pub fn camera_relative(direction: Vec3, camera_rotation: &Quat) -> Vec3 {
    camera_rotation * direction
}

/// Camera position for a player body centred at `body_translation`.
#[inline]
pub fn eye_position(body_translation: Vec3) -> Vec3 {
    body_translation + Vec3::new(0.0, EYE_HEIGHT, 0.0)
}

#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}
