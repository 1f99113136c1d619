use bevy::{prelude::*, transform::TransformSystems};
use gallery_shared::{MovementController, PLAYER_SPAWN, eye_position};
use nalgebra as na;

use crate::{
    camera::PlayerCamera,
    convert::{to_bevy_vec3, to_na_quat},
    physics::{PhysicsWorld, step_physics},
    ui_state::UiState,
};

/// Key state and grounded flag of the local player.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct Controller(pub MovementController);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Controller>();
    app.add_systems(Startup, spawn_player);
    // The controller commands velocity, then the engine integrates it.
    app.add_systems(FixedUpdate, drive_player.before(step_physics));
    // Read the body after the last fixed step of the frame, so the eye never trails it.
    app.add_systems(
        PostUpdate,
        follow_eye.before(TransformSystems::Propagate),
    );
}

fn spawn_player(mut physics: ResMut<PhysicsWorld>) {
    physics.spawn_player(na::Vector3::from(PLAYER_SPAWN));
    info!("Player spawned at {:?}", PLAYER_SPAWN);
}

fn drive_player(
    mut controller: ResMut<Controller>,
    mut physics: ResMut<PhysicsWorld>,
    ui_state: Res<UiState>,
    camera: Single<&Transform, With<PlayerCamera>>,
) {
    let rotation = to_na_quat(camera.rotation);
    let Some(result) = controller.step(physics.player_body().as_mut(), &rotation, &ui_state)
    else {
        return;
    };

    if result.jumped {
        debug!("Jump");
    }
}

/// Place the camera at the eye. The camera stays put while content is open.
pub(crate) fn follow_eye(
    physics: Res<PhysicsWorld>,
    ui_state: Res<UiState>,
    mut camera: Single<&mut Transform, With<PlayerCamera>>,
) {
    if ui_state.movement_frozen() {
        return;
    }
    let Some(body) = physics.player_translation() else {
        return;
    };
    camera.translation = to_bevy_vec3(&eye_position(body));
}
