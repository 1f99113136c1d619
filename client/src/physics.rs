use bevy::{
    color::palettes::css::{LIME, ORANGE_RED},
    prelude::*,
};
use gallery_shared::{
    FOOT_SENSOR_HALF_EXTENTS, FOOT_SENSOR_OFFSET_Y, GalleryPhysics, PLAYER_CAPSULE_HALF_HEIGHT,
    PLAYER_CAPSULE_RADIUS, gallery_statics,
};

use crate::{convert::to_bevy_vec3, player::Controller, settings::GallerySettings};

/// The Rapier world, stepped on the fixed schedule.
#[derive(Resource, Deref, DerefMut)]
pub struct PhysicsWorld(pub GalleryPhysics);

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(PhysicsWorld(GalleryPhysics::build(gallery_statics())));
    app.add_systems(FixedUpdate, step_physics);
    app.add_systems(
        Update,
        draw_player_colliders.run_if(|settings: Res<GallerySettings>| settings.debug_physics),
    );
}

pub(crate) fn step_physics(
    time: Res<Time>,
    mut physics: ResMut<PhysicsWorld>,
    mut controller: ResMut<Controller>,
) {
    physics.step(time.delta_secs(), &mut controller.ground);
}

/// Capsule outline plus the foot sensor, green while grounded.
fn draw_player_colliders(
    mut gizmos: Gizmos,
    physics: Res<PhysicsWorld>,
    controller: Res<Controller>,
) {
    let Some(center) = physics.player_translation() else {
        return;
    };
    let center = to_bevy_vec3(&center);

    gizmos.primitive_3d(
        &Capsule3d::new(PLAYER_CAPSULE_RADIUS, 2.0 * PLAYER_CAPSULE_HALF_HEIGHT),
        Isometry3d::from_translation(center),
        Color::WHITE,
    );

    let color = if controller.ground.is_grounded() {
        LIME
    } else {
        ORANGE_RED
    };
    let [hx, hy, hz] = FOOT_SENSOR_HALF_EXTENTS;
    gizmos.cuboid(
        Transform::from_translation(center + Vec3::Y * FOOT_SENSOR_OFFSET_Y)
            .with_scale(Vec3::new(2.0 * hx, 2.0 * hy, 2.0 * hz)),
        color,
    );
}
