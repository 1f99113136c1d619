use std::f32::consts::FRAC_PI_2;

use bevy::{input::mouse::AccumulatedMouseMotion, prelude::*};
use gallery_shared::UiMode;

use crate::{settings::GallerySettings, ui_state::in_mode};

/// Gallery wall colour, also used for the sky and fog.
pub const BACKGROUND_COLOR: Color = Color::srgb(0.941, 0.941, 0.878);

/// Where the camera sits before the player body reports an eye position.
const CAMERA_START: Vec3 = Vec3::new(0.0, 2.0, 5.0);

/// Pitch stops just short of straight up/down so yaw stays well defined.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Component)]
pub struct PlayerCamera;

#[derive(Component, Default)]
struct LookAngles {
    yaw: f32,
    pitch: f32,
}

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(BACKGROUND_COLOR));
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, mouse_look.run_if(in_mode(UiMode::Exploring)));
}

fn add_camera(mut commands: Commands, settings: Res<GallerySettings>) {
    commands.spawn((
        PlayerCamera,
        LookAngles::default(),
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_START),
        DistanceFog {
            color: BACKGROUND_COLOR,
            falloff: FogFalloff::Linear {
                start: 10.0,
                end: 60.0,
            },
            ..default()
        },
    ));
}

fn mouse_look(
    motion: Res<AccumulatedMouseMotion>,
    settings: Res<GallerySettings>,
    camera: Single<(&mut Transform, &mut LookAngles), With<PlayerCamera>>,
) {
    let delta = motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    let (mut transform, mut look) = camera.into_inner();
    look.yaw -= delta.x * settings.sensitivity;
    look.pitch = (look.pitch - delta.y * settings.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    transform.rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
}
