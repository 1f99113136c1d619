//! Gallery scene: meshes for every static piece, lights, and frame picking.

use bevy::{asset::LoadState, prelude::*};
use gallery_shared::{
    ClickOutcome, ColliderShapeDef, FRAME_HALF_EXTENTS, PICK_DISTANCE, PLAQUE_HALF_EXTENTS,
    PLAQUE_OFFSET, PieceKind, SPOTLIGHT_OFFSET, UiMode, find_content, gallery_pieces,
};
use leafwing_input_manager::prelude::*;

use crate::{
    camera::PlayerCamera,
    convert::{to_bevy_quat, to_bevy_vec3, to_na_vec3},
    input::InputAction,
    physics::PhysicsWorld,
    ui_state::UiState,
};

const FRAME_COLOR: Color = Color::srgb(0.365, 0.251, 0.216);
const FRAME_HOVER_COLOR: Color = Color::srgb(0.553, 0.431, 0.388);
const LAMP_COLOR: Color = Color::srgb(1.0, 0.973, 0.882);
const SPOTLIGHT_COLOR: Color = Color::srgb(1.0, 0.933, 0.733);
const PLAQUE_COLOR: Color = Color::srgb(0.961, 0.961, 0.863);
/// Shown until the painting loads, and for good if it never does.
const PICTURE_PLACEHOLDER_COLOR: Color = Color::srgb(0.267, 0.267, 0.267);

/// Ceiling lamps, one every 10 m down the hall.
const LAMP_POSITIONS: [Vec3; 5] = [
    Vec3::new(0.0, 8.0, 0.0),
    Vec3::new(0.0, 8.0, -10.0),
    Vec3::new(0.0, 8.0, -20.0),
    Vec3::new(0.0, 8.0, -30.0),
    Vec3::new(0.0, 8.0, -40.0),
];

/// Picture inset inside the frame border (meters).
const PICTURE_MARGIN: f32 = 0.1;

#[derive(Component)]
pub struct Frame {
    pub content_id: u32,
}

/// Painting quad waiting for its image.
#[derive(Component)]
struct PendingPicture(Handle<Image>);

/// How a picture should look for a given image load state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PictureLook {
    Textured,
    Placeholder,
}

/// Content id of the frame under the crosshair.
#[derive(Resource, Default, Debug, PartialEq)]
pub struct AimedFrame(pub Option<u32>);

#[derive(Resource)]
struct FrameMaterials {
    normal: Handle<StandardMaterial>,
    hover: Handle<StandardMaterial>,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<AimedFrame>();
    app.add_systems(Startup, (setup_materials, spawn_gallery).chain());
    app.add_systems(
        Update,
        (
            track_aimed_frame,
            handle_interact,
            highlight_aimed_frame.run_if(resource_changed::<AimedFrame>),
        )
            .chain(),
    );
    app.add_systems(Update, resolve_pictures);
}

fn setup_materials(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    commands.insert_resource(FrameMaterials {
        normal: materials.add(StandardMaterial {
            base_color: FRAME_COLOR,
            perceptual_roughness: 0.6,
            ..default()
        }),
        hover: materials.add(StandardMaterial {
            base_color: FRAME_HOVER_COLOR,
            perceptual_roughness: 0.6,
            ..default()
        }),
    });
}

fn surface_material(kind: PieceKind) -> StandardMaterial {
    let (base_color, perceptual_roughness) = match kind {
        PieceKind::Lawn => (Color::srgb(0.40, 0.58, 0.33), 1.0),
        PieceKind::Floor => (Color::srgb(0.55, 0.43, 0.39), 0.5),
        PieceKind::Kerb => (Color::srgb(0.24, 0.15, 0.14), 0.7),
        PieceKind::Wall | PieceKind::Ceiling => (Color::srgb(0.941, 0.941, 0.878), 0.9),
        PieceKind::BenchSeat | PieceKind::BenchLeg => (Color::srgb(0.31, 0.20, 0.14), 0.6),
        PieceKind::Plinth => (Color::srgb(0.85, 0.85, 0.85), 0.2),
        PieceKind::Frame(_) => (FRAME_COLOR, 0.6),
    };
    StandardMaterial {
        base_color,
        perceptual_roughness,
        ..default()
    }
}

fn spawn_gallery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    frame_materials: Res<FrameMaterials>,
    asset_server: Res<AssetServer>,
) {
    let pieces = gallery_pieces();
    info!("Spawning gallery with {} pieces", pieces.len());

    for piece in pieces {
        let def = &piece.def;
        let mesh = match def.shape {
            ColliderShapeDef::Cuboid { half_extents } => meshes.add(Cuboid::new(
                2.0 * half_extents.x,
                2.0 * half_extents.y,
                2.0 * half_extents.z,
            )),
            ColliderShapeDef::CylinderY {
                radius,
                half_height,
            } => meshes.add(Cylinder::new(radius, 2.0 * half_height)),
        };
        let transform = Transform {
            translation: to_bevy_vec3(&def.translation),
            rotation: to_bevy_quat(&def.rotation),
            ..default()
        };

        let PieceKind::Frame(content_id) = piece.kind else {
            commands.spawn((
                Name::new(format!("{:?} {}", piece.kind, def.id)),
                Mesh3d(mesh),
                MeshMaterial3d(materials.add(surface_material(piece.kind))),
                transform,
            ));
            continue;
        };

        let Some(item) = find_content(content_id) else {
            warn!("Frame {} shows unknown content {content_id}", def.id);
            continue;
        };

        let [hx, hy, hz] = FRAME_HALF_EXTENTS;
        let picture = Rectangle::new(
            2.0 * (hx - PICTURE_MARGIN),
            2.0 * (hy - PICTURE_MARGIN),
        );
        let [px, py, pz] = PLAQUE_HALF_EXTENTS;
        let plaque = Cuboid::new(2.0 * px, 2.0 * py, 2.0 * pz);
        commands
            .spawn((
                Name::new(format!("Frame {}", item.title)),
                Frame { content_id },
                Mesh3d(mesh),
                MeshMaterial3d(frame_materials.normal.clone()),
                transform,
            ))
            .with_children(|parent| {
                // The picture faces the frame's local +Z, into the hall.
                parent.spawn((
                    Name::new("Picture"),
                    PendingPicture(asset_server.load(item.image)),
                    Mesh3d(meshes.add(picture)),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: PICTURE_PLACEHOLDER_COLOR,
                        perceptual_roughness: 0.8,
                        ..default()
                    })),
                    Transform::from_xyz(0.0, 0.0, hz + 0.005),
                ));

                // The title itself is drawn by the overlay on top of this board.
                parent.spawn((
                    Name::new("Plaque"),
                    Mesh3d(meshes.add(plaque)),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: PLAQUE_COLOR,
                        perceptual_roughness: 0.9,
                        ..default()
                    })),
                    Transform::from_translation(Vec3::from(PLAQUE_OFFSET)),
                ));

                parent.spawn((
                    Name::new("Frame spotlight"),
                    SpotLight {
                        color: SPOTLIGHT_COLOR,
                        intensity: 200_000.0,
                        range: 8.0,
                        outer_angle: 0.6,
                        inner_angle: 0.6 * 0.8,
                        shadows_enabled: true,
                        ..default()
                    },
                    Transform::from_translation(Vec3::from(SPOTLIGHT_OFFSET))
                        .looking_at(Vec3::ZERO, Vec3::Y),
                ));
            });
    }

    for (i, position) in LAMP_POSITIONS.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Lamp {i}")),
            PointLight {
                color: LAMP_COLOR,
                intensity: 400_000.0,
                range: 25.0,
                ..default()
            },
            Transform::from_translation(*position),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Cast the crosshair ray while exploring; nothing is aimed at otherwise.
fn track_aimed_frame(
    ui_state: Res<UiState>,
    physics: Res<PhysicsWorld>,
    camera: Single<&Transform, With<PlayerCamera>>,
    mut aimed: ResMut<AimedFrame>,
) {
    let target = match ui_state.mode() {
        UiMode::Exploring => physics.pick_frame(
            to_na_vec3(camera.translation),
            to_na_vec3(camera.forward().as_vec3()),
            PICK_DISTANCE,
        ),
        UiMode::Paused | UiMode::ContentOpen => None,
    };
    aimed.set_if_neq(AimedFrame(target));
}

/// Left click on the scene, resolved against the frame under the crosshair.
pub(crate) fn handle_interact(
    actions: Res<ActionState<InputAction>>,
    aimed: Res<AimedFrame>,
    mut ui_state: ResMut<UiState>,
) {
    if !actions.just_pressed(&InputAction::Interact) {
        return;
    }

    let aimed = aimed.0.and_then(find_content);
    match ui_state.interact(aimed) {
        ClickOutcome::EngagedLock => info!("Pointer lock engaged"),
        ClickOutcome::Opened(content_id) => info!("Opened content {content_id}"),
        ClickOutcome::Ignored => {}
    }
}

fn picture_look(state: &LoadState) -> Option<PictureLook> {
    if state.is_loaded() {
        Some(PictureLook::Textured)
    } else if state.is_failed() {
        Some(PictureLook::Placeholder)
    } else {
        None
    }
}

/// Swap the grey placeholder for the painting once it loads; keep it if loading fails.
fn resolve_pictures(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    pictures: Query<(Entity, &PendingPicture, &MeshMaterial3d<StandardMaterial>)>,
) {
    for (entity, pending, material) in &pictures {
        let Some(look) = picture_look(&asset_server.load_state(&pending.0)) else {
            continue;
        };

        match look {
            PictureLook::Textured => {
                if let Some(material) = materials.get_mut(&material.0) {
                    material.base_color = Color::WHITE;
                    material.base_color_texture = Some(pending.0.clone());
                }
            }
            PictureLook::Placeholder => {
                warn!("Painting {:?} failed to load; showing placeholder", pending.0.path());
            }
        }
        commands.entity(entity).remove::<PendingPicture>();
    }
}

fn highlight_aimed_frame(
    aimed: Res<AimedFrame>,
    frame_materials: Res<FrameMaterials>,
    mut frames: Query<(&Frame, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    for (frame, mut material) in &mut frames {
        let handle = if aimed.0 == Some(frame.content_id) {
            &frame_materials.hover
        } else {
            &frame_materials.normal
        };
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }
}
