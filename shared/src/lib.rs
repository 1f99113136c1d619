pub mod catalog;
pub mod constants;
pub mod ground;
pub mod interaction;
pub mod keys;
pub mod layout;
pub mod movement;
pub mod physics;
pub mod rapier;

pub use catalog::{CATALOG, ContentItem, find_content};
pub use constants::{
    EYE_HEIGHT, FOOT_SENSOR_HALF_EXTENTS, FOOT_SENSOR_OFFSET_Y, GRAVITY_MPS2, JUMP_SPEED,
    MOVE_SPEED, PICK_DISTANCE, PLAYER_CAPSULE_HALF_HEIGHT, PLAYER_CAPSULE_RADIUS, PLAYER_SPAWN,
};
pub use ground::GroundSensor;
pub use interaction::{ClickOutcome, InteractionState, UiMode};
pub use keys::{KeyState, MoveKey};
pub use layout::{
    FRAME_HALF_EXTENTS, GalleryPiece, PLAQUE_HALF_EXTENTS, PLAQUE_OFFSET, PieceKind,
    SPOTLIGHT_OFFSET, gallery_pieces, gallery_statics,
};
pub use movement::{
    MovementController, PlayerBody, Quat, StepMovementResult, Vec3, camera_relative,
    desired_planar_velocity, eye_position,
};
pub use physics::{GalleryPhysics, RapierPlayerBody};
pub use rapier::{ColliderShapeDef, WorldStaticDef, collider_from_def};
