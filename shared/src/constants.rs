/// Planar walking speed in meters per second.
///
/// Applies to the normalized input direction, so diagonals are not faster.
pub const MOVE_SPEED: f32 = 5.0;

/// Vertical launch speed set directly on the body when a jump fires (meters per second).
///
/// Jumps overwrite `linvel.y` instead of applying an impulse, so the apex height does not
/// depend on the body mass or on any residual vertical velocity.
pub const JUMP_SPEED: f32 = 6.0;

/// Height of the camera above the player body's center (meters).
pub const EYE_HEIGHT: f32 = 1.5;

/// Gravity along -Y in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.8;

/// Player capsule radius (meters).
pub const PLAYER_CAPSULE_RADIUS: f32 = 0.5;

/// Player capsule half height of the cylindrical segment (meters).
///
/// The full capsule spans `2 * (half_height + radius)` = 2 m, so the feet sit 1 m below the
/// body center.
pub const PLAYER_CAPSULE_HALF_HEIGHT: f32 = 0.5;

/// Friction coefficient of the player capsule.
pub const PLAYER_FRICTION: f32 = 1.0;

/// Where the player body is spawned: in mid air above the entrance, it falls onto the floor.
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 5.0, 0.0];

/// Half extents of the foot sensor cuboid (meters).
pub const FOOT_SENSOR_HALF_EXTENTS: [f32; 3] = [0.2, 0.1, 0.2];

/// Offset of the foot sensor center below the body center (meters).
///
/// Slightly deeper than the capsule's bottom (-1.0) so the sensor overlaps the floor while the
/// capsule rests on it.
pub const FOOT_SENSOR_OFFSET_Y: f32 = -1.05;

/// Maximum distance at which a frame can be aimed at and clicked (meters).
pub const PICK_DISTANCE: f32 = 12.0;

/// Friction used for walkable static surfaces.
pub const FLOOR_FRICTION: f32 = 2.0;
