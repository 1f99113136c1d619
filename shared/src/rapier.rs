use rapier3d::{na::UnitQuaternion, prelude::*};

/// Canonical definition of an immutable gallery collider.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
    /// Surface friction coefficient.
    pub friction: f32,
    /// Catalog id of the content shown on this collider, for picture frames.
    pub content_id: Option<u32>,
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },
}

/// Collider `user_data` value carried by picture frames.
///
/// # Bit layout
/// - bits 0..=31  : catalog content id (u32)
/// - bits 32..=39 : kind tag, [`FRAME_TAG_KIND`] for frames
/// - bits 40..=127: reserved (zero)
///
/// Untagged colliders keep the default `user_data` of zero.
pub type ColliderTag = u128;

/// Kind tag marking a collider as a picture frame.
pub const FRAME_TAG_KIND: u8 = 1;

/// Packs a catalog content id into a frame [`ColliderTag`].
pub fn pack_frame_tag(content_id: u32) -> ColliderTag {
    (content_id as u128) | ((FRAME_TAG_KIND as u128) << u32::BITS)
}

/// Extracts the content id from a [`ColliderTag`].
///
/// Returns `None` for colliders that are not frames (including untagged ones).
pub fn unpack_frame_tag(tag: ColliderTag) -> Option<u32> {
    let kind = (tag >> u32::BITS) as u8;
    let reserved = tag >> (u32::BITS + u8::BITS);
    if kind != FRAME_TAG_KIND || reserved != 0 {
        return None;
    }
    Some(tag as u32)
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// This uses the pose stored on the rigid-body as the collider parent transform.
/// So the collider is created with identity local transform.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius),
    };

    let builder = builder.friction(def.friction);
    match def.content_id {
        Some(id) => builder.user_data(pack_frame_tag(id)).build(),
        None => builder.build(),
    }
}
