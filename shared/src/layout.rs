//! Physical layout of the gallery.
//!
//! A single straight hall running along -Z: a lawn slab under everything, a wooden floor,
//! low kerbs and tall walls on both sides, a ceiling, a bench halfway down and a plinth at the
//! far end. Every catalog item gets a frame collider at its hanging position.

use nalgebra as na;
use rapier3d::prelude::*;

use crate::{
    catalog::CATALOG,
    constants::FLOOR_FRICTION,
    rapier::{ColliderShapeDef, WorldStaticDef},
};

/// Half extents of a picture frame (meters). Frames are 3.2 x 2.4 with 0.2 depth.
pub const FRAME_HALF_EXTENTS: [f32; 3] = [1.6, 1.2, 0.1];

/// Centre of the title plaque in frame space, just below the frame. Render only, no collider.
pub const PLAQUE_OFFSET: [f32; 3] = [0.0, -1.5, 0.0];

/// Half extents of the title plaque board (meters).
pub const PLAQUE_HALF_EXTENTS: [f32; 3] = [0.8, 0.22, 0.03];

/// Position of each frame's spotlight in frame space, above and in front of the picture.
pub const SPOTLIGHT_OFFSET: [f32; 3] = [0.0, 3.0, 2.0];

/// Id offset for frame colliders so they never collide with the fixed scenery ids.
const FRAME_ID_BASE: u32 = 100;

/// What a piece of the layout represents, used by renderers to pick a look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Lawn,
    Floor,
    Kerb,
    Wall,
    Ceiling,
    BenchSeat,
    BenchLeg,
    Plinth,
    /// Picture frame showing the catalog item with this id.
    Frame(u32),
}

#[derive(Clone, Debug)]
pub struct GalleryPiece {
    pub kind: PieceKind,
    pub def: WorldStaticDef,
}

/// Every static piece of the gallery.
pub fn gallery_pieces() -> Vec<GalleryPiece> {
    let mut pieces = vec![
        cuboid(1, PieceKind::Lawn, [0.0, -1.0, 0.0], [50.0, 1.0, 65.0], FLOOR_FRICTION),
        cuboid(2, PieceKind::Floor, [0.0, 0.0, -20.0], [10.0, 0.1, 40.0], FLOOR_FRICTION),
        cuboid(3, PieceKind::Kerb, [-5.4, 0.25, -20.0], [0.1, 0.25, 40.0], 0.5),
        cuboid(4, PieceKind::Kerb, [5.4, 0.25, -20.0], [0.1, 0.25, 40.0], 0.5),
        cuboid(5, PieceKind::Wall, [-5.6, 5.0, -20.0], [0.25, 5.0, 40.0], 0.5),
        cuboid(6, PieceKind::Wall, [5.6, 5.0, -20.0], [0.25, 5.0, 40.0], 0.5),
        cuboid(7, PieceKind::Ceiling, [0.0, 10.0, -20.0], [10.0, 0.5, 40.0], 0.5),
        cuboid(8, PieceKind::BenchSeat, [0.0, 0.4, -10.0], [1.25, 0.05, 0.5], 0.5),
        cuboid(13, PieceKind::Plinth, [0.0, 0.7, -45.0], [1.0, 0.5, 1.0], 0.5),
    ];

    let legs = [(-1.0, 0.3), (1.0, 0.3), (-1.0, -0.3), (1.0, -0.3)];
    pieces.extend(legs.iter().zip(9u32..).map(|(&(x, dz), id)| GalleryPiece {
        kind: PieceKind::BenchLeg,
        def: WorldStaticDef {
            id,
            translation: vector![x, 0.2, -10.0 + dz],
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::CylinderY {
                radius: 0.05,
                half_height: 0.2,
            },
            friction: 0.5,
            content_id: None,
        },
    }));

    let [hx, hy, hz] = FRAME_HALF_EXTENTS;
    pieces.extend(CATALOG.iter().map(|item| GalleryPiece {
        kind: PieceKind::Frame(item.id),
        def: WorldStaticDef {
            id: FRAME_ID_BASE + item.id,
            translation: item.translation(),
            rotation: item.rotation(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: vector![hx, hy, hz],
            },
            friction: 0.5,
            content_id: Some(item.id),
        },
    }));

    pieces
}

/// Collider definitions of every static piece, ready for the physics world.
pub fn gallery_statics() -> Vec<WorldStaticDef> {
    gallery_pieces().into_iter().map(|piece| piece.def).collect()
}

fn cuboid(
    id: u32,
    kind: PieceKind,
    translation: [f32; 3],
    half_extents: [f32; 3],
    friction: f32,
) -> GalleryPiece {
    GalleryPiece {
        kind,
        def: WorldStaticDef {
            id,
            translation: na::Vector3::from(translation),
            rotation: na::UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: na::Vector3::from(half_extents),
            },
            friction,
            content_id: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_ids_are_unique() {
        let mut ids: Vec<u32> = gallery_statics().iter().map(|d| d.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn one_frame_per_catalog_item() {
        let pieces = gallery_pieces();
        for item in &CATALOG {
            let frames: Vec<_> = pieces
                .iter()
                .filter(|p| p.kind == PieceKind::Frame(item.id))
                .collect();
            assert_eq!(frames.len(), 1, "{}", item.title);
            assert_eq!(frames[0].def.content_id, Some(item.id));
        }
        let tagged = pieces.iter().filter(|p| p.def.content_id.is_some()).count();
        assert_eq!(tagged, CATALOG.len());
    }

    #[test]
    fn plaques_hang_under_their_frames() {
        for item in &CATALOG {
            let plaque = item.frame_to_world(na::Vector3::from(PLAQUE_OFFSET));
            let frame_bottom = item.translation[1] - FRAME_HALF_EXTENTS[1];
            assert!(plaque.y + PLAQUE_HALF_EXTENTS[1] < frame_bottom, "{}", item.title);
            assert!(plaque.y - PLAQUE_HALF_EXTENTS[1] > 0.5, "{} hidden by the kerb", item.title);
            assert!((plaque.x - item.translation[0]).abs() < 1e-5);
            assert!((plaque.z - item.translation[2]).abs() < 1e-5);
        }
    }

    #[test]
    fn spotlights_shine_from_the_hall_side() {
        for item in &CATALOG {
            let light = item.frame_to_world(na::Vector3::from(SPOTLIGHT_OFFSET));
            // Two meters out from the wall, toward the hall centre, three meters up.
            assert!((light.x.abs() - (item.translation[0].abs() - 2.0)).abs() < 1e-4);
            assert!((light.y - (item.translation[1] + 3.0)).abs() < 1e-5);
            assert!((light.z - item.translation[2]).abs() < 1e-4);
        }
    }

    #[test]
    fn floor_is_twenty_by_eighty() {
        let pieces = gallery_pieces();
        let floor = pieces
            .iter()
            .find(|p| p.kind == PieceKind::Floor)
            .map(|p| &p.def);
        let Some(WorldStaticDef {
            translation,
            shape: ColliderShapeDef::Cuboid { half_extents },
            ..
        }) = floor
        else {
            panic!("no floor slab");
        };
        assert_eq!(2.0 * half_extents.x, 20.0);
        assert_eq!(2.0 * half_extents.z, 80.0);
        assert_eq!(translation.z, -20.0);
    }

    #[test]
    fn frames_hang_between_the_walls() {
        for piece in gallery_pieces() {
            if let PieceKind::Frame(_) = piece.kind {
                let x = piece.def.translation.x.abs();
                assert!(x > 5.0 && x < 5.35, "frame at x = {x}");
            }
        }
    }
}
