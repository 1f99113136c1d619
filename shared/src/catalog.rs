use nalgebra as na;
use std::f32::consts::FRAC_PI_2;

/// A piece of content hung on the gallery walls.
///
/// Items are static; the interaction state holds copies of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentItem {
    pub id: u32,
    pub title: &'static str,
    /// World-space center of the frame (meters).
    pub translation: [f32; 3],
    /// Rotation of the frame about +Y (radians). The picture faces local +Z.
    pub yaw: f32,
    pub body: &'static str,
    /// Asset path of the picture, relative to the asset root.
    pub image: &'static str,
}

impl ContentItem {
    #[inline]
    pub fn translation(&self) -> na::Vector3<f32> {
        na::Vector3::from(self.translation)
    }

    #[inline]
    pub fn rotation(&self) -> na::UnitQuaternion<f32> {
        na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), self.yaw)
    }

    /// Map a point from frame space (picture facing +Z) into world space.
    #[inline]
    pub fn frame_to_world(&self, local: na::Vector3<f32>) -> na::Vector3<f32> {
        self.translation() + self.rotation() * local
    }
}

/// Every frame in the gallery, in hanging order.
///
/// Left-wall pictures face +X (yaw = pi/2), right-wall pictures face -X.
pub const CATALOG: [ContentItem; 4] = [
    ContentItem {
        id: 1,
        title: "Flower Street",
        translation: [-5.2, 2.5, -5.0],
        yaw: FRAC_PI_2,
        body: "A street of flower stalls in the warm afternoon sun...",
        image: "paintings/flower.png",
    },
    ContentItem {
        id: 2,
        title: "The Empty Street",
        translation: [-5.2, 2.5, -15.0],
        yaw: FRAC_PI_2,
        body: "The quiet of an early afternoon...",
        image: "paintings/street.png",
    },
    ContentItem {
        id: 3,
        title: "Roadside Bus",
        translation: [5.2, 2.5, -5.0],
        yaw: -FRAC_PI_2,
        body: "Faded, vintage colours...",
        image: "paintings/bus.png",
    },
    ContentItem {
        id: 4,
        title: "The Old Saxophonist",
        translation: [5.2, 2.5, -15.0],
        yaw: -FRAC_PI_2,
        body: "The soul of jazz...",
        image: "paintings/saxophonist.png",
    },
];

/// Look up a catalog item by id.
pub fn find_content(id: u32) -> Option<&'static ContentItem> {
    CATALOG.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate id {}", a.id);
            }
        }
    }

    #[test]
    fn find_content_by_id() {
        assert_eq!(find_content(3).map(|c| c.title), Some("Roadside Bus"));
        assert!(find_content(0).is_none());
        assert!(find_content(99).is_none());
    }

    #[test]
    fn pictures_face_into_the_corridor() {
        // The picture normal (local +Z) must point toward the corridor center (x = 0).
        for item in &CATALOG {
            let normal = item.rotation() * na::Vector3::z();
            assert!(
                normal.x * item.translation[0] < 0.0,
                "{} faces the wall",
                item.title
            );
        }
    }
}
