//! Conversions between Bevy's glam types and the nalgebra types used by `gallery_shared`.

use bevy::prelude::*;
use nalgebra as na;

#[inline]
pub fn to_bevy_vec3(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na_vec3(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_bevy_quat(q: &na::UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline]
pub fn to_na_quat(q: Quat) -> na::UnitQuaternion<f32> {
    na::UnitQuaternion::from_quaternion(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_agree() {
        let bevy_q = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.3);
        let na_q = to_na_quat(bevy_q);
        let v = Vec3::new(0.0, 0.0, -1.0);

        let a = bevy_q * v;
        let b = to_bevy_vec3(&(na_q * to_na_vec3(v)));
        assert!((a - b).length() < 1e-5);
        assert!(to_bevy_quat(&na_q).angle_between(bevy_q) < 1e-4);
    }
}
