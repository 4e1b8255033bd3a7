//! Math type aliases and transform helpers.
//!
//! Provides the f32 rendering types used throughout the crate and the three
//! transform flavors the conversion layer needs: points (translation
//! applies), directions (linear part only, non-uniform-scale aware), and
//! rotations (linear part with scale stripped).

pub use nalgebra;

use nalgebra::Point3;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Transform `p` as a point, applying the translation part of `m`.
pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    m.transform_point(&Point3::from(*p)).coords
}

/// Transform `v` as a direction, ignoring the translation part of `m`.
///
/// Uses the inverse-transpose of the linear 3x3 part so directions stay
/// perpendicular to surfaces under non-uniform scale. Falls back to the
/// plain linear part when the matrix is singular.
pub fn transform_direction(m: &Mat4, v: &Vec3) -> Vec3 {
    let linear = m.fixed_view::<3, 3>(0, 0).into_owned();
    match linear.try_inverse() {
        Some(inverse) => inverse.transpose() * v,
        None => linear * v,
    }
}

/// Rotate `v` by the rotational component of `m`.
///
/// Strips scale from each column of the linear part, so the result is
/// rotated but never scaled or translated. Assumes `m` has no shear.
pub fn rotate_direction(m: &Mat4, v: &Vec3) -> Vec3 {
    let mut linear = m.fixed_view::<3, 3>(0, 0).into_owned();
    for i in 0..3 {
        let norm = linear.column(i).norm();
        if norm > f32::EPSILON {
            let column = linear.column(i) / norm;
            linear.set_column(i, &column);
        }
    }
    linear * v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).norm() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_transform_point_applies_translation() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(&m, &Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_transform_direction_ignores_translation() {
        let m = Mat4::new_translation(&Vec3::new(5.0, -5.0, 5.0));
        let v = transform_direction(&m, &Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(v, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_transform_direction_non_uniform_scale() {
        // Scaling a surface by 2 along x bends its slanted normals toward y;
        // the inverse-transpose halves the x component instead of doubling it.
        let m = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 1.0));
        let v = transform_direction(&m, &Vec3::new(1.0, 1.0, 0.0));
        assert_close(v, Vec3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn test_rotate_direction_strips_scale() {
        let rotation =
            nalgebra::Rotation3::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let m = rotation.to_homogeneous() * Mat4::new_scaling(3.0);
        let v = rotate_direction(&m, &Vec3::new(1.0, 0.0, 0.0));
        assert_close(v, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_rotate_direction_ignores_translation() {
        let m = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0));
        let v = rotate_direction(&m, &Vec3::new(0.0, 0.0, 1.0));
        assert_close(v, Vec3::new(0.0, 0.0, 1.0));
    }
}
