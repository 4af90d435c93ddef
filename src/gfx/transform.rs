//! # Transform Math
//!
//! Conversions between (position, Euler rotation, scale) triples and a single
//! affine matrix. Rotations are Euler angles in degrees applied X, then Y,
//! then Z; matrices are always composed scale, then rotate, then translate.

use cgmath::{Deg, InnerSpace, Matrix4, Rad, Vector3, Vector4};

/// Rotation matrix for an Euler vector in degrees.
pub fn rotation_matrix(rotation: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_angle_z(Deg(rotation.z))
        * Matrix4::from_angle_y(Deg(rotation.y))
        * Matrix4::from_angle_x(Deg(rotation.x))
}

/// Compose `T * R * S`.
pub fn compose(position: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * rotation_matrix(rotation)
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Euler rotation (degrees) of the rotation part of a matrix.
///
/// The columns are normalized first so scaled matrices are accepted.
/// At gimbal lock the Z angle is folded into X.
pub fn rotation_from_matrix(matrix: &Matrix4<f32>) -> Vector3<f32> {
    let c0 = matrix.x.truncate().normalize();
    let c1 = matrix.y.truncate().normalize();
    let c2 = matrix.z.truncate().normalize();

    // c{col}.{row}
    let sin_y = (-c0.z).clamp(-1.0, 1.0);
    let y = sin_y.asin();

    let (x, z) = if y.cos() > 1e-4 {
        (c1.z.atan2(c2.z), c0.y.atan2(c0.x))
    } else {
        ((-c2.y).atan2(c1.y), 0.0)
    };

    Vector3::new(
        Deg::from(Rad(x)).0,
        Deg::from(Rad(y)).0,
        Deg::from(Rad(z)).0,
    )
}

/// Split an affine matrix into position, rotation and scale.
///
/// Scale is assumed positive on every axis.
pub fn decompose(matrix: &Matrix4<f32>) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
    let position = matrix.w.truncate();
    let scale = Vector3::new(
        matrix.x.truncate().magnitude(),
        matrix.y.truncate().magnitude(),
        matrix.z.truncate().magnitude(),
    );
    (position, rotation_from_matrix(matrix), scale)
}

/// Transform a point (w = 1).
pub fn transform_point(matrix: &Matrix4<f32>, point: Vector3<f32>) -> Vector3<f32> {
    let p = matrix * Vector4::new(point.x, point.y, point.z, 1.0);
    if p.w.abs() > f32::EPSILON && (p.w - 1.0).abs() > f32::EPSILON {
        p.truncate() / p.w
    } else {
        p.truncate()
    }
}

/// Transform a direction (w = 0).
pub fn transform_vector(matrix: &Matrix4<f32>, vector: Vector3<f32>) -> Vector3<f32> {
    (matrix * vector.extend(0.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>, eps: f32) {
        assert!((a - b).magnitude() < eps, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_compose_order() {
        let m = compose(
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 90.0),
            Vector3::new(2.0, 1.0, 1.0),
        );
        // scale x by 2, rotate +X onto +Y, then translate
        let p = transform_point(&m, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_eq(p, Vector3::new(10.0, 2.0, 0.0), 1e-5);
    }

    #[test]
    fn test_decompose_round_trip() {
        let position = Vector3::new(-3.0, 7.5, 12.0);
        let rotation = Vector3::new(30.0, -45.0, 60.0);
        let scale = Vector3::new(0.5, 2.0, 3.0);

        let (p, r, s) = decompose(&compose(position, rotation, scale));
        assert_vec_eq(p, position, 1e-4);
        assert_vec_eq(r, rotation, 1e-2);
        assert_vec_eq(s, scale, 1e-4);
    }

    #[test]
    fn test_gimbal_lock_keeps_matrix() {
        let rotation = Vector3::new(20.0, 90.0, 35.0);
        let original = rotation_matrix(rotation);
        let recovered = rotation_matrix(rotation_from_matrix(&original));

        for col in 0..4 {
            for row in 0..4 {
                assert!((original[col][row] - recovered[col][row]).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = compose(
            Vector3::new(5.0, 5.0, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        assert_vec_eq(
            transform_vector(&m, Vector3::new(0.0, 1.0, 0.0)),
            Vector3::new(0.0, 1.0, 0.0),
            1e-6,
        );
    }
}
