use glam::{Mat3, Mat4, Quat, Vec3};

/// Rigid transform with unit scale.
#[inline]
#[must_use]
pub fn rigid_transform(position: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(rotation, position)
}

/// Rotation-only transform whose columns are the given basis vectors.
#[inline]
#[must_use]
pub fn basis_transform(x: Vec3, y: Vec3, z: Vec3) -> Mat4 {
    Mat4::from_mat3(Mat3::from_cols(x, y, z))
}

/// Rotation part of a transform, ignoring scale and translation.
#[inline]
#[must_use]
pub fn rotation_of(transform: &Mat4) -> Quat {
    let (_, rotation, _) = transform.to_scale_rotation_translation();
    rotation.normalize()
}

/// Exponential-decay rotation filter.
///
/// Moves the rotation of `previous` toward that of `current` by `factor`
/// (0 keeps `previous`, 1 snaps to `current`) and places the result at
/// `position`.
#[must_use]
pub fn smoothed_transform(
    previous: &Mat4,
    current: &Mat4,
    position: Vec3,
    factor: f32,
) -> Mat4 {
    let from = rotation_of(previous);
    let to = rotation_of(current);
    let blended = from.slerp(to, factor.clamp(0.0, 1.0)).normalize();
    rigid_transform(position, blended)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rigid_transform_has_unit_scale() {
        let m = rigid_transform(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(1.0));
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        assert!((scale - Vec3::ONE).length() < 1e-6);
        assert!(rotation.angle_between(Quat::from_rotation_y(1.0)) < 1e-4);
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn basis_transform_maps_axes_to_columns() {
        let m = basis_transform(Vec3::Y, Vec3::Z, Vec3::X);
        assert!((m.transform_vector3(Vec3::X) - Vec3::Y).length() < 1e-6);
        assert!((m.transform_vector3(Vec3::Z) - Vec3::X).length() < 1e-6);
        assert_eq!(m.w_axis.truncate(), Vec3::ZERO);
    }

    #[test]
    fn smoothing_endpoints() {
        let prev = rigid_transform(Vec3::ZERO, Quat::IDENTITY);
        let cur = rigid_transform(Vec3::X, Quat::from_rotation_z(1.0));
        let pos = Vec3::new(0.0, 1.0, 0.0);

        let held = smoothed_transform(&prev, &cur, pos, 0.0);
        assert!(rotation_of(&held).angle_between(Quat::IDENTITY) < 1e-4);
        assert!((held.w_axis.truncate() - pos).length() < 1e-6);

        let snapped = smoothed_transform(&prev, &cur, pos, 1.0);
        assert!(
            rotation_of(&snapped).angle_between(Quat::from_rotation_z(1.0))
                < 1e-4
        );
    }

    #[test]
    fn smoothing_moves_a_tenth_of_the_angle() {
        let prev = Mat4::IDENTITY;
        let cur = rigid_transform(Vec3::ZERO, Quat::from_rotation_x(1.0));
        let out = smoothed_transform(&prev, &cur, Vec3::ZERO, 0.1);
        let angle = rotation_of(&out).angle_between(Quat::IDENTITY);
        assert!((angle - 0.1).abs() < 1e-3, "got {angle}");
    }
}
