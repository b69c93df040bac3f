use glam::{Mat3, Mat4, Vec3};

/// Box collision volume with an arbitrary orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// World-space center.
    pub center: Vec3,
    /// Half-extent along each local axis.
    pub half_size: Vec3,
    /// Local axes as matrix columns. Must be orthonormal.
    pub rotation: Mat3,
}

impl OrientedBox {
    /// Box from its parts.
    #[must_use]
    pub fn new(center: Vec3, half_size: Vec3, rotation: Mat3) -> Self {
        Self {
            center,
            half_size,
            rotation,
        }
    }

    /// Cube of half-extent `half_extent` centered on `center`.
    #[must_use]
    pub fn cube(center: Vec3, half_extent: f32, rotation: Mat3) -> Self {
        Self::new(center, Vec3::splat(half_extent), rotation)
    }

    /// Box for an object placed by `world`.
    ///
    /// `local_center` and `local_half_size` describe the geometry's bounding
    /// box in the object's own space. The world scale is baked into the
    /// half-extents and stripped from the rotation.
    #[must_use]
    pub fn from_world(
        world: &Mat4,
        local_center: Vec3,
        local_half_size: Vec3,
    ) -> Self {
        let (scale, rotation, _) = world.to_scale_rotation_translation();
        Self {
            center: world.transform_point3(local_center),
            half_size: local_half_size * scale.abs(),
            rotation: Mat3::from_quat(rotation),
        }
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        let local = self.rotation.transpose() * (point - self.center);
        local.abs().cmple(self.half_size).all()
    }

    /// Whether every component is finite. A singular world matrix leaves
    /// NaN in the rotation.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.half_size.is_finite()
            && self.rotation.is_finite()
    }

    /// Separating-axis overlap test against another box.
    ///
    /// `epsilon` is added to every rotation term so near-parallel edges do
    /// not produce a spurious separating axis from their null cross product.
    /// Non-finite boxes never intersect anything.
    #[must_use]
    pub fn intersects(&self, other: &Self, epsilon: f32) -> bool {
        if !self.is_finite() || !other.is_finite() {
            return false;
        }
        let a_axes = [
            self.rotation.x_axis,
            self.rotation.y_axis,
            self.rotation.z_axis,
        ];
        let b_axes = [
            other.rotation.x_axis,
            other.rotation.y_axis,
            other.rotation.z_axis,
        ];
        let a = self.half_size.to_array();
        let b = other.half_size.to_array();

        // other's axes expressed in self's frame
        let mut r = [[0.0_f32; 3]; 3];
        let mut abs_r = [[0.0_f32; 3]; 3];
        for (i, a_axis) in a_axes.iter().enumerate() {
            for (j, b_axis) in b_axes.iter().enumerate() {
                r[i][j] = a_axis.dot(*b_axis);
                abs_r[i][j] = r[i][j].abs() + epsilon;
            }
        }

        let offset = other.center - self.center;
        let t = [
            offset.dot(a_axes[0]),
            offset.dot(a_axes[1]),
            offset.dot(a_axes[2]),
        ];

        // self's face normals
        for i in 0..3 {
            let ra = a[i];
            let rb = b[0] * abs_r[i][0] + b[1] * abs_r[i][1] + b[2] * abs_r[i][2];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        // other's face normals
        for j in 0..3 {
            let ra = a[0] * abs_r[0][j] + a[1] * abs_r[1][j] + a[2] * abs_r[2][j];
            let rb = b[j];
            let dist = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if dist.abs() > ra + rb {
                return false;
            }
        }

        // edge-edge cross products
        for i in 0..3 {
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            for j in 0..3 {
                let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                let ra = a[i1] * abs_r[i2][j] + a[i2] * abs_r[i1][j];
                let rb = b[j1] * abs_r[i][j2] + b[j2] * abs_r[i][j1];
                let dist = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if dist.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}
