//! Hand-local coordinate frame derived from fingertip and knuckle landmarks.
//!
//! The primary axis runs from the index tip to the thumb tip (the grip
//! axis). Knuckle spread gives an approximate secondary axis, and two cross
//! products turn the pair into an exact right-handed orthonormal basis.

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::error::GrabError;
use crate::geometry::{basis_transform, rigid_transform};

/// The four landmarks a frame is derived from, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmarks {
    /// Index fingertip.
    pub index_tip: Vec3,
    /// Thumb tip.
    pub thumb_tip: Vec3,
    /// Index knuckle (index metacarpal joint).
    pub index_knuckle: Vec3,
    /// Pinky knuckle (pinky metacarpal joint).
    pub pinky_knuckle: Vec3,
}

/// Position and orthonormal basis of a hand for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFrame {
    /// Midpoint between index tip and thumb tip.
    pub position: Vec3,
    /// Basis x axis.
    pub x: Vec3,
    /// Basis y axis.
    pub y: Vec3,
    /// Basis z axis (index tip toward thumb tip).
    pub z: Vec3,
}

impl HandFrame {
    /// Derive the frame.
    ///
    /// # Errors
    ///
    /// [`GrabError::DegenerateFrame`] if the fingertips or the knuckles
    /// coincide, or the grip axis is parallel to the knuckle axis.
    pub fn from_landmarks(landmarks: &Landmarks) -> Result<Self, GrabError> {
        Ok(Self {
            position: grip_midpoint(landmarks.index_tip, landmarks.thumb_tip),
            ..Self::basis(landmarks)?
        })
    }

    /// Derive only the basis; `position` is left at the origin.
    ///
    /// # Errors
    ///
    /// Same as [`HandFrame::from_landmarks`].
    pub fn basis(landmarks: &Landmarks) -> Result<Self, GrabError> {
        let z = (landmarks.thumb_tip - landmarks.index_tip)
            .try_normalize()
            .ok_or(GrabError::DegenerateFrame)?;
        let y = (landmarks.index_knuckle - landmarks.pinky_knuckle)
            .try_normalize()
            .ok_or(GrabError::DegenerateFrame)?;
        let x = -z.cross(y).try_normalize().ok_or(GrabError::DegenerateFrame)?;
        // Re-orthogonalize y against x and z; the knuckle axis is only
        // roughly perpendicular to the grip axis.
        let y = -x.cross(z).normalize();
        Ok(Self {
            position: Vec3::ZERO,
            x,
            y,
            z,
        })
    }

    /// Basis as a 3x3 rotation matrix (columns x, y, z).
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_cols(self.x, self.y, self.z)
    }

    /// Rotation-only transform.
    #[must_use]
    pub fn rotation(&self) -> Mat4 {
        basis_transform(self.x, self.y, self.z)
    }

    /// Rotation as a quaternion.
    #[must_use]
    pub fn quaternion(&self) -> Quat {
        Quat::from_mat3(&self.rotation_matrix()).normalize()
    }

    /// Rigid transform: rotation from the basis, translation from the
    /// position, unit scale.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        rigid_transform(self.position, self.quaternion())
    }
}

/// Midpoint between the two fingertips.
#[inline]
#[must_use]
pub fn grip_midpoint(index_tip: Vec3, thumb_tip: Vec3) -> Vec3 {
    (index_tip + thumb_tip) * 0.5
}
