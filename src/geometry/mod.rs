//! Geometry helpers shared by the hand model and the grab controller.
//!
//! Vectors, quaternions and matrices come straight from `glam`; this module
//! only adds what `glam` lacks: rigid-transform composition helpers and an
//! oriented bounding box with a separating-axis overlap test.

mod obb;
mod rigid;

pub use obb::OrientedBox;
pub use rigid::{
    basis_transform, rigid_transform, rotation_of, smoothed_transform,
};
