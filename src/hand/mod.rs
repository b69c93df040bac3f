//! Hand model: joints, skeleton, derived frame and static poses.
//!
//! A [`HandModel`] pairs a [`Skeleton`] in model space with a scene
//! placement and answers the per-frame questions the rest of the crate
//! asks: where is the hand, which way does it face, how far apart are the
//! thumb and index tips.

/// Hand-local coordinate frame from fingertip and knuckle landmarks.
pub mod frame;
/// Joint identifiers, handedness and per-joint poses.
pub mod joint;
/// Background rig loading.
pub mod loader;
/// Skeleton plus placement, the queryable hand.
pub mod model;
/// Static poses for controller-driven hands.
pub mod pose;
/// Fixed-size joint storage.
pub mod skeleton;

pub use frame::{HandFrame, Landmarks};
pub use joint::{
    HandJoint, Handedness, JointPose, TrackedJoint, TrackingMode, JOINT_COUNT,
};
pub use loader::{ProceduralRig, RigLoader, RigSource};
pub use model::{HandModel, LoadState};
pub use pose::HandPose;
pub use skeleton::{RigBone, Skeleton};
