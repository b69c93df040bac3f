//! Fixed-size joint storage for one hand.

use serde::{Deserialize, Serialize};

use super::joint::{HandJoint, JointPose, JOINT_COUNT};
use crate::error::GrabError;

/// A named bone as delivered by a rigged hand asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigBone {
    /// Bone name, expected to be a WebXR joint name.
    pub name: String,
    /// Rest pose of the bone in model space.
    pub pose: JointPose,
}

/// Joint poses indexed by [`HandJoint`].
///
/// Name lookup happens once in [`Skeleton::from_rig`]; every per-frame
/// access afterwards is an array index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skeleton {
    joints: [Option<JointPose>; JOINT_COUNT],
}

impl Skeleton {
    /// Skeleton with every joint present.
    #[must_use]
    pub fn from_poses(poses: [JointPose; JOINT_COUNT]) -> Self {
        Self {
            joints: poses.map(Some),
        }
    }

    /// Build from a rig's named bones.
    ///
    /// Bones with unknown names are ignored. Joints with no matching bone
    /// stay absent and are reported once here, not on every frame.
    #[must_use]
    pub fn from_rig(bones: &[RigBone]) -> Self {
        let mut skeleton = Self::default();
        for bone in bones {
            match HandJoint::from_name(&bone.name) {
                Some(joint) => skeleton.set(joint, bone.pose),
                None => log::debug!("ignoring rig bone '{}'", bone.name),
            }
        }
        for joint in HandJoint::ALL {
            if skeleton.joints[joint.index()].is_none() {
                log::warn!("couldn't find '{}' in hand rig", joint.as_str());
            }
        }
        skeleton
    }

    /// Pose of `joint`, or [`GrabError::MissingJoint`].
    pub fn get(&self, joint: HandJoint) -> Result<JointPose, GrabError> {
        self.joints[joint.index()].ok_or(GrabError::MissingJoint(joint))
    }

    /// Whether `joint` has a pose.
    #[must_use]
    pub fn has(&self, joint: HandJoint) -> bool {
        self.joints[joint.index()].is_some()
    }

    /// Overwrite one joint.
    pub fn set(&mut self, joint: HandJoint, pose: JointPose) {
        self.joints[joint.index()] = Some(pose);
    }

    /// Overwrite every joint present in the skeleton from a full table.
    ///
    /// Joints the rig never had stay absent.
    pub fn apply_table(&mut self, table: &[JointPose; JOINT_COUNT]) {
        for (slot, pose) in self.joints.iter_mut().zip(table) {
            if slot.is_some() {
                *slot = Some(*pose);
            }
        }
    }

    /// Number of joints present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }

    /// Whether no joint is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
