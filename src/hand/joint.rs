//! Joint identifiers, handedness and per-joint poses.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Number of tracked joints per hand.
pub const JOINT_COUNT: usize = 25;

/// The 25 hand joints, in WebXR hand-input order.
///
/// Serialized names are the WebXR joint names (`"index-finger-tip"` etc.),
/// which is also what rigged hand assets name their bones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum HandJoint {
    Wrist,
    ThumbMetacarpal,
    ThumbPhalanxProximal,
    ThumbPhalanxDistal,
    ThumbTip,
    IndexFingerMetacarpal,
    IndexFingerPhalanxProximal,
    IndexFingerPhalanxIntermediate,
    IndexFingerPhalanxDistal,
    IndexFingerTip,
    MiddleFingerMetacarpal,
    MiddleFingerPhalanxProximal,
    MiddleFingerPhalanxIntermediate,
    MiddleFingerPhalanxDistal,
    MiddleFingerTip,
    RingFingerMetacarpal,
    RingFingerPhalanxProximal,
    RingFingerPhalanxIntermediate,
    RingFingerPhalanxDistal,
    RingFingerTip,
    PinkyFingerMetacarpal,
    PinkyFingerPhalanxProximal,
    PinkyFingerPhalanxIntermediate,
    PinkyFingerPhalanxDistal,
    PinkyFingerTip,
}

impl HandJoint {
    /// Every joint, indexed by [`HandJoint::index`].
    pub const ALL: [HandJoint; JOINT_COUNT] = [
        Self::Wrist,
        Self::ThumbMetacarpal,
        Self::ThumbPhalanxProximal,
        Self::ThumbPhalanxDistal,
        Self::ThumbTip,
        Self::IndexFingerMetacarpal,
        Self::IndexFingerPhalanxProximal,
        Self::IndexFingerPhalanxIntermediate,
        Self::IndexFingerPhalanxDistal,
        Self::IndexFingerTip,
        Self::MiddleFingerMetacarpal,
        Self::MiddleFingerPhalanxProximal,
        Self::MiddleFingerPhalanxIntermediate,
        Self::MiddleFingerPhalanxDistal,
        Self::MiddleFingerTip,
        Self::RingFingerMetacarpal,
        Self::RingFingerPhalanxProximal,
        Self::RingFingerPhalanxIntermediate,
        Self::RingFingerPhalanxDistal,
        Self::RingFingerTip,
        Self::PinkyFingerMetacarpal,
        Self::PinkyFingerPhalanxProximal,
        Self::PinkyFingerPhalanxIntermediate,
        Self::PinkyFingerPhalanxDistal,
        Self::PinkyFingerTip,
    ];

    /// Array index (0-24).
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// WebXR joint name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbMetacarpal => "thumb-metacarpal",
            Self::ThumbPhalanxProximal => "thumb-phalanx-proximal",
            Self::ThumbPhalanxDistal => "thumb-phalanx-distal",
            Self::ThumbTip => "thumb-tip",
            Self::IndexFingerMetacarpal => "index-finger-metacarpal",
            Self::IndexFingerPhalanxProximal => "index-finger-phalanx-proximal",
            Self::IndexFingerPhalanxIntermediate => {
                "index-finger-phalanx-intermediate"
            }
            Self::IndexFingerPhalanxDistal => "index-finger-phalanx-distal",
            Self::IndexFingerTip => "index-finger-tip",
            Self::MiddleFingerMetacarpal => "middle-finger-metacarpal",
            Self::MiddleFingerPhalanxProximal => {
                "middle-finger-phalanx-proximal"
            }
            Self::MiddleFingerPhalanxIntermediate => {
                "middle-finger-phalanx-intermediate"
            }
            Self::MiddleFingerPhalanxDistal => "middle-finger-phalanx-distal",
            Self::MiddleFingerTip => "middle-finger-tip",
            Self::RingFingerMetacarpal => "ring-finger-metacarpal",
            Self::RingFingerPhalanxProximal => "ring-finger-phalanx-proximal",
            Self::RingFingerPhalanxIntermediate => {
                "ring-finger-phalanx-intermediate"
            }
            Self::RingFingerPhalanxDistal => "ring-finger-phalanx-distal",
            Self::RingFingerTip => "ring-finger-tip",
            Self::PinkyFingerMetacarpal => "pinky-finger-metacarpal",
            Self::PinkyFingerPhalanxProximal => "pinky-finger-phalanx-proximal",
            Self::PinkyFingerPhalanxIntermediate => {
                "pinky-finger-phalanx-intermediate"
            }
            Self::PinkyFingerPhalanxDistal => "pinky-finger-phalanx-distal",
            Self::PinkyFingerTip => "pinky-finger-tip",
        }
    }

    /// Look up a joint by its WebXR name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|joint| joint.as_str() == name)
    }
}

/// Which hand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Left hand.
    Left,
    /// Right hand.
    Right,
}

impl Handedness {
    /// Both hands, left first.
    pub const BOTH: [Handedness; 2] = [Self::Left, Self::Right];

    /// Slot index for per-hand arrays.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Where a hand's pose comes from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingMode {
    /// Optical hand tracking: live joints, pinch detection, smoothing.
    #[default]
    HandTracking,
    /// Rigid controller: trigger presses select, static poses animate.
    Controller,
}

/// Position and orientation of one joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPose {
    /// Position in meters.
    pub position: Vec3,
    /// Orientation. Identity when omitted from serialized input.
    #[serde(default)]
    pub orientation: Quat,
}

impl JointPose {
    /// Pose at `position` with identity orientation.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Mirror across the YZ plane (right hand to left hand).
    #[must_use]
    pub fn mirrored_x(self) -> Self {
        let Self {
            position,
            orientation,
        } = self;
        Self {
            position: Vec3::new(-position.x, position.y, position.z),
            orientation: Quat::from_xyzw(
                orientation.x,
                -orientation.y,
                -orientation.z,
                orientation.w,
            ),
        }
    }
}

impl Default for JointPose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// One joint reported by a hand-tracking source for the current frame.
///
/// Sources only report joints they can currently see.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackedJoint {
    /// Which joint.
    pub joint: HandJoint,
    /// World-space pose.
    pub pose: JointPose,
}
