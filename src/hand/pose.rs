//! Static hand poses for controller-driven hand models.
//!
//! When the hand follows a rigid controller there are no tracked joints,
//! so the skeleton is posed from these tables instead: `Idle` while the
//! trigger is up, `Pinch` while it is held. Tables are generated from
//! canonical right-hand bone lengths and per-pose curl angles; left-hand
//! tables are the mirror image.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::joint::{HandJoint, Handedness, JointPose, JOINT_COUNT};

/// Named static pose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HandPose {
    /// Relaxed, slightly curled fingers.
    #[default]
    Idle,
    /// Thumb tip resting against the index tip.
    Pinch,
    /// Flat open hand (the rig's rest pose).
    Default,
}

/// Gap left between thumb and index tips in the pinch pose.
const PINCH_GAP: f32 = 0.008;

/// One finger chain in the right-hand model space (palm down, fingers
/// toward -Z, thumb toward -X).
struct FingerSpec {
    /// Joints from metacarpal to tip.
    joints: &'static [HandJoint],
    /// Metacarpal joint position.
    base: Vec3,
    /// Direction of the metacarpal bone.
    direction: Vec3,
    /// Bone lengths, metacarpal first; one fewer than `joints`.
    lengths: &'static [f32],
    /// Axis the finger curls around.
    bend_axis: Vec3,
}

const THUMB: FingerSpec = FingerSpec {
    joints: &[
        HandJoint::ThumbMetacarpal,
        HandJoint::ThumbPhalanxProximal,
        HandJoint::ThumbPhalanxDistal,
        HandJoint::ThumbTip,
    ],
    base: Vec3::new(-0.025, -0.015, -0.025),
    direction: Vec3::new(-0.8, 0.0, -0.6),
    lengths: &[0.04, 0.032, 0.025],
    bend_axis: Vec3::Y,
};

const FINGERS: [FingerSpec; 4] = [
    FingerSpec {
        joints: &[
            HandJoint::IndexFingerMetacarpal,
            HandJoint::IndexFingerPhalanxProximal,
            HandJoint::IndexFingerPhalanxIntermediate,
            HandJoint::IndexFingerPhalanxDistal,
            HandJoint::IndexFingerTip,
        ],
        base: Vec3::new(-0.02, 0.0, -0.012),
        direction: Vec3::NEG_Z,
        lengths: &[0.065, 0.04, 0.025, 0.022],
        bend_axis: Vec3::X,
    },
    FingerSpec {
        joints: &[
            HandJoint::MiddleFingerMetacarpal,
            HandJoint::MiddleFingerPhalanxProximal,
            HandJoint::MiddleFingerPhalanxIntermediate,
            HandJoint::MiddleFingerPhalanxDistal,
            HandJoint::MiddleFingerTip,
        ],
        base: Vec3::new(-0.002, 0.0, -0.01),
        direction: Vec3::NEG_Z,
        lengths: &[0.064, 0.045, 0.028, 0.023],
        bend_axis: Vec3::X,
    },
    FingerSpec {
        joints: &[
            HandJoint::RingFingerMetacarpal,
            HandJoint::RingFingerPhalanxProximal,
            HandJoint::RingFingerPhalanxIntermediate,
            HandJoint::RingFingerPhalanxDistal,
            HandJoint::RingFingerTip,
        ],
        base: Vec3::new(0.016, -0.002, -0.008),
        direction: Vec3::new(0.05, 0.0, -1.0),
        lengths: &[0.06, 0.042, 0.026, 0.023],
        bend_axis: Vec3::X,
    },
    FingerSpec {
        joints: &[
            HandJoint::PinkyFingerMetacarpal,
            HandJoint::PinkyFingerPhalanxProximal,
            HandJoint::PinkyFingerPhalanxIntermediate,
            HandJoint::PinkyFingerPhalanxDistal,
            HandJoint::PinkyFingerTip,
        ],
        base: Vec3::new(0.032, -0.004, -0.006),
        direction: Vec3::new(0.12, 0.0, -1.0),
        lengths: &[0.055, 0.033, 0.019, 0.021],
        bend_axis: Vec3::X,
    },
];

/// Curl angles in radians, one per bend after the metacarpal.
struct Curls {
    index: [f32; 3],
    others: [f32; 3],
    thumb: [f32; 2],
}

impl HandPose {
    fn curls(self) -> Curls {
        match self {
            Self::Default => Curls {
                index: [0.0; 3],
                others: [0.0; 3],
                thumb: [0.0; 2],
            },
            Self::Idle => Curls {
                index: [0.35, 0.35, 0.25],
                others: [0.35, 0.35, 0.25],
                thumb: [0.15, 0.15],
            },
            Self::Pinch => Curls {
                index: [0.6, 0.5, 0.3],
                others: [0.5, 0.5, 0.35],
                thumb: [0.0; 2],
            },
        }
    }

    /// Joint poses for every joint of the given hand, in model space.
    #[must_use]
    pub fn table(self, handedness: Handedness) -> [JointPose; JOINT_COUNT] {
        let curls = self.curls();
        let mut table = [JointPose::default(); JOINT_COUNT];

        for (i, finger) in FINGERS.iter().enumerate() {
            let bends = if i == 0 { curls.index } else { curls.others };
            write_chain(&mut table, finger, &bends);
        }

        if self == Self::Pinch {
            let index_tip = table[HandJoint::IndexFingerTip.index()].position;
            write_reaching_thumb(&mut table, index_tip);
        } else {
            write_chain(&mut table, &THUMB, &curls.thumb);
        }

        if handedness == Handedness::Left {
            table = table.map(JointPose::mirrored_x);
        }
        table
    }
}

/// Walk a finger from its base, bending by the cumulative curl at each
/// joint after the metacarpal.
fn write_chain(
    table: &mut [JointPose; JOINT_COUNT],
    finger: &FingerSpec,
    bends: &[f32],
) {
    let direction = finger.direction.normalize();
    let rest = Quat::from_rotation_arc(Vec3::NEG_Z, direction);
    let mut position = finger.base;
    let mut curl = 0.0;

    table[finger.joints[0].index()] = JointPose {
        position,
        orientation: rest,
    };
    for (k, (joint, length)) in
        finger.joints[1..].iter().zip(finger.lengths).enumerate()
    {
        if k > 0 {
            curl += bends.get(k - 1).copied().unwrap_or(0.0);
        }
        let bend = Quat::from_axis_angle(finger.bend_axis, -curl);
        position += bend * direction * *length;
        let next_bend = curl + bends.get(k).copied().unwrap_or(0.0);
        table[joint.index()] = JointPose {
            position,
            orientation: Quat::from_axis_angle(finger.bend_axis, -next_bend)
                * rest,
        };
    }
}

/// Lay the thumb out in a straight line from its base to just short of
/// `index_tip`.
fn write_reaching_thumb(table: &mut [JointPose; JOINT_COUNT], index_tip: Vec3) {
    let base = THUMB.base;
    let target = index_tip + (base - index_tip).normalize() * PINCH_GAP;
    let reach = target - base;
    let orientation =
        Quat::from_rotation_arc(Vec3::NEG_Z, reach.normalize());
    let total: f32 = THUMB.lengths.iter().sum();

    table[THUMB.joints[0].index()] = JointPose {
        position: base,
        orientation,
    };
    let mut travelled = 0.0;
    for (joint, length) in THUMB.joints[1..].iter().zip(THUMB.lengths) {
        travelled += length;
        table[joint.index()] = JointPose {
            position: base + reach * (travelled / total),
            orientation,
        };
    }
}
