use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::hand::{Handedness, JointPose, TrackedJoint, TrackingMode};

/// Platform-agnostic input events.
///
/// A platform layer (or a recording) translates whatever the XR runtime
/// delivers into these and hands them to
/// [`InteractionEngine::handle_event`](crate::engine::InteractionEngine::handle_event).
///
/// # Example
///
/// ```
/// use handgrab::hand::Handedness;
/// use handgrab::input::InputEvent;
///
/// let event: InputEvent = serde_json::from_str(
///     r#"{"type":"select-start","handedness":"left"}"#,
/// )
/// .unwrap();
/// assert_eq!(event.handedness(), Handedness::Left);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    /// An input source appeared or switched tracking mode.
    SourceConnected {
        /// Hand the source belongs to.
        handedness: Handedness,
        /// Controller or optical hand tracking.
        mode: TrackingMode,
    },
    /// An input source went away.
    SourceDisconnected {
        /// Hand the source belonged to.
        handedness: Handedness,
    },
    /// Tracked joints for this frame (hand-tracking sources).
    HandJoints {
        /// Hand the joints belong to.
        handedness: Handedness,
        /// Only the joints the runtime could see this frame.
        joints: Vec<TrackedJoint>,
    },
    /// Grip pose for this frame (controller sources).
    ControllerPose {
        /// Hand holding the controller.
        handedness: Handedness,
        /// World-space grip pose.
        pose: JointPose,
    },
    /// Platform select press (trigger down).
    SelectStart {
        /// Hand that pressed.
        handedness: Handedness,
    },
    /// Platform select release (trigger up).
    SelectEnd {
        /// Hand that released.
        handedness: Handedness,
    },
}

impl InputEvent {
    /// Hand the event concerns.
    #[must_use]
    pub fn handedness(&self) -> Handedness {
        match self {
            Self::SourceConnected { handedness, .. }
            | Self::SourceDisconnected { handedness }
            | Self::HandJoints { handedness, .. }
            | Self::ControllerPose { handedness, .. }
            | Self::SelectStart { handedness }
            | Self::SelectEnd { handedness } => *handedness,
        }
    }
}

/// Controller grip pose as a placement matrix.
#[must_use]
pub fn grip_placement(pose: &JointPose) -> Mat4 {
    Mat4::from_rotation_translation(pose.orientation.normalize(), pose.position)
}
