//! Pinch gesture detection.
//!
//! Turns the continuous thumb-to-index distance of a tracked hand into
//! discrete grab and release events. See [`PinchDetector`] for the
//! hysteresis rules.

mod detector;

pub use detector::{ActionKind, PinchDetector, PinchState, ScheduledAction};
use serde::{Deserialize, Serialize};

use crate::hand::Handedness;

/// Discrete select intent for one hand.
///
/// Emitted by the pinch detector under hand tracking, or translated from
/// controller trigger presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GestureEvent {
    /// The hand closed: try to pick something up.
    GrabStart {
        /// Hand that closed.
        handedness: Handedness,
    },
    /// The hand opened: drop whatever it holds.
    GrabEnd {
        /// Hand that opened.
        handedness: Handedness,
    },
}

impl GestureEvent {
    /// Hand the event belongs to.
    #[must_use]
    pub fn handedness(self) -> Handedness {
        match self {
            Self::GrabStart { handedness } | Self::GrabEnd { handedness } => {
                handedness
            }
        }
    }
}
