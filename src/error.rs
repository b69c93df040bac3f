//! Crate-level error types.
//!
//! Nothing here is fatal to the frame loop. Every variant describes why one
//! hand or one object was skipped for the current tick; the driver simply
//! tries again on the next frame.

use std::fmt;

use crate::grab::ObjectId;
use crate::hand::HandJoint;

/// Errors produced by the handgrab crate.
#[derive(Debug)]
pub enum GrabError {
    /// The hand model's rig has not finished loading.
    NotReady,
    /// A joint the computation needs is absent from the skeleton.
    MissingJoint(HandJoint),
    /// Joint landmarks coincide or are collinear, so no frame exists.
    DegenerateFrame,
    /// A grab intent found no object between the fingertips.
    NoCollision,
    /// A release referenced a session that is gone or owned by another hand.
    StaleSession,
    /// The hand already holds something, or the object is already held.
    Occupied,
    /// No object is registered under this id.
    UnknownObject(ObjectId),
    /// The rig source failed to produce bones.
    RigLoad(String),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A recorded input line could not be decoded.
    Replay(String),
}

impl fmt::Display for GrabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "hand model not ready"),
            Self::MissingJoint(joint) => {
                write!(f, "joint '{}' missing from skeleton", joint.as_str())
            }
            Self::DegenerateFrame => {
                write!(f, "hand landmarks do not span a frame")
            }
            Self::NoCollision => write!(f, "no object between fingertips"),
            Self::StaleSession => write!(f, "no matching grab session"),
            Self::Occupied => write!(f, "hand or object already engaged"),
            Self::UnknownObject(id) => write!(f, "unknown object {id}"),
            Self::RigLoad(msg) => write!(f, "rig load error: {msg}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Replay(msg) => write!(f, "replay error: {msg}"),
        }
    }
}

impl std::error::Error for GrabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GrabError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl GrabError {
    /// Whether this is an ordinary negative outcome rather than a fault.
    ///
    /// The engine logs these at debug level only.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NotReady
                | Self::NoCollision
                | Self::StaleSession
                | Self::Occupied
        )
    }
}
