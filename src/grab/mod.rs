//! Grabbable objects and the grab/release protocol.
//!
//! A [`Grabbable`] owns one object's world transform. A successful
//! [`Grabbable::grab_start`] opens a [`GrabSession`] that remembers the hand
//! transform it last applied; each [`Grabbable::update`] undoes that
//! transform and applies the new one, so the object keeps its offset from
//! the hand without ever storing it explicitly.

/// Fingertip-versus-object collision.
pub mod collision;
mod grabbable;

use std::fmt;

pub use grabbable::{GrabSession, Grabbable};
use serde::{Deserialize, Serialize};

/// Handle of a grabbable object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
