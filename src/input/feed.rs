//! Latest-value joint feed between a tracking thread and the frame tick.
//!
//! Tracking runtimes often deliver joints on their own thread at their own
//! rate. The tick only ever wants the newest sample, so a triple buffer is
//! enough: the writer never blocks, the reader never blocks, and stale
//! samples are overwritten rather than queued.

use super::InputEvent;
use crate::hand::{Handedness, TrackedJoint};

/// Joints for both hands captured at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointSnapshot {
    /// Left-hand joints, `None` when the hand was not tracked.
    pub left: Option<Vec<TrackedJoint>>,
    /// Right-hand joints, `None` when the hand was not tracked.
    pub right: Option<Vec<TrackedJoint>>,
}

impl JointSnapshot {
    /// One [`InputEvent::HandJoints`] per tracked hand.
    #[must_use]
    pub fn into_events(self) -> Vec<InputEvent> {
        [(Handedness::Left, self.left), (Handedness::Right, self.right)]
            .into_iter()
            .filter_map(|(handedness, joints)| {
                joints.map(|joints| InputEvent::HandJoints { handedness, joints })
            })
            .collect()
    }
}

/// Constructor for a connected writer/reader pair.
pub struct JointFeed;

impl JointFeed {
    /// Create the two ends of a feed.
    #[must_use]
    pub fn split() -> (FeedWriter, FeedReader) {
        let (input, output) = triple_buffer::triple_buffer(&None);
        (FeedWriter { input }, FeedReader { output })
    }
}

/// Producer end, owned by the tracking thread.
pub struct FeedWriter {
    input: triple_buffer::Input<Option<JointSnapshot>>,
}

impl FeedWriter {
    /// Publish a snapshot, replacing any the reader has not taken yet.
    pub fn publish(&mut self, snapshot: JointSnapshot) {
        self.input.write(Some(snapshot));
    }
}

/// Consumer end, owned by the frame tick.
pub struct FeedReader {
    output: triple_buffer::Output<Option<JointSnapshot>>,
}

impl FeedReader {
    /// Newest snapshot published since the last call, if any.
    pub fn take_latest(&mut self) -> Option<JointSnapshot> {
        let _ = self.output.update();
        self.output.output_buffer().take()
    }
}
