//! Input handling: the event vocabulary, a lock-free joint feed for
//! tracking threads, and JSON-lines recordings.

/// Platform-agnostic input events.
pub mod event;
/// Latest-value joint feed.
pub mod feed;
/// Recorded input sessions.
pub mod replay;

pub use event::{grip_placement, InputEvent};
pub use feed::{FeedReader, FeedWriter, JointFeed, JointSnapshot};
pub use replay::{ReplayCursor, TimedEvent};
