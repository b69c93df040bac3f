//! Recorded input sessions.
//!
//! A recording is a JSON-lines file, one timed event per line:
//!
//! ```text
//! {"t_ms": 0, "event": {"type": "source-connected", "handedness": "right", "mode": "controller"}}
//! {"t_ms": 16, "event": {"type": "select-start", "handedness": "right"}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::InputEvent;
use crate::error::GrabError;

/// An input event stamped with its offset from the start of the recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since the recording started.
    pub t_ms: u64,
    /// The event itself.
    pub event: InputEvent,
}

impl TimedEvent {
    /// Offset as a duration.
    #[must_use]
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.t_ms)
    }
}

/// Parse one line. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// [`GrabError::Replay`] if the line is not a valid timed event.
pub fn parse_line(line: &str) -> Result<Option<TimedEvent>, GrabError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| GrabError::Replay(e.to_string()))
}

/// Parse a whole recording.
///
/// # Errors
///
/// [`GrabError::Replay`] naming the first bad line, including timestamps
/// that go backwards.
pub fn parse(content: &str) -> Result<Vec<TimedEvent>, GrabError> {
    let mut events = Vec::new();
    let mut last_t = 0;
    for (number, line) in content.lines().enumerate() {
        let Some(timed) = parse_line(line).map_err(|e| {
            GrabError::Replay(format!("line {}: {e}", number + 1))
        })?
        else {
            continue;
        };
        if timed.t_ms < last_t {
            return Err(GrabError::Replay(format!(
                "line {}: timestamp {} before {last_t}",
                number + 1,
                timed.t_ms
            )));
        }
        last_t = timed.t_ms;
        events.push(timed);
    }
    Ok(events)
}

/// Read and parse a recording from disk.
///
/// # Errors
///
/// [`GrabError::Io`] if the file cannot be read, otherwise as [`parse`].
pub fn load(path: &Path) -> Result<Vec<TimedEvent>, GrabError> {
    let content = std::fs::read_to_string(path)?;
    let events = parse(&content)?;
    log::info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Plays a recording back against a clock.
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    events: Vec<TimedEvent>,
    next: usize,
}

impl ReplayCursor {
    /// Cursor at the start of `events`.
    #[must_use]
    pub fn new(events: Vec<TimedEvent>) -> Self {
        Self { events, next: 0 }
    }

    /// Every event stamped at or before `elapsed` not yet returned.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<InputEvent> {
        let start = self.next;
        while self
            .events
            .get(self.next)
            .is_some_and(|e| e.offset() <= elapsed)
        {
            self.next += 1;
        }
        self.events[start..self.next]
            .iter()
            .map(|e| e.event.clone())
            .collect()
    }

    /// Whether every event has been returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    /// Timestamp of the last event.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.events.last().map_or(Duration::ZERO, TimedEvent::offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Handedness;

    const RECORDING: &str = r#"
# controller session
{"t_ms": 0, "event": {"type": "source-connected", "handedness": "right", "mode": "controller"}}
{"t_ms": 16, "event": {"type": "select-start", "handedness": "right"}}

{"t_ms": 48, "event": {"type": "select-end", "handedness": "right"}}
"#;

    #[test]
    fn parses_recording_skipping_blank_and_comment_lines() {
        let events = parse(RECORDING).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].t_ms, 16);
        assert_eq!(
            events[2].event,
            InputEvent::SelectEnd {
                handedness: Handedness::Right
            }
        );
    }

    #[test]
    fn bad_line_reports_its_number() {
        let content = "{\"t_ms\": 0, \"event\": {\"type\": \"select-start\", \"handedness\": \"left\"}}\nnot json\n";
        let err = parse(content).unwrap_err();
        assert!(
            matches!(&err, GrabError::Replay(msg) if msg.starts_with("line 2")),
            "{err}"
        );
    }

    #[test]
    fn backwards_timestamps_are_rejected() {
        let content = concat!(
            "{\"t_ms\": 20, \"event\": {\"type\": \"select-start\", \"handedness\": \"left\"}}\n",
            "{\"t_ms\": 10, \"event\": {\"type\": \"select-end\", \"handedness\": \"left\"}}\n",
        );
        assert!(matches!(parse(content), Err(GrabError::Replay(_))));
    }

    #[test]
    fn cursor_releases_events_as_time_passes() {
        let mut cursor = ReplayCursor::new(parse(RECORDING).unwrap());
        assert_eq!(cursor.duration(), Duration::from_millis(48));
        assert_eq!(cursor.advance(Duration::ZERO).len(), 1);
        assert_eq!(cursor.advance(Duration::from_millis(20)).len(), 1);
        assert!(cursor.advance(Duration::from_millis(30)).is_empty());
        assert!(!cursor.is_finished());
        assert_eq!(cursor.advance(Duration::from_millis(48)).len(), 1);
        assert!(cursor.is_finished());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/handgrab/recording.jsonl"))
            .unwrap_err();
        assert!(matches!(err, GrabError::Io(_)));
    }
}
