//! Debounced pinch state machine.
//!
//! Every frame the detector schedules a candidate action that becomes due
//! one window later. Its threshold is the distance sampled now, offset by
//! the margin toward the opposite state. A transition fires only when the
//! latest due candidate agrees with the current distance, so the signal
//! must have kept moving the same way for the whole window. A single
//! noisy crossing of a fixed cutoff cannot fire. Hard thresholds bypass the
//! window for unambiguous touching or open hands.

use std::collections::VecDeque;

use web_time::Instant;

use super::GestureEvent;
use crate::hand::Handedness;
use crate::options::GestureOptions;

/// Debounced pinch state of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchState {
    /// Fingers apart.
    #[default]
    Idle,
    /// Fingers together.
    Pinched,
}

/// What a scheduled action would do once due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Idle to pinched.
    Grab,
    /// Pinched to idle.
    Release,
}

/// A candidate transition sampled earlier and evaluated later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledAction {
    /// Becomes eligible strictly after this instant.
    pub due_at: Instant,
    /// Sampled distance offset by the margin.
    pub distance_threshold: f32,
    /// Transition this candidate votes for.
    pub kind: ActionKind,
}

/// Pinch detector for one hand.
#[derive(Debug, Clone)]
pub struct PinchDetector {
    handedness: Handedness,
    state: PinchState,
    pending: VecDeque<ScheduledAction>,
    options: GestureOptions,
}

impl PinchDetector {
    /// Idle detector with an empty schedule.
    #[must_use]
    pub fn new(handedness: Handedness, options: GestureOptions) -> Self {
        let capacity = options.max_pending.max(1);
        Self {
            handedness,
            state: PinchState::Idle,
            pending: VecDeque::with_capacity(capacity),
            options,
        }
    }

    /// Current debounced state.
    #[must_use]
    pub fn state(&self) -> PinchState {
        self.state
    }

    /// Number of scheduled actions not yet due.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Swap in new parameters. The schedule is kept.
    pub fn set_options(&mut self, options: GestureOptions) {
        self.options = options;
        self.trim();
    }

    /// Back to idle with nothing scheduled.
    pub fn reset(&mut self) {
        self.state = PinchState::Idle;
        self.pending.clear();
    }

    /// Feed one frame's fingertip distance.
    ///
    /// Returns at most one event. Non-finite distances (lost tracking) are
    /// skipped without touching the schedule.
    pub fn update(
        &mut self,
        now: Instant,
        distance: f32,
    ) -> Option<GestureEvent> {
        if !distance.is_finite() {
            log::trace!(
                "{} pinch: ignoring non-finite distance",
                self.handedness.as_str()
            );
            return None;
        }

        let due = self.take_due(now);
        self.schedule(now, distance);

        let handedness = self.handedness;
        match self.state {
            PinchState::Idle => {
                let window_agrees = due.is_some_and(|a| {
                    a.kind == ActionKind::Grab
                        && a.distance_threshold > distance
                });
                if window_agrees || distance < self.options.hard_grab_distance {
                    self.state = PinchState::Pinched;
                    log::debug!(
                        "{} pinch: grab at {distance:.3}",
                        handedness.as_str()
                    );
                    return Some(GestureEvent::GrabStart { handedness });
                }
            }
            PinchState::Pinched => {
                let window_agrees = due.is_some_and(|a| {
                    a.kind == ActionKind::Release
                        && a.distance_threshold < distance
                });
                if window_agrees
                    || distance > self.options.hard_release_distance
                {
                    self.state = PinchState::Idle;
                    log::debug!(
                        "{} pinch: release at {distance:.3}",
                        handedness.as_str()
                    );
                    return Some(GestureEvent::GrabEnd { handedness });
                }
            }
        }
        None
    }

    /// Pop every action due before `now`; only the latest one counts.
    fn take_due(&mut self, now: Instant) -> Option<ScheduledAction> {
        let mut last = None;
        // Actions are pushed in time order, so due ones sit at the front.
        while let Some(front) = self.pending.front() {
            if now > front.due_at {
                last = self.pending.pop_front();
            } else {
                break;
            }
        }
        last
    }

    fn schedule(&mut self, now: Instant, distance: f32) {
        let (kind, distance_threshold) = match self.state {
            PinchState::Idle => {
                (ActionKind::Grab, distance - self.options.margin)
            }
            PinchState::Pinched => {
                (ActionKind::Release, distance + self.options.margin)
            }
        };
        self.pending.push_back(ScheduledAction {
            due_at: now + self.options.window(),
            distance_threshold,
            kind,
        });
        self.trim();
    }

    fn trim(&mut self) {
        let cap = self.options.max_pending.max(1);
        while self.pending.len() > cap {
            let _ = self.pending.pop_front();
        }
    }
}
