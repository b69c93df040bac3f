//! Frame-synchronous interaction driver.
//!
//! [`InteractionEngine`] is the single entry point for a frame loop: feed
//! it [`InputEvent`](crate::input::InputEvent)s as they arrive, call
//! [`InteractionEngine::tick`] once per display frame, and apply the
//! returned object transforms to whatever renders the scene.

mod input;
mod objects;
mod options;

use std::sync::Arc;

use glam::Mat4;
use serde::Serialize;
use web_time::Instant;

use crate::error::GrabError;
use crate::gesture::{GestureEvent, PinchDetector, PinchState};
use crate::grab::{Grabbable, ObjectId};
use crate::hand::{
    HandPose, Handedness, ProceduralRig, RigSource, TrackingMode,
};
use crate::interaction::InteractionCoordinator;
use crate::options::Options;

/// New world transform of an object moved this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectUpdate {
    /// Object that moved.
    pub id: ObjectId,
    /// Its new world transform.
    pub transform: Mat4,
}

/// Everything a tick produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Gesture events in the order they were handled.
    pub events: Vec<GestureEvent>,
    /// Objects whose transform changed.
    pub updates: Vec<ObjectUpdate>,
}

impl FrameOutput {
    /// Whether nothing happened this frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.updates.is_empty()
    }
}

/// Hand models, pinch detectors and grabbable objects driven together.
pub struct InteractionEngine {
    options: Options,
    rig_source: Arc<dyn RigSource>,
    interacting: InteractionCoordinator,
    detectors: [PinchDetector; 2],
    /// Controller select intents waiting for the next tick.
    selects: Vec<GestureEvent>,
    /// Events produced outside a tick (implicit releases on disconnect).
    deferred: Vec<GestureEvent>,
    objects: Vec<Grabbable>,
    next_object_id: u32,
}

impl InteractionEngine {
    /// Engine using the built-in procedural hand rig.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self::with_rig_source(options, Arc::new(ProceduralRig))
    }

    /// Engine loading hand rigs from `rig_source`.
    #[must_use]
    pub fn with_rig_source(
        options: Options,
        rig_source: Arc<dyn RigSource>,
    ) -> Self {
        let detectors = Handedness::BOTH.map(|hand| {
            PinchDetector::new(hand, options.gesture.clone())
        });
        Self {
            options,
            rig_source,
            interacting: InteractionCoordinator::new(),
            detectors,
            selects: Vec::new(),
            deferred: Vec::new(),
            objects: Vec::new(),
            next_object_id: 0,
        }
    }

    /// Hand models and the held-object map.
    #[must_use]
    pub fn coordinator(&self) -> &InteractionCoordinator {
        &self.interacting
    }

    /// Debounced pinch state of `hand`.
    #[must_use]
    pub fn pinch_state(&self, hand: Handedness) -> PinchState {
        self.detectors[hand.index()].state()
    }

    /// Advance one frame.
    ///
    /// Per hand: finish any pending rig load, then turn this frame's input
    /// into gesture events (pinch detection under hand tracking, queued
    /// trigger presses for controllers) and route them to objects. Held
    /// objects are moved last, so a grab and its first carry step happen
    /// in the same frame.
    pub fn tick(&mut self, now: Instant) -> FrameOutput {
        let mut output = FrameOutput {
            events: std::mem::take(&mut self.deferred),
            updates: Vec::new(),
        };

        for hand in Handedness::BOTH {
            for event in self.poll_hand(hand, now) {
                self.dispatch(event);
                output.events.push(event);
            }
        }

        let smoothing = self.options.grab.rotation_smoothing;
        for object in &mut self.objects {
            let Some(hand) = object.holder() else {
                continue;
            };
            let Some(model) = self.interacting.model(hand) else {
                continue;
            };
            match object.update(model, smoothing) {
                Ok(true) => output.updates.push(ObjectUpdate {
                    id: object.id(),
                    transform: object.transform(),
                }),
                Ok(false) => {}
                Err(e) => log::debug!(
                    "object {} not moved this frame: {e}",
                    object.id()
                ),
            }
        }
        output
    }

    /// Gesture events for one hand this frame.
    fn poll_hand(&mut self, hand: Handedness, now: Instant) -> Vec<GestureEvent> {
        let mut selects = Vec::new();
        self.selects.retain(|event| {
            if event.handedness() == hand {
                selects.push(*event);
                false
            } else {
                true
            }
        });

        let Some(model) = self.interacting.model_mut(hand) else {
            return Vec::new();
        };
        if !model.poll_load() {
            if !selects.is_empty() {
                log::debug!(
                    "{} hand not ready, dropping {} select(s)",
                    hand.as_str(),
                    selects.len()
                );
            }
            return Vec::new();
        }

        match model.mode() {
            TrackingMode::HandTracking => {
                match model.thumb_index_distance() {
                    Ok(distance) => self.detectors[hand.index()]
                        .update(now, distance)
                        .into_iter()
                        .collect(),
                    Err(e) => {
                        log::debug!("{} hand skipped: {e}", hand.as_str());
                        Vec::new()
                    }
                }
            }
            TrackingMode::Controller => selects,
        }
    }

    /// Pose a controller hand for `event`, then route it. Each select is
    /// tested against the pose it asks for, even when several arrive in
    /// one tick.
    fn dispatch(&mut self, event: GestureEvent) {
        if let Some(model) = self
            .interacting
            .model_mut(event.handedness())
            .filter(|m| m.mode() == TrackingMode::Controller)
        {
            model.set_pose(match event {
                GestureEvent::GrabStart { .. } => HandPose::Pinch,
                GestureEvent::GrabEnd { .. } => HandPose::Idle,
            });
        }
        self.route(event);
    }

    /// Deliver one gesture event to the objects.
    fn route(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::GrabStart { handedness } => {
                self.try_grab(handedness);
            }
            GestureEvent::GrabEnd { handedness } => {
                let _ = self.release(handedness);
            }
        }
    }

    /// First object that accepts the grab wins.
    fn try_grab(&mut self, hand: Handedness) {
        for object in &mut self.objects {
            let result = object.grab_start(
                hand,
                &mut self.interacting,
                &self.options.grab,
            );
            match result {
                Ok(()) => return,
                Err(GrabError::NoCollision | GrabError::Occupied) => {}
                Err(e) => {
                    log_grab_error(hand, &e);
                    return;
                }
            }
        }
        log::debug!("{} hand grabbed nothing", hand.as_str());
    }

    /// Drop whatever `hand` holds. Returns the released object.
    fn release(&mut self, hand: Handedness) -> Option<ObjectId> {
        let Some(id) = self.interacting.held_by(hand) else {
            log::trace!("{} hand released with nothing held", hand.as_str());
            return None;
        };
        let object = self.objects.iter_mut().find(|o| o.id() == id);
        match object {
            Some(object) => {
                if let Err(e) = object.grab_end(hand, &mut self.interacting) {
                    log_grab_error(hand, &e);
                }
            }
            None => {
                let _ = self.interacting.release_hand(hand);
            }
        }
        Some(id)
    }
}

fn log_grab_error(hand: Handedness, e: &GrabError) {
    if e.is_expected() {
        log::debug!("{} hand: {e}", hand.as_str());
    } else {
        log::warn!("{} hand: {e}", hand.as_str());
    }
}
