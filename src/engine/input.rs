//! Input event handling for [`InteractionEngine`].

use super::InteractionEngine;
use crate::error::GrabError;
use crate::gesture::GestureEvent;
use crate::hand::{HandModel, Handedness, TrackingMode};
use crate::input::{grip_placement, FeedReader, InputEvent};

impl InteractionEngine {
    /// Apply one input event.
    ///
    /// Pose data is applied immediately; select intents are queued for the
    /// next [`InteractionEngine::tick`]. Under hand tracking platform
    /// selects are ignored, since the pinch detector synthesizes its own.
    ///
    /// # Errors
    ///
    /// - [`GrabError::NotReady`] for pose data that arrives before the
    ///   hand's rig has loaded, or for a hand with no source.
    /// - [`GrabError::ThreadSpawn`] if a rig load cannot start.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), GrabError> {
        match event {
            InputEvent::SourceConnected { handedness, mode } => {
                self.connect(handedness, mode)
            }
            InputEvent::SourceDisconnected { handedness } => {
                self.disconnect(handedness);
                Ok(())
            }
            InputEvent::HandJoints { handedness, joints } => {
                let model = self.ready_model(handedness)?;
                if model.mode() == TrackingMode::HandTracking {
                    model.apply_tracked_joints(&joints)
                } else {
                    log::debug!(
                        "{} hand: joints ignored for controller source",
                        handedness.as_str()
                    );
                    Ok(())
                }
            }
            InputEvent::ControllerPose { handedness, pose } => {
                let model = self.ready_model(handedness)?;
                if model.mode() == TrackingMode::Controller {
                    model.set_placement(grip_placement(&pose));
                }
                Ok(())
            }
            InputEvent::SelectStart { handedness } => {
                self.queue_select(GestureEvent::GrabStart { handedness });
                Ok(())
            }
            InputEvent::SelectEnd { handedness } => {
                self.queue_select(GestureEvent::GrabEnd { handedness });
                Ok(())
            }
        }
    }

    /// Apply the newest snapshot from a joint feed, if one arrived.
    ///
    /// Hands that are still loading are skipped for this snapshot.
    pub fn apply_feed(&mut self, reader: &mut FeedReader) {
        let Some(snapshot) = reader.take_latest() else {
            return;
        };
        for event in snapshot.into_events() {
            let hand = event.handedness();
            if let Err(e) = self.handle_event(event) {
                log::debug!("{} hand feed skipped: {e}", hand.as_str());
            }
        }
    }

    fn ready_model(
        &mut self,
        hand: Handedness,
    ) -> Result<&mut HandModel, GrabError> {
        self.interacting
            .model_mut(hand)
            .filter(|m| m.is_ready())
            .ok_or(GrabError::NotReady)
    }

    fn connect(
        &mut self,
        hand: Handedness,
        mode: TrackingMode,
    ) -> Result<(), GrabError> {
        if let Some(model) = self.interacting.model(hand) {
            if model.mode() == mode {
                log::debug!(
                    "{} hand already connected as {mode:?}",
                    hand.as_str()
                );
                return Ok(());
            }
            log::info!("{} hand switching to {mode:?}", hand.as_str());
            self.end_interaction(hand);
            let source = self.rig_source.clone();
            if let Some(model) = self.interacting.model_mut(hand) {
                model.reload(mode, source)?;
            }
            return Ok(());
        }

        log::info!("{} hand connected as {mode:?}", hand.as_str());
        let mut model = HandModel::new(hand, mode);
        model.load(self.rig_source.clone())?;
        let _ = self.interacting.set_model(model);
        Ok(())
    }

    fn disconnect(&mut self, hand: Handedness) {
        if self.interacting.model(hand).is_none() {
            return;
        }
        log::info!("{} hand disconnected", hand.as_str());
        self.end_interaction(hand);
        let _ = self.interacting.remove_model(hand);
    }

    /// Force-release whatever `hand` holds and forget its gesture state.
    fn end_interaction(&mut self, hand: Handedness) {
        if self.release(hand).is_some() {
            self.deferred.push(GestureEvent::GrabEnd { handedness: hand });
        }
        self.detectors[hand.index()].reset();
        self.selects.retain(|e| e.handedness() != hand);
    }

    fn queue_select(&mut self, event: GestureEvent) {
        let hand = event.handedness();
        match self.interacting.model(hand).map(HandModel::mode) {
            Some(TrackingMode::Controller) => self.selects.push(event),
            Some(TrackingMode::HandTracking) => log::trace!(
                "{} hand: platform select ignored under hand tracking",
                hand.as_str()
            ),
            None => log::debug!("{} hand: select with no source", hand.as_str()),
        }
    }
}
