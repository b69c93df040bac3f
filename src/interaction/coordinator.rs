use rustc_hash::FxHashMap;

use crate::error::GrabError;
use crate::grab::ObjectId;
use crate::hand::{HandModel, Handedness};

/// Hand models and the record of which hand holds which object.
///
/// Object controllers receive this by reference when they handle a grab
/// or release, so the "one object per hand" rule is enforced in one
/// place.
#[derive(Default)]
pub struct InteractionCoordinator {
    models: [Option<HandModel>; 2],
    interacting: FxHashMap<Handedness, ObjectId>,
}

impl InteractionCoordinator {
    /// No hands, nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the model for its hand, returning the one it replaces.
    pub fn set_model(&mut self, model: HandModel) -> Option<HandModel> {
        let slot = &mut self.models[model.handedness().index()];
        slot.replace(model)
    }

    /// Model for `hand`, ready or not.
    #[must_use]
    pub fn model(&self, hand: Handedness) -> Option<&HandModel> {
        self.models[hand.index()].as_ref()
    }

    /// Mutable model for `hand`.
    pub fn model_mut(&mut self, hand: Handedness) -> Option<&mut HandModel> {
        self.models[hand.index()].as_mut()
    }

    /// Remove the model for `hand`. Whatever it held is forgotten too.
    pub fn remove_model(&mut self, hand: Handedness) -> Option<HandModel> {
        let _ = self.release_hand(hand);
        self.models[hand.index()].take()
    }

    /// Object `hand` is holding.
    #[must_use]
    pub fn held_by(&self, hand: Handedness) -> Option<ObjectId> {
        self.interacting.get(&hand).copied()
    }

    /// Hand holding `object`.
    #[must_use]
    pub fn holder_of(&self, object: ObjectId) -> Option<Handedness> {
        self.interacting
            .iter()
            .find_map(|(hand, held)| (*held == object).then_some(*hand))
    }

    /// Record that `hand` now holds `object`.
    ///
    /// # Errors
    ///
    /// [`GrabError::Occupied`] if the hand already holds something or the
    /// object is held by any hand.
    pub fn claim(
        &mut self,
        hand: Handedness,
        object: ObjectId,
    ) -> Result<(), GrabError> {
        if self.held_by(hand).is_some() || self.holder_of(object).is_some() {
            return Err(GrabError::Occupied);
        }
        let _ = self.interacting.insert(hand, object);
        Ok(())
    }

    /// Clear the record if `hand` holds `object`. Returns whether it did.
    pub fn release(&mut self, hand: Handedness, object: ObjectId) -> bool {
        if self.held_by(hand) == Some(object) {
            let _ = self.interacting.remove(&hand);
            true
        } else {
            false
        }
    }

    /// Clear whatever `hand` holds.
    pub fn release_hand(&mut self, hand: Handedness) -> Option<ObjectId> {
        self.interacting.remove(&hand)
    }

    /// Hands with a model installed.
    pub fn models(&self) -> impl Iterator<Item = &HandModel> {
        self.models.iter().flatten()
    }
}
