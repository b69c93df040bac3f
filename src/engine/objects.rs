//! Object registry for [`InteractionEngine`].

use glam::{Mat4, Vec3};

use super::InteractionEngine;
use crate::error::GrabError;
use crate::gesture::GestureEvent;
use crate::grab::{Grabbable, ObjectId};

impl InteractionEngine {
    /// Register an object at `transform` whose unscaled geometry bounds
    /// have half-size `half_size` around its origin.
    pub fn add_object(&mut self, transform: Mat4, half_size: Vec3) -> ObjectId {
        self.add_object_with_bounds(transform, Vec3::ZERO, half_size)
    }

    /// Register an object whose geometry bounds are centered on
    /// `bounds_center` in object space.
    pub fn add_object_with_bounds(
        &mut self,
        transform: Mat4,
        bounds_center: Vec3,
        half_size: Vec3,
    ) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        self.objects.push(
            Grabbable::new(id, transform, half_size)
                .with_bounds_center(bounds_center),
        );
        log::debug!("added object {id}");
        id
    }

    /// Unregister an object, releasing the hand holding it. The release
    /// shows up as a `GrabEnd` in the next tick's output.
    ///
    /// # Errors
    ///
    /// [`GrabError::UnknownObject`] if `id` is not registered.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Grabbable, GrabError> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(GrabError::UnknownObject(id))?;
        let mut object = self.objects.remove(index);
        if let Some(hand) = object.holder() {
            object.grab_end(hand, &mut self.interacting)?;
            self.deferred.push(GestureEvent::GrabEnd { handedness: hand });
        }
        Ok(object)
    }

    /// Registered object by id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&Grabbable> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// Every registered object, in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &Grabbable> {
        self.objects.iter()
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut Grabbable, GrabError> {
        self.objects
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(GrabError::UnknownObject(id))
    }

    /// Move an object from outside the interaction.
    ///
    /// # Errors
    ///
    /// [`GrabError::UnknownObject`], or [`GrabError::Occupied`] while a
    /// hand holds it.
    pub fn set_object_transform(
        &mut self,
        id: ObjectId,
        transform: Mat4,
    ) -> Result<(), GrabError> {
        self.object_mut(id)?.set_transform(transform)
    }

    /// Enable or disable grabbing of an object.
    ///
    /// # Errors
    ///
    /// [`GrabError::UnknownObject`].
    pub fn set_object_disabled(
        &mut self,
        id: ObjectId,
        disabled: bool,
    ) -> Result<(), GrabError> {
        self.object_mut(id)?.set_disabled(disabled);
        Ok(())
    }
}
