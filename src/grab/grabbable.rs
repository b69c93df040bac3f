use glam::{Mat4, Vec3};

use super::collision;
use super::ObjectId;
use crate::error::GrabError;
use crate::geometry::{smoothed_transform, OrientedBox};
use crate::hand::{HandModel, Handedness, TrackingMode};
use crate::interaction::InteractionCoordinator;
use crate::options::GrabOptions;

/// Live association between a hand and the object it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabSession {
    /// Hand holding the object.
    pub handedness: Handedness,
    /// Hand transform applied on the previous frame.
    pub previous_transform: Mat4,
}

/// An object the hands can pick up.
#[derive(Debug, Clone)]
pub struct Grabbable {
    id: ObjectId,
    transform: Mat4,
    /// Bounding box of the unscaled geometry, in object space.
    local_center: Vec3,
    local_half_size: Vec3,
    session: Option<GrabSession>,
    disabled: bool,
}

impl Grabbable {
    /// Object placed at `transform` whose geometry bounds are centered on
    /// its origin.
    #[must_use]
    pub fn new(id: ObjectId, transform: Mat4, half_size: Vec3) -> Self {
        Self {
            id,
            transform,
            local_center: Vec3::ZERO,
            local_half_size: half_size,
            session: None,
            disabled: false,
        }
    }

    /// Use geometry bounds that are not centered on the object origin.
    #[must_use]
    pub fn with_bounds_center(mut self, center: Vec3) -> Self {
        self.local_center = center;
        self
    }

    /// Handle this object is registered under.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// World transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Active session, if held.
    #[must_use]
    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    /// Hand currently holding the object.
    #[must_use]
    pub fn holder(&self) -> Option<Handedness> {
        self.session.map(|s| s.handedness)
    }

    /// Whether grab intents are ignored.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable grabbing. An object already in hand stays held.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Collision box at the current transform.
    #[must_use]
    pub fn world_box(&self) -> OrientedBox {
        OrientedBox::from_world(
            &self.transform,
            self.local_center,
            self.local_half_size,
        )
    }

    /// Move the object from outside the interaction, e.g. a level reset.
    ///
    /// # Errors
    ///
    /// [`GrabError::Occupied`] while a hand holds the object; only the
    /// session writes the transform then.
    pub fn set_transform(&mut self, transform: Mat4) -> Result<(), GrabError> {
        if self.session.is_some() {
            return Err(GrabError::Occupied);
        }
        self.transform = transform;
        Ok(())
    }

    /// Try to pick the object up with `hand`.
    ///
    /// # Errors
    ///
    /// - [`GrabError::Occupied`] if the hand already holds something or the
    ///   object is held.
    /// - [`GrabError::NotReady`] if the hand has no loaded model.
    /// - [`GrabError::NoCollision`] if the fingertips do not enclose the
    ///   object, or the object is disabled.
    /// - Landmark errors from the hand model.
    pub fn grab_start(
        &mut self,
        hand: Handedness,
        interacting: &mut InteractionCoordinator,
        options: &GrabOptions,
    ) -> Result<(), GrabError> {
        if self.disabled {
            return Err(GrabError::NoCollision);
        }
        if self.session.is_some() || interacting.held_by(hand).is_some() {
            return Err(GrabError::Occupied);
        }
        let model = interacting
            .model(hand)
            .filter(|m| m.is_ready())
            .ok_or(GrabError::NotReady)?;

        if !collision::hand_touches(model, &self.world_box(), options)? {
            return Err(GrabError::NoCollision);
        }

        let previous_transform = model.hand_transform()?;
        interacting.claim(hand, self.id)?;
        self.session = Some(GrabSession {
            handedness: hand,
            previous_transform,
        });
        log::debug!("{} hand grabbed object {}", hand.as_str(), self.id);
        Ok(())
    }

    /// Carry the object along with its hand for one frame.
    ///
    /// Returns `Ok(false)` when nothing holds the object. If the model
    /// cannot produce a transform this frame the error is returned and the
    /// object and session are left untouched.
    ///
    /// # Errors
    ///
    /// Landmark errors from the hand model.
    pub fn update(
        &mut self,
        model: &HandModel,
        rotation_smoothing: f32,
    ) -> Result<bool, GrabError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        let frame = model.frame()?;
        let current = frame.transform();

        let applied = match model.mode() {
            TrackingMode::HandTracking => smoothed_transform(
                &session.previous_transform,
                &current,
                frame.position,
                rotation_smoothing,
            ),
            TrackingMode::Controller => current,
        };

        // Undo last frame's hand transform, then apply this frame's.
        self.transform =
            applied * session.previous_transform.inverse() * self.transform;
        session.previous_transform = applied;
        Ok(true)
    }

    /// Drop the object if `hand` holds it.
    ///
    /// # Errors
    ///
    /// [`GrabError::StaleSession`] if no session exists or another hand
    /// owns it. Nothing changes in that case.
    pub fn grab_end(
        &mut self,
        hand: Handedness,
        interacting: &mut InteractionCoordinator,
    ) -> Result<(), GrabError> {
        match self.session {
            Some(session) if session.handedness == hand => {
                self.session = None;
                let _ = interacting.release(hand, self.id);
                log::debug!("{} hand released object {}", hand.as_str(), self.id);
                Ok(())
            }
            _ => Err(GrabError::StaleSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::hand::{HandJoint, HandPose, JointPose, Skeleton, TrackedJoint};

    const ID: ObjectId = ObjectId(7);

    /// Controller-driven right hand in the pinch pose whose fingertip
    /// midpoint lands on `target`.
    fn pinching_controller(target: Mat4) -> HandModel {
        let mut model = HandModel::with_skeleton(
            Handedness::Right,
            TrackingMode::Controller,
            Skeleton::from_poses(HandPose::Default.table(Handedness::Right)),
        );
        model.set_pose(HandPose::Pinch);
        place(&mut model, target);
        model
    }

    /// Move a controller model so its grip midpoint sits at `target`.
    fn place(model: &mut HandModel, target: Mat4) {
        model.set_placement(Mat4::IDENTITY);
        let origin = model.hand_position().unwrap();
        model.set_placement(target * Mat4::from_translation(-origin));
    }

    fn coordinator_with(model: HandModel) -> InteractionCoordinator {
        let mut interacting = InteractionCoordinator::new();
        let _ = interacting.set_model(model);
        interacting
    }

    fn crate_at_origin() -> Grabbable {
        Grabbable::new(ID, Mat4::IDENTITY, Vec3::splat(0.05))
    }

    fn assert_mat_close(a: Mat4, b: Mat4, tol: f32) {
        assert!(a.abs_diff_eq(b, tol), "{a:?}\n!=\n{b:?}");
    }

    #[test]
    fn pickup_tracks_controller_one_to_one() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        let options = GrabOptions::default();

        object
            .grab_start(Handedness::Right, &mut interacting, &options)
            .unwrap();
        assert_eq!(object.holder(), Some(Handedness::Right));
        assert_eq!(interacting.held_by(Handedness::Right), Some(ID));

        let before = interacting
            .model(Handedness::Right)
            .unwrap()
            .hand_transform()
            .unwrap();
        let motion = Mat4::from_rotation_translation(
            Quat::from_rotation_y(0.6),
            Vec3::new(0.3, 0.1, -0.2),
        );
        let model = interacting.model_mut(Handedness::Right).unwrap();
        place(model, motion);
        let after = model.hand_transform().unwrap();

        let model = interacting.model(Handedness::Right).unwrap();
        assert!(object.update(model, options.rotation_smoothing).unwrap());
        assert_mat_close(object.transform(), after * before.inverse(), 1e-4);
    }

    #[test]
    fn miss_creates_no_session() {
        let mut interacting = coordinator_with(pinching_controller(
            Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0)),
        ));
        let mut object = crate_at_origin();
        let result = object.grab_start(
            Handedness::Right,
            &mut interacting,
            &GrabOptions::default(),
        );
        assert!(matches!(result, Err(GrabError::NoCollision)));
        assert!(object.session().is_none());
        assert_eq!(interacting.held_by(Handedness::Right), None);
    }

    #[test]
    fn double_grab_is_rejected() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut first = crate_at_origin();
        let mut second = Grabbable::new(ObjectId(8), Mat4::IDENTITY, Vec3::splat(0.05));
        let options = GrabOptions::default();

        first
            .grab_start(Handedness::Right, &mut interacting, &options)
            .unwrap();
        let again = first.grab_start(Handedness::Right, &mut interacting, &options);
        assert!(matches!(again, Err(GrabError::Occupied)));
        let other = second.grab_start(Handedness::Right, &mut interacting, &options);
        assert!(matches!(other, Err(GrabError::Occupied)));
        assert_eq!(interacting.held_by(Handedness::Right), Some(ID));
        assert!(second.session().is_none());
    }

    #[test]
    fn second_hand_cannot_take_a_held_object() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        let options = GrabOptions::default();
        object
            .grab_start(Handedness::Right, &mut interacting, &options)
            .unwrap();
        let session = *object.session().unwrap();

        // left hand pinches the same crate from both sides
        let mut left = HandModel::with_skeleton(
            Handedness::Left,
            TrackingMode::HandTracking,
            Skeleton::from_poses(HandPose::Default.table(Handedness::Left)),
        );
        let joints = [
            (HandJoint::IndexFingerTip, Vec3::new(-0.02, 0.0, 0.0)),
            (HandJoint::ThumbTip, Vec3::new(0.02, 0.0, 0.0)),
            (HandJoint::IndexFingerMetacarpal, Vec3::new(-0.02, 0.02, 0.09)),
            (HandJoint::PinkyFingerMetacarpal, Vec3::new(-0.02, -0.04, 0.09)),
        ]
        .map(|(joint, p)| TrackedJoint {
            joint,
            pose: JointPose::at(p),
        });
        left.apply_tracked_joints(&joints).unwrap();
        assert!(collision::hand_touches(&left, &object.world_box(), &options).unwrap());
        let _ = interacting.set_model(left);

        let result = object.grab_start(Handedness::Left, &mut interacting, &options);
        assert!(matches!(result, Err(GrabError::Occupied)));
        assert_eq!(object.holder(), Some(Handedness::Right));
        assert_eq!(object.session(), Some(&session));
        assert_eq!(interacting.held_by(Handedness::Left), None);
        assert_eq!(interacting.held_by(Handedness::Right), Some(ID));

        // the right hand still drives the object
        let motion = Mat4::from_translation(Vec3::new(0.0, 0.2, 0.0));
        place(interacting.model_mut(Handedness::Right).unwrap(), motion);
        let right = interacting.model(Handedness::Right).unwrap();
        assert!(object.update(right, options.rotation_smoothing).unwrap());
        let moved = object.transform().w_axis.truncate();
        assert!((moved - Vec3::new(0.0, 0.2, 0.0)).length() < 1e-4);
    }

    #[test]
    fn release_is_idempotent() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        let options = GrabOptions::default();
        object
            .grab_start(Handedness::Right, &mut interacting, &options)
            .unwrap();
        object.grab_end(Handedness::Right, &mut interacting).unwrap();
        let transform = object.transform();

        let again = object.grab_end(Handedness::Right, &mut interacting);
        assert!(matches!(again, Err(GrabError::StaleSession)));
        assert_eq!(object.transform(), transform);
        assert_eq!(interacting.held_by(Handedness::Right), None);
    }

    #[test]
    fn other_hand_cannot_release() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        object
            .grab_start(Handedness::Right, &mut interacting, &GrabOptions::default())
            .unwrap();
        let result = object.grab_end(Handedness::Left, &mut interacting);
        assert!(matches!(result, Err(GrabError::StaleSession)));
        assert_eq!(object.holder(), Some(Handedness::Right));
    }

    #[test]
    fn constant_hand_does_not_drift() {
        for mode in [TrackingMode::Controller, TrackingMode::HandTracking] {
            let mut model = pinching_controller(Mat4::from_rotation_translation(
                Quat::from_rotation_z(0.4),
                Vec3::new(0.1, 1.0, -0.3),
            ));
            if mode == TrackingMode::HandTracking {
                // freeze the controller pose into tracked world joints
                let joints = HandJoint::ALL.map(|joint| {
                    TrackedJoint {
                        joint,
                        pose: JointPose::at(
                            model.joint_position(joint).unwrap(),
                        ),
                    }
                });
                model = HandModel::with_skeleton(
                    Handedness::Right,
                    TrackingMode::HandTracking,
                    Skeleton::default(),
                );
                model.apply_tracked_joints(&joints).unwrap();
            }
            let start = Mat4::from_rotation_translation(
                Quat::from_rotation_z(0.4),
                Vec3::new(0.1, 1.0, -0.3),
            );
            let mut interacting = coordinator_with(model);
            let mut object = Grabbable::new(ID, start, Vec3::splat(0.05));
            object
                .grab_start(Handedness::Right, &mut interacting, &GrabOptions::default())
                .unwrap();

            let model = interacting.model(Handedness::Right).unwrap();
            let _ = object.update(model, 0.1).unwrap();
            let after_first = object.transform();
            for _ in 0..100 {
                let _ = object.update(model, 0.1).unwrap();
            }
            assert_mat_close(object.transform(), after_first, 1e-4);
            assert_mat_close(object.transform(), start, 1e-4);
        }
    }

    #[test]
    fn smoothing_lags_behind_a_rotating_hand() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        let options = GrabOptions::default();
        object
            .grab_start(Handedness::Right, &mut interacting, &options)
            .unwrap();

        // Rebuild the same hand as a tracked hand so smoothing applies.
        let held = interacting.model(Handedness::Right).unwrap();
        let turned = Mat4::from_rotation_y(1.0);
        let joints = HandJoint::ALL.map(|joint| {
            TrackedJoint {
                joint,
                pose: JointPose::at(
                    turned.transform_point3(held.joint_position(joint).unwrap()),
                ),
            }
        });
        let mut tracked = HandModel::with_skeleton(
            Handedness::Right,
            TrackingMode::HandTracking,
            Skeleton::default(),
        );
        tracked.apply_tracked_joints(&joints).unwrap();

        let moved = object.update(&tracked, options.rotation_smoothing).unwrap();
        assert!(moved);
        let (_, rotation, _) = object.transform().to_scale_rotation_translation();
        let turned_by = rotation.angle_between(Quat::IDENTITY);
        assert!(turned_by > 0.05 && turned_by < 0.2, "turned {turned_by}");
    }

    #[test]
    fn set_transform_refused_while_held() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        object
            .grab_start(Handedness::Right, &mut interacting, &GrabOptions::default())
            .unwrap();
        let moved = Mat4::from_translation(Vec3::X);
        assert!(matches!(object.set_transform(moved), Err(GrabError::Occupied)));
        object.grab_end(Handedness::Right, &mut interacting).unwrap();
        object.set_transform(moved).unwrap();
        assert_eq!(object.transform(), moved);
    }

    #[test]
    fn disabled_object_ignores_grabs() {
        let mut interacting = coordinator_with(pinching_controller(Mat4::IDENTITY));
        let mut object = crate_at_origin();
        object.set_disabled(true);
        let result = object.grab_start(
            Handedness::Right,
            &mut interacting,
            &GrabOptions::default(),
        );
        assert!(matches!(result, Err(GrabError::NoCollision)));
    }

    #[test]
    fn hand_without_model_is_not_ready() {
        let mut interacting = InteractionCoordinator::new();
        let mut object = crate_at_origin();
        let result = object.grab_start(
            Handedness::Left,
            &mut interacting,
            &GrabOptions::default(),
        );
        assert!(matches!(result, Err(GrabError::NotReady)));
    }

    #[test]
    fn scaled_object_box_includes_scale() {
        let object = Grabbable::new(
            ID,
            Mat4::from_scale(Vec3::splat(0.1)),
            Vec3::splat(0.5),
        );
        let world = object.world_box();
        assert!((world.half_size - Vec3::splat(0.05)).length() < 1e-6);
    }
}
