//! A hand model: skeleton plus scene placement.
//!
//! The skeleton holds joint poses in model space; the placement says where
//! the model sits in the world. They are combined only when a world-space
//! joint position is asked for. Every query answers
//! [`GrabError::NotReady`] until the rig has loaded.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::frame::{HandFrame, Landmarks};
use super::joint::{HandJoint, Handedness, TrackedJoint, TrackingMode};
use super::loader::{RigLoader, RigSource};
use super::pose::HandPose;
use super::skeleton::Skeleton;
use crate::error::GrabError;

/// Loading lifecycle of a hand model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Rig load still running (or never started).
    Loading,
    /// Skeleton available; queries succeed.
    Ready,
    /// The rig source failed; the model stays unusable until reloaded.
    Failed,
}

/// Offset from the controller grip to the rendered hand.
fn controller_offset() -> Mat4 {
    Mat4::from_rotation_translation(
        Quat::from_euler(EulerRot::XYZ, FRAC_PI_2, -FRAC_PI_2, 0.0),
        Vec3::new(0.02, -0.05, 0.12),
    )
}

/// One hand's skeleton and placement.
pub struct HandModel {
    handedness: Handedness,
    mode: TrackingMode,
    skeleton: Option<Skeleton>,
    loader: Option<RigLoader>,
    failed: bool,
    /// Controller pose in controller mode; identity for hand tracking,
    /// whose joints already arrive in world space.
    placement: Mat4,
    pose: HandPose,
}

impl HandModel {
    /// Model with no rig yet. Call [`HandModel::load`] to start loading.
    #[must_use]
    pub fn new(handedness: Handedness, mode: TrackingMode) -> Self {
        Self {
            handedness,
            mode,
            skeleton: None,
            loader: None,
            failed: false,
            placement: Mat4::IDENTITY,
            pose: HandPose::Default,
        }
    }

    /// Model that is ready immediately with the given skeleton.
    #[must_use]
    pub fn with_skeleton(
        handedness: Handedness,
        mode: TrackingMode,
        skeleton: Skeleton,
    ) -> Self {
        let mut model = Self::new(handedness, mode);
        model.install(skeleton);
        model
    }

    /// Start (or restart) loading the rig in the background.
    ///
    /// The current skeleton is discarded, so the model reads as loading
    /// until the next successful [`HandModel::poll_load`].
    ///
    /// # Errors
    ///
    /// [`GrabError::ThreadSpawn`] if the loader thread cannot start.
    pub fn load(&mut self, source: Arc<dyn RigSource>) -> Result<(), GrabError> {
        self.skeleton = None;
        self.failed = false;
        self.loader = Some(RigLoader::spawn(source, self.handedness, self.mode)?);
        Ok(())
    }

    /// Switch tracking mode and reload the rig.
    ///
    /// # Errors
    ///
    /// Same as [`HandModel::load`].
    pub fn reload(
        &mut self,
        mode: TrackingMode,
        source: Arc<dyn RigSource>,
    ) -> Result<(), GrabError> {
        self.mode = mode;
        self.placement = Mat4::IDENTITY;
        self.load(source)
    }

    /// Poll the background load. Returns whether the model is ready.
    pub fn poll_load(&mut self) -> bool {
        let Some(result) = self.loader.as_ref().and_then(RigLoader::try_take)
        else {
            return self.is_ready();
        };
        self.loader = None;
        match result {
            Ok(bones) => {
                log::debug!(
                    "{} hand rig loaded ({} bones)",
                    self.handedness.as_str(),
                    bones.len()
                );
                self.install(Skeleton::from_rig(&bones));
            }
            Err(e) => {
                log::error!(
                    "failed to load {} hand rig: {e}",
                    self.handedness.as_str()
                );
                self.failed = true;
            }
        }
        self.is_ready()
    }

    fn install(&mut self, skeleton: Skeleton) {
        self.skeleton = Some(skeleton);
        self.failed = false;
        if self.mode == TrackingMode::Controller {
            self.set_pose(HandPose::Idle);
        }
    }

    /// Loading lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        if self.skeleton.is_some() {
            LoadState::Ready
        } else if self.failed {
            LoadState::Failed
        } else {
            LoadState::Loading
        }
    }

    /// Whether queries will succeed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.skeleton.is_some()
    }

    /// Which hand this models.
    #[must_use]
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Where the pose data comes from.
    #[must_use]
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Static pose last applied (controller mode).
    #[must_use]
    pub fn pose(&self) -> HandPose {
        self.pose
    }

    /// Scene placement.
    #[must_use]
    pub fn placement(&self) -> Mat4 {
        self.placement
    }

    /// Move the model, e.g. to the latest controller pose.
    pub fn set_placement(&mut self, placement: Mat4) {
        self.placement = placement;
    }

    /// Loaded skeleton.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`] while loading.
    pub fn skeleton(&self) -> Result<&Skeleton, GrabError> {
        self.skeleton.as_ref().ok_or(GrabError::NotReady)
    }

    /// Copy this frame's tracked joints into the skeleton.
    ///
    /// Joints the source did not report keep their previous pose.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`] while loading.
    pub fn apply_tracked_joints(
        &mut self,
        joints: &[TrackedJoint],
    ) -> Result<(), GrabError> {
        let skeleton = self.skeleton.as_mut().ok_or(GrabError::NotReady)?;
        for tracked in joints {
            skeleton.set(tracked.joint, tracked.pose);
        }
        Ok(())
    }

    /// Overwrite every joint from a static pose table.
    ///
    /// Only meaningful for controller-driven models; with live tracking the
    /// next frame would overwrite it anyway, so the call is ignored.
    pub fn set_pose(&mut self, pose: HandPose) {
        if self.mode == TrackingMode::HandTracking {
            log::debug!("set_pose ignored under hand tracking");
            return;
        }
        let table = pose.table(self.handedness);
        if let Some(skeleton) = self.skeleton.as_mut() {
            skeleton.apply_table(&table);
            self.pose = pose;
        }
    }

    fn world_from_model(&self) -> Mat4 {
        match self.mode {
            TrackingMode::HandTracking => self.placement,
            TrackingMode::Controller => self.placement * controller_offset(),
        }
    }

    /// World-space position of one joint.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`] or [`GrabError::MissingJoint`].
    pub fn joint_position(&self, joint: HandJoint) -> Result<Vec3, GrabError> {
        let local = self.skeleton()?.get(joint)?.position;
        Ok(self.world_from_model().transform_point3(local))
    }

    /// World positions of the frame landmarks.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`] or [`GrabError::MissingJoint`].
    pub fn landmarks(&self) -> Result<Landmarks, GrabError> {
        Ok(Landmarks {
            index_tip: self.joint_position(HandJoint::IndexFingerTip)?,
            thumb_tip: self.joint_position(HandJoint::ThumbTip)?,
            index_knuckle: self.joint_position(HandJoint::IndexFingerMetacarpal)?,
            pinky_knuckle: self.joint_position(HandJoint::PinkyFingerMetacarpal)?,
        })
    }

    /// Distance between thumb tip and index tip: the raw pinch signal.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`] or [`GrabError::MissingJoint`].
    pub fn thumb_index_distance(&self) -> Result<f32, GrabError> {
        let index_tip = self.joint_position(HandJoint::IndexFingerTip)?;
        let thumb_tip = self.joint_position(HandJoint::ThumbTip)?;
        Ok(index_tip.distance(thumb_tip))
    }

    /// Midpoint of the index and thumb tips.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`] or [`GrabError::MissingJoint`].
    pub fn hand_position(&self) -> Result<Vec3, GrabError> {
        let index_tip = self.joint_position(HandJoint::IndexFingerTip)?;
        let thumb_tip = self.joint_position(HandJoint::ThumbTip)?;
        Ok(super::frame::grip_midpoint(index_tip, thumb_tip))
    }

    /// Rotation-only transform of the hand frame.
    ///
    /// # Errors
    ///
    /// [`GrabError::NotReady`], [`GrabError::MissingJoint`] or
    /// [`GrabError::DegenerateFrame`].
    pub fn hand_rotation(&self) -> Result<Mat4, GrabError> {
        Ok(HandFrame::basis(&self.landmarks()?)?.rotation())
    }

    /// Full hand frame.
    ///
    /// # Errors
    ///
    /// Same as [`HandModel::hand_rotation`].
    pub fn frame(&self) -> Result<HandFrame, GrabError> {
        HandFrame::from_landmarks(&self.landmarks()?)
    }

    /// Where the hand is and how it is oriented, as one rigid transform.
    ///
    /// # Errors
    ///
    /// Same as [`HandModel::hand_rotation`].
    pub fn hand_transform(&self) -> Result<Mat4, GrabError> {
        Ok(self.frame()?.transform())
    }
}
