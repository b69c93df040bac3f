//! Background loading of hand rigs.
//!
//! Asset loading completes out of band. A [`RigLoader`] runs the
//! [`RigSource`] on its own thread and the per-frame tick polls it with
//! [`RigLoader::try_take`], so the frame loop itself never blocks.

use std::sync::{mpsc, Arc};

use super::joint::{HandJoint, Handedness, TrackingMode};
use super::pose::HandPose;
use super::skeleton::RigBone;
use crate::error::GrabError;

/// Something that can produce the named bones of a rigged hand.
pub trait RigSource: Send + Sync {
    /// Load the rig for one hand.
    ///
    /// # Errors
    ///
    /// Any failure to produce bones, typically [`GrabError::RigLoad`] or
    /// [`GrabError::Io`].
    fn load_rig(
        &self,
        handedness: Handedness,
        mode: TrackingMode,
    ) -> Result<Vec<RigBone>, GrabError>;
}

/// Built-in rig generated from the [`HandPose::Default`] table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProceduralRig;

impl RigSource for ProceduralRig {
    fn load_rig(
        &self,
        handedness: Handedness,
        _mode: TrackingMode,
    ) -> Result<Vec<RigBone>, GrabError> {
        let table = HandPose::Default.table(handedness);
        Ok(HandJoint::ALL
            .iter()
            .map(|joint| RigBone {
                name: joint.as_str().to_owned(),
                pose: table[joint.index()],
            })
            .collect())
    }
}

/// In-flight rig load for one hand.
pub struct RigLoader {
    result_rx: mpsc::Receiver<Result<Vec<RigBone>, GrabError>>,
}

impl RigLoader {
    /// Start loading on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`GrabError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn(
        source: Arc<dyn RigSource>,
        handedness: Handedness,
        mode: TrackingMode,
    ) -> Result<Self, GrabError> {
        let (result_tx, result_rx) = mpsc::channel();
        let _detached = std::thread::Builder::new()
            .name(format!("rig-loader-{}", handedness.as_str()))
            .spawn(move || {
                let result = source.load_rig(handedness, mode);
                let _ = result_tx.send(result);
            })
            .map_err(GrabError::ThreadSpawn)?;
        Ok(Self { result_rx })
    }

    /// Non-blocking check for the finished load.
    ///
    /// Returns `None` while the load is still running.
    pub fn try_take(&self) -> Option<Result<Vec<RigBone>, GrabError>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(
                GrabError::RigLoad("loader thread exited without a rig".into()),
            )),
        }
    }

    /// Block until the load finishes. Intended for tests and tools.
    ///
    /// # Errors
    ///
    /// Whatever the rig source returned, or [`GrabError::RigLoad`] if the
    /// loader thread died.
    pub fn wait(self) -> Result<Vec<RigBone>, GrabError> {
        self.result_rx.recv().map_err(|_| {
            GrabError::RigLoad("loader thread exited without a rig".into())
        })?
    }
}
