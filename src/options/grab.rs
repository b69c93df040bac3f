use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Grab", inline)]
#[serde(default)]
/// Collision and carry parameters for grabbable objects.
pub struct GrabOptions {
    /// Half-extent of the cube placed on each fingertip.
    #[schemars(title = "Fingertip Box", range(min = 0.005, max = 0.1), extend("step" = 0.005))]
    pub fingertip_half_extent: f32,
    /// Fraction of the remaining rotation applied per frame under hand
    /// tracking (1 disables smoothing).
    #[schemars(title = "Rotation Smoothing", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub rotation_smoothing: f32,
    /// Skip the box test when the hand is farther than this beyond the
    /// object's bounding sphere. Zero disables the cull.
    #[schemars(title = "Proximity Cull", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub proximity_cull_distance: f32,
    /// Tolerance added to the separating-axis rotation terms.
    #[schemars(skip)]
    pub obb_epsilon: f32,
}

impl Default for GrabOptions {
    fn default() -> Self {
        Self {
            fingertip_half_extent: 0.025,
            rotation_smoothing: 0.1,
            proximity_cull_distance: 0.2,
            obb_epsilon: f32::EPSILON,
        }
    }
}
