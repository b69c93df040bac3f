use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pinch Gesture", inline)]
#[serde(default)]
/// Pinch hysteresis parameters.
pub struct GestureOptions {
    /// Delay between scheduling a candidate action and acting on it, in
    /// milliseconds.
    #[schemars(title = "Window (ms)", range(min = 0, max = 1000), extend("step" = 10))]
    pub window_ms: u64,
    /// Offset applied to the sampled distance when scheduling.
    #[schemars(title = "Margin", range(min = 0.0, max = 0.2), extend("step" = 0.005))]
    pub margin: f32,
    /// Below this fingertip distance a grab fires immediately.
    #[schemars(title = "Hard Grab Distance", range(min = 0.0, max = 0.05), extend("step" = 0.001))]
    pub hard_grab_distance: f32,
    /// Above this fingertip distance a release fires immediately.
    #[schemars(title = "Hard Release Distance", range(min = 0.02, max = 0.3), extend("step" = 0.005))]
    pub hard_release_distance: f32,
    /// Capacity of the per-hand scheduled-action queue.
    #[schemars(skip)]
    pub max_pending: usize,
}

impl GestureOptions {
    /// The hysteresis window as a duration.
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            window_ms: 200,
            margin: 0.05,
            hard_grab_distance: 0.01,
            hard_release_distance: 0.1,
            max_pending: 256,
        }
    }
}
