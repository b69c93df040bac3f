//! Tunable interaction constants with TOML support.
//!
//! Every knob the gesture detector and the grab controller read lives
//! here. Options serialize to/from TOML so a deployment can override any
//! subset without restating the rest.

mod gesture;
mod grab;

use std::path::Path;

pub use gesture::GestureOptions;
pub use grab::GrabOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GrabError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[grab]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pinch detector parameters.
    pub gesture: GestureOptions,
    /// Grab collision and carry parameters.
    pub grab: GrabOptions,
}

impl Options {
    /// Generate JSON Schema describing the exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`GrabError::Io`] if the file cannot be read,
    /// [`GrabError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GrabError> {
        let content = std::fs::read_to_string(path).map_err(GrabError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// [`GrabError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, GrabError> {
        toml::from_str(content)
            .map_err(|e| GrabError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`GrabError::OptionsParse`] if serialization fails,
    /// [`GrabError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GrabError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GrabError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GrabError::Io)?;
        }
        std::fs::write(path, content).map_err(GrabError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[grab]
rotation_smoothing = 0.25
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.grab.rotation_smoothing, 0.25);
        // Everything else should be default
        assert_eq!(opts.grab.fingertip_half_extent, 0.025);
        assert_eq!(opts.gesture, GestureOptions::default());
    }

    #[test]
    fn defaults_match_documented_constants() {
        let opts = Options::default();
        assert_eq!(opts.gesture.window().as_millis(), 200);
        assert_eq!(opts.gesture.margin, 0.05);
        assert_eq!(opts.gesture.hard_grab_distance, 0.01);
        assert_eq!(opts.gesture.hard_release_distance, 0.1);
        assert_eq!(opts.grab.proximity_cull_distance, 0.2);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[gesture]\nwindow_ms = \"soon\"\n")
            .unwrap_err();
        assert!(matches!(err, GrabError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = std::env::temp_dir()
            .join(format!("handgrab-options-{}", std::process::id()));
        let path = dir.join("handgrab.toml");
        let mut opts = Options::default();
        opts.gesture.window_ms = 150;
        opts.grab.proximity_cull_distance = 0.0;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(loaded, opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("gesture"));
        assert!(props.contains_key("grab"));

        let gesture = &props["gesture"]["properties"];
        assert!(gesture.get("window_ms").is_some());
        assert!(gesture.get("margin").is_some());
        assert!(gesture.get("max_pending").is_none());

        let grab = &props["grab"]["properties"];
        assert!(grab.get("rotation_smoothing").is_some());
        assert!(grab.get("obb_epsilon").is_none());
    }
}
