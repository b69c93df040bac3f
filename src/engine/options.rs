//! Options methods for [`InteractionEngine`].

use super::InteractionEngine;
use crate::options::Options;

impl InteractionEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and push them to the pinch detectors.
    ///
    /// Grab parameters are read on every grab and carry step, so they
    /// take effect immediately.
    pub fn set_options(&mut self, new: Options) {
        for detector in &mut self.detectors {
            detector.set_options(new.gesture.clone());
        }
        self.options = new;
    }
}
