// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Hand-tracked grab interaction for XR scenes.
//!
//! Handgrab turns raw hand input (optical hand-tracking joints or a
//! controller grip pose) into a stable hand frame, debounces the
//! thumb-to-index distance into discrete pinch events, and lets those events
//! pick up, carry and release virtual objects tested with oriented
//! bounding boxes.
//!
//! # Key entry points
//!
//! - [`engine::InteractionEngine`] - feed input events, tick once per frame
//! - [`hand::HandModel`] - skeleton plus placement; hand frame queries
//! - [`gesture::PinchDetector`] - the debounced pinch state machine
//! - [`grab::Grabbable`] - one object's grab/carry/release protocol
//! - [`options::Options`] - tunable thresholds, loadable from TOML
//!
//! # Architecture
//!
//! Everything runs on the caller's frame loop. Rig loading happens on a
//! background thread whose result the tick polls, and tracking threads can
//! publish joints through a lock-free [`input::JointFeed`]. Within a tick
//! each hand's gesture detection runs before any object is moved.

pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod grab;
pub mod hand;
pub mod input;
pub mod interaction;
pub mod options;
