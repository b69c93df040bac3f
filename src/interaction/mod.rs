//! Shared interaction state: hand models and who holds what.

mod coordinator;

pub use coordinator::InteractionCoordinator;
