//! The behavior machine engine.
//!
//! Registration turns each state and its declared `HookSet` into a record
//! with one optional function binding per hook. Records live in a table
//! indexed by `StateId::index`, so every tick is a single indexed lookup
//! plus at most one indirect call, with no allocation and no scan.
//!
//! # Transition Rules
//!
//! - A transition to the active state is rejected
//! - A transition to an unregistered state is rejected
//! - The first transition runs no Exit hook
//! - Exit of the old state completes before Enter of the new one
//! - Observers are notified after Enter

mod config;
mod engine;
mod error;
mod observer;
mod record;
mod table;

pub use config::{MachineConfig, DEFAULT_HISTORY_LIMIT};
pub use engine::StateMachine;
pub use error::MachineError;
pub use observer::{ChangeCallback, ObserverId};
