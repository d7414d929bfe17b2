//! Core vocabulary of the behavior engine.
//!
//! - State identifiers via the `StateId` trait
//! - Lifecycle hooks and capability tag sets (`Hook`, `HookSet`)
//! - The `Behavior` trait implemented by each state
//! - Bounded transition history
//!
//! Nothing in this module owns a machine; the engine lives in
//! [`crate::machine`].

mod behavior;
mod history;
mod hooks;
mod state;

pub use behavior::Behavior;
pub use history::{StateHistory, StateTransition};
pub use hooks::{DeclaredHooks, Hook, HookSet, HOOK_COUNT};
pub use state::StateId;
