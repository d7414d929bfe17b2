//! Errors reported by the machine engine.

use thiserror::Error;

/// Errors that can occur while configuring or driving a state machine.
///
/// Every variant is reported before any hook runs or any field changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("State '{state}' is already registered")]
    DuplicateState { state: String },

    #[error("State index {index} is outside the enumeration domain (0..{count})")]
    OutOfDomain { index: usize, count: usize },

    #[error("State '{state}' is already active")]
    SelfTransition { state: String },

    #[error("No state registered at index {index}")]
    UnregisteredTarget { index: usize },

    #[error("The state enumeration is empty, there is no initial state")]
    NoInitialState,

    #[error("The state machine has been torn down")]
    TornDown,
}
