//! Build errors for the state machine builder.

use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("No states defined. Add at least one state with .state(id, behavior)")]
    NoStates,

    #[error("Initial state '{state}' has no registered behavior")]
    InitialStateNotRegistered { state: String },

    #[error(transparent)]
    Machine(#[from] MachineError),
}
