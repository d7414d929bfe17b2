//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Transitions kept by a machine's history unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 16;

/// Configuration applied to a machine before `initialize`.
///
/// # Example
///
/// ```rust
/// use statehook::machine::MachineConfig;
///
/// let config: MachineConfig<u8> = MachineConfig::default();
/// assert_eq!(config.initial_state, None);
/// assert_eq!(config.history_limit, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig<E> {
    /// State entered by `initialize`. `None` means the zero-valued identifier.
    pub initial_state: Option<E>,

    /// Maximum number of transitions kept in the history. Zero disables it.
    pub history_limit: usize,
}

impl<E> Default for MachineConfig<E> {
    fn default() -> Self {
        Self {
            initial_state: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
