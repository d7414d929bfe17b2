//! State transition history tracking.
//!
//! Keeps the most recent transitions of a machine in a bounded ring, for
//! diagnostics. Storage for small limits is reserved up front so recording
//! a transition in steady state does not allocate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Most entries reserved when a history is created. Larger limits grow
/// on demand.
const PREALLOCATED: usize = 64;

/// Record of a single successful transition.
///
/// `from` is `None` for the first transition of a machine.
///
/// # Example
///
/// ```rust
/// use statehook::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: None,
///     to: 3u8,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.is_first());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<E> {
    /// The state being left, unset on the first transition
    pub from: Option<E>,
    /// The state being entered
    pub to: E,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<E> StateTransition<E> {
    /// Whether this transition left no prior state behind.
    pub fn is_first(&self) -> bool {
        self.from.is_none()
    }
}

/// Bounded, ordered history of transitions.
///
/// Holds at most `limit` entries; recording past the limit drops the
/// oldest entry. A limit of zero disables recording.
///
/// # Example
///
/// ```rust
/// use statehook::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(2);
/// for (from, to) in [(None, 0u8), (Some(0), 1), (Some(1), 2)] {
///     history.record(StateTransition { from, to, timestamp: Utc::now() });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&0, &1, &2]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<E> {
    transitions: VecDeque<StateTransition<E>>,
    limit: usize,
}

impl<E> StateHistory<E> {
    /// Create an empty history keeping at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(PREALLOCATED)),
            limit,
        }
    }

    /// Record a transition, evicting the oldest entry when full.
    pub fn record(&mut self, transition: StateTransition<E>) {
        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed by the retained transitions.
    ///
    /// Starts with the `from` state of the oldest retained transition (when
    /// it has one), followed by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&E> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<E>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<E>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
