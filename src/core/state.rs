//! State identifiers.
//!
//! Every machine is parameterized by one closed enumeration of state
//! identifiers. The identifier is only a key: the behavior attached to it
//! lives in a [`Behavior`](crate::core::Behavior) registered on the machine.

use std::fmt::Debug;

/// Closed, densely packed enumeration of state identifiers.
///
/// `index` maps every identifier into `0..COUNT`; the machine uses it to
/// address its dispatch table directly. Implementations must keep
/// `from_index(id.index()) == Some(id)` for every valid identifier.
///
/// Most enums should use the [`state_id!`](crate::state_id) macro instead
/// of implementing this by hand.
///
/// # Example
///
/// ```rust
/// use statehook::core::StateId;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Stance {
///     Idle,
///     Crouch,
/// }
///
/// impl StateId for Stance {
///     const COUNT: usize = 2;
///
///     fn index(self) -> usize {
///         self as usize
///     }
///
///     fn from_index(index: usize) -> Option<Self> {
///         match index {
///             0 => Some(Self::Idle),
///             1 => Some(Self::Crouch),
///             _ => None,
///         }
///     }
///
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Crouch => "Crouch",
///         }
///     }
/// }
///
/// assert_eq!(Stance::Crouch.index(), 1);
/// assert_eq!(Stance::from_index(0), Some(Stance::Idle));
/// ```
pub trait StateId: Copy + Eq + Debug + 'static {
    /// Cardinality of the enumeration.
    const COUNT: usize;

    /// Position of this identifier in the dispatch table.
    fn index(self) -> usize;

    /// Inverse of [`index`](StateId::index). `None` outside `0..COUNT`.
    fn from_index(index: usize) -> Option<Self>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// The zero-valued identifier, used as the default initial state.
    fn first() -> Option<Self> {
        Self::from_index(0)
    }
}
