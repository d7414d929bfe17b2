//! Lifecycle hooks and capability tag sets.
//!
//! A [`HookSet`] records which lifecycle hooks a state type actually
//! implements. It is computed ahead of registration (normally as the
//! [`DeclaredHooks::HOOKS`] constant) and the machine only ever asks it
//! "is hook H present", once, while building a state's dispatch slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of lifecycle hooks.
pub const HOOK_COUNT: usize = 6;

/// One lifecycle hook of a state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Hook {
    /// Runs once per machine, from `initialize`.
    Initialize = 0,
    /// Runs when the state becomes active.
    Enter = 1,
    /// Per-frame tick.
    Update = 2,
    /// Fixed-timestep tick.
    FixedUpdate = 3,
    /// Tick that runs after every `Update`.
    LateUpdate = 4,
    /// Runs when the state stops being active.
    Exit = 5,
}

impl Hook {
    /// Every hook, in slot order.
    pub const ALL: [Hook; HOOK_COUNT] = [
        Hook::Initialize,
        Hook::Enter,
        Hook::Update,
        Hook::FixedUpdate,
        Hook::LateUpdate,
        Hook::Exit,
    ];

    /// Slot index of this hook.
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            Hook::Initialize => "Initialize",
            Hook::Enter => "Enter",
            Hook::Update => "Update",
            Hook::FixedUpdate => "FixedUpdate",
            Hook::LateUpdate => "LateUpdate",
            Hook::Exit => "Exit",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability tag set: the subset of lifecycle hooks a state implements.
///
/// Backed by a single byte, usable in `const` context.
///
/// # Example
///
/// ```rust
/// use statehook::core::{Hook, HookSet};
///
/// const MOVER: HookSet = HookSet::of(&[Hook::Enter, Hook::Update]);
///
/// assert!(MOVER.contains(Hook::Update));
/// assert!(!MOVER.contains(Hook::Exit));
/// assert_eq!(MOVER.len(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct HookSet(u8);

impl HookSet {
    /// No hooks at all.
    pub const EMPTY: HookSet = HookSet(0);

    /// Every lifecycle hook.
    pub const ALL: HookSet = HookSet::of(&Hook::ALL);

    /// Build a set from a list of hooks. Duplicates are ignored.
    pub const fn of(hooks: &[Hook]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < hooks.len() {
            bits |= hooks[i].bit();
            i += 1;
        }
        HookSet(bits)
    }

    /// Copy of this set with `hook` added.
    pub const fn with(self, hook: Hook) -> Self {
        HookSet(self.0 | hook.bit())
    }

    /// Copy of this set with `hook` removed.
    pub const fn without(self, hook: Hook) -> Self {
        HookSet(self.0 & !hook.bit())
    }

    /// Whether `hook` is in the set.
    pub const fn contains(self, hook: Hook) -> bool {
        self.0 & hook.bit() != 0
    }

    /// Whether the set holds no hooks.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of hooks in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Hooks in the set, in slot order.
    pub fn iter(self) -> impl Iterator<Item = Hook> {
        Hook::ALL.into_iter().filter(move |hook| self.contains(*hook))
    }
}

impl From<u8> for HookSet {
    /// Unknown bits are dropped.
    fn from(bits: u8) -> Self {
        HookSet(bits & HookSet::ALL.0)
    }
}

impl From<HookSet> for u8 {
    fn from(set: HookSet) -> Self {
        set.0
    }
}

impl FromIterator<Hook> for HookSet {
    fn from_iter<I: IntoIterator<Item = Hook>>(iter: I) -> Self {
        iter.into_iter().fold(HookSet::EMPTY, HookSet::with)
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Capability tags declared for a state type ahead of registration.
///
/// The constant is the only thing the machine consults to decide which
/// hooks get a dispatch slot; a hook method that is implemented but not
/// listed here is never called. See [`declare_hooks!`](crate::declare_hooks).
pub trait DeclaredHooks {
    /// Hooks that get a dispatch slot when the state is registered.
    const HOOKS: HookSet;
}
