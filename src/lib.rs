//! Statehook: a per-entity finite-state behavior engine
//!
//! An owning entity (the "parent") attaches a closed set of mutually
//! exclusive behavior states, keyed by an enumeration. Exactly one state is
//! active at a time; the caller drives its per-frame hooks and requests
//! transitions by identifier.
//!
//! # Core Concepts
//!
//! - **StateId**: the closed enumeration of state identifiers
//! - **Behavior**: lifecycle hooks (initialize, enter, update, fixed update,
//!   late update, exit) implemented by each state
//! - **HookSet**: the precomputed set of hooks a state implements; only
//!   those hooks get a dispatch slot
//! - **StateMachine**: the dispatch table plus transition rules
//!
//! # Example
//!
//! ```rust
//! use statehook::builder::StateMachineBuilder;
//! use statehook::core::Behavior;
//! use statehook::{declare_hooks, state_id};
//!
//! state_id! {
//!     enum Door {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Hinge {
//!     swings: u32,
//! }
//!
//! struct Closed;
//! impl Behavior<Hinge> for Closed {}
//! declare_hooks!(Closed => []);
//!
//! struct Open;
//! impl Behavior<Hinge> for Open {
//!     fn enter(&mut self, hinge: &mut Hinge) {
//!         hinge.swings += 1;
//!     }
//! }
//! declare_hooks!(Open => [Enter]);
//!
//! let mut machine = StateMachineBuilder::new(Hinge::default())
//!     .state(Door::Closed, Closed)
//!     .state(Door::Open, Open)
//!     .build()
//!     .unwrap();
//!
//! machine.initialize().unwrap();
//! machine.change_state(Door::Open).unwrap();
//! assert!(machine.change_state(Door::Open).is_err());
//! assert_eq!(machine.parent().swings, 1);
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use self::core::{Behavior, DeclaredHooks, Hook, HookSet, StateId};
pub use machine::{MachineError, StateMachine};
