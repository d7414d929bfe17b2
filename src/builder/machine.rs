//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Behavior, DeclaredHooks, HookSet, StateId};
use crate::machine::{ChangeCallback, MachineConfig, MachineError, StateMachine};

struct PendingState<E, T> {
    id: E,
    behavior: Box<dyn Behavior<T>>,
    hooks: HookSet,
}

/// Builder for constructing state machines with a fluent API.
///
/// Nothing is validated until [`build`](Self::build), which registers the
/// states in the order they were added.
pub struct StateMachineBuilder<E: StateId, T> {
    parent: T,
    config: MachineConfig<E>,
    states: Vec<PendingState<E, T>>,
    observers: Vec<ChangeCallback<E>>,
}

impl<E: StateId, T> StateMachineBuilder<E, T> {
    /// Create a new builder around the parent context.
    pub fn new(parent: T) -> Self {
        Self {
            parent,
            config: MachineConfig::default(),
            states: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig<E>) -> Self {
        self.config = config;
        self
    }

    /// Set the state entered by `initialize`.
    pub fn initial(mut self, id: E) -> Self {
        self.config.initial_state = Some(id);
        self
    }

    /// Set how many transitions the history keeps.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Add a state using the hooks its type declares.
    pub fn state<S>(self, id: E, behavior: S) -> Self
    where
        S: Behavior<T> + DeclaredHooks + 'static,
    {
        self.state_with_hooks(id, behavior, S::HOOKS)
    }

    /// Add a state with an explicit hook set.
    pub fn state_with_hooks<S>(mut self, id: E, behavior: S, hooks: HookSet) -> Self
    where
        S: Behavior<T> + 'static,
    {
        self.states.push(PendingState {
            id,
            behavior: Box::new(behavior),
            hooks,
        });
        self
    }

    /// Add a change observer.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Option<E>, E) + 'static,
    {
        self.observers.push(Box::new(callback));
        self
    }

    /// Build the state machine.
    ///
    /// Fails if no state was added, two states share an identifier, or the
    /// initial state has no behavior. The machine is returned uninitialized.
    pub fn build(self) -> Result<StateMachine<E, T>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let initial = self.config.initial_state;
        let mut machine = StateMachine::with_config(self.parent, self.config);
        if let Some(id) = initial {
            machine.set_initial_state(id)?;
        }

        for pending in self.states {
            machine.register_boxed(pending.id, pending.behavior, pending.hooks)?;
        }

        let initial = machine
            .initial_state()
            .ok_or(MachineError::NoInitialState)?;
        if !machine.is_registered(initial) {
            return Err(BuildError::InitialStateNotRegistered {
                state: initial.name().to_string(),
            });
        }

        for observer in self.observers {
            machine.subscribe_boxed(observer)?;
        }

        Ok(machine)
    }
}
