//! The state machine engine: registration, transitions and tick dispatch.

use super::config::MachineConfig;
use super::error::MachineError;
use super::observer::{ChangeCallback, ChangeObservers, ObserverId};
use super::record::StateRecord;
use super::table::DispatchTable;
use crate::core::{
    Behavior, DeclaredHooks, Hook, HookSet, StateHistory, StateId, StateTransition,
};
use chrono::Utc;
use std::fmt;
use tracing::{debug, trace};

/// Per-entity finite-state behavior machine.
///
/// Owns the parent context `T`, one behavior per registered identifier of
/// `E`, and the current/previous active identifiers. Both start unset,
/// which is distinct from every identifier, including the zero-valued one.
///
/// Lifecycle: register states, call [`initialize`](Self::initialize) once,
/// then drive [`change_state`](Self::change_state) and the tick
/// dispatchers. [`teardown`](Self::teardown) drops every state; any call
/// after it fails with [`MachineError::TornDown`].
///
/// The machine is single-threaded. Callers sharing one across threads must
/// lock around the whole call sequence.
///
/// # Example
///
/// ```rust
/// use statehook::core::{Behavior, StateId};
/// use statehook::machine::StateMachine;
/// use statehook::{declare_hooks, state_id};
///
/// state_id! {
///     enum Pose {
///         Idle,
///         Walk,
///     }
/// }
///
/// #[derive(Default)]
/// struct Actor {
///     steps: u32,
/// }
///
/// struct Idle;
/// impl Behavior<Actor> for Idle {}
/// declare_hooks!(Idle => []);
///
/// struct Walk;
/// impl Behavior<Actor> for Walk {
///     fn update(&mut self, actor: &mut Actor) {
///         actor.steps += 1;
///     }
/// }
/// declare_hooks!(Walk => [Update]);
///
/// let mut machine = StateMachine::new(Actor::default());
/// machine.register(Pose::Idle, Idle).unwrap();
/// machine.register(Pose::Walk, Walk).unwrap();
/// machine.initialize().unwrap();
/// assert_eq!(machine.current(), Some(Pose::Idle));
///
/// machine.change_state(Pose::Walk).unwrap();
/// machine.update().unwrap();
/// machine.update().unwrap();
/// assert_eq!(machine.parent().steps, 2);
/// ```
pub struct StateMachine<E: StateId, T> {
    parent: T,
    table: Option<DispatchTable<E, T>>,
    current: Option<E>,
    previous: Option<E>,
    initial: Option<E>,
    initialized: bool,
    observers: ChangeObservers<E>,
    history: StateHistory<E>,
}

impl<E: StateId, T> StateMachine<E, T> {
    /// Create an empty machine owning `parent`, with default configuration.
    pub fn new(parent: T) -> Self {
        Self::with_config(parent, MachineConfig::default())
    }

    /// Create an empty machine owning `parent`.
    pub fn with_config(parent: T, config: MachineConfig<E>) -> Self {
        Self {
            parent,
            table: Some(DispatchTable::for_domain()),
            current: None,
            previous: None,
            initial: config.initial_state,
            initialized: false,
            observers: ChangeObservers::new(),
            history: StateHistory::with_limit(config.history_limit),
        }
    }

    /// Register `state` under `id`, using the hooks its type declares.
    ///
    /// Rejected without side effects if `id` is already taken, lies outside
    /// the domain, or the machine was torn down. No hook runs.
    pub fn register<S>(&mut self, id: E, state: S) -> Result<(), MachineError>
    where
        S: Behavior<T> + DeclaredHooks + 'static,
    {
        self.register_boxed(id, Box::new(state), S::HOOKS)
    }

    /// Register `state` under `id` with an explicitly supplied hook set.
    ///
    /// Only hooks in `hooks` are ever dispatched, whatever `S` implements.
    pub fn register_with_hooks<S>(
        &mut self,
        id: E,
        state: S,
        hooks: HookSet,
    ) -> Result<(), MachineError>
    where
        S: Behavior<T> + 'static,
    {
        self.register_boxed(id, Box::new(state), hooks)
    }

    pub(crate) fn register_boxed(
        &mut self,
        id: E,
        state: Box<dyn Behavior<T>>,
        hooks: HookSet,
    ) -> Result<(), MachineError> {
        let table = self.table.as_mut().ok_or(MachineError::TornDown)?;
        let index = id.index();
        if index >= E::COUNT {
            debug!(index, count = E::COUNT, "Rejected registration outside domain");
            return Err(MachineError::OutOfDomain {
                index,
                count: E::COUNT,
            });
        }

        table
            .insert(StateRecord::new(id, state, hooks))
            .map_err(|_| {
                debug!(state = id.name(), "Rejected duplicate registration");
                MachineError::DuplicateState {
                    state: id.name().to_string(),
                }
            })?;

        debug!(state = id.name(), hooks = ?hooks, "Registered state");
        Ok(())
    }

    /// Choose the state entered by `initialize`.
    ///
    /// The target does not have to be registered yet; `initialize` checks.
    pub fn set_initial_state(&mut self, id: E) -> Result<(), MachineError> {
        if self.table.is_none() {
            return Err(MachineError::TornDown);
        }
        if id.index() >= E::COUNT {
            return Err(MachineError::OutOfDomain {
                index: id.index(),
                count: E::COUNT,
            });
        }
        self.initial = Some(id);
        Ok(())
    }

    /// State entered by `initialize`: the configured one, else the
    /// zero-valued identifier.
    pub fn initial_state(&self) -> Option<E> {
        self.initial.or_else(E::first)
    }

    /// Run every registered state's Initialize hook, in registration order,
    /// then transition to the initial state.
    ///
    /// Only the first successful call does anything; later calls return
    /// `Ok(())` without running any hook. Fails without running any hook if
    /// the initial state is not registered.
    pub fn initialize(&mut self) -> Result<(), MachineError> {
        let table = self.table.as_mut().ok_or(MachineError::TornDown)?;
        if self.initialized {
            trace!("Machine already initialized, ignoring");
            return Ok(());
        }

        let initial = self
            .initial
            .or_else(E::first)
            .ok_or(MachineError::NoInitialState)?;
        if !table.contains(initial.index()) {
            return Err(MachineError::UnregisteredTarget {
                index: initial.index(),
            });
        }

        table.invoke_all(Hook::Initialize, &mut self.parent);
        self.initialized = true;
        debug!(
            states = table.len(),
            initial = initial.name(),
            "Initialized machine"
        );

        if self.current == Some(initial) {
            return Ok(());
        }
        self.change_state(initial)
    }

    /// Make `target` the active state.
    ///
    /// Runs the current state's Exit hook (skipped on the very first
    /// transition), updates current/previous, runs the target's Enter hook,
    /// then notifies observers with `(previous, current)`.
    ///
    /// Rejected with no side effects when `target` is already active or has
    /// no registered state.
    pub fn change_state(&mut self, target: E) -> Result<(), MachineError> {
        let table = self.table.as_mut().ok_or(MachineError::TornDown)?;

        if self.current == Some(target) {
            trace!(state = target.name(), "Rejected self-transition");
            return Err(MachineError::SelfTransition {
                state: target.name().to_string(),
            });
        }
        if !table.contains(target.index()) {
            trace!(index = target.index(), "Rejected unregistered target");
            return Err(MachineError::UnregisteredTarget {
                index: target.index(),
            });
        }

        if let Some(current) = self.current {
            if let Some(record) = table.get_mut(current.index()) {
                record.invoke(Hook::Exit, &mut self.parent);
            }
        }

        self.previous = self.current;
        self.current = Some(target);

        if let Some(record) = table.get_mut(target.index()) {
            record.invoke(Hook::Enter, &mut self.parent);
        }

        self.history.record(StateTransition {
            from: self.previous,
            to: target,
            timestamp: Utc::now(),
        });
        self.observers.notify(self.previous, target);

        debug!(
            from = self.previous.as_ref().map_or("<unset>", StateId::name),
            to = target.name(),
            "State changed"
        );
        Ok(())
    }

    /// Run the active state's Update hook, if it has one.
    #[inline]
    pub fn update(&mut self) -> Result<(), MachineError> {
        self.dispatch(Hook::Update)
    }

    /// Run the active state's FixedUpdate hook, if it has one.
    #[inline]
    pub fn fixed_update(&mut self) -> Result<(), MachineError> {
        self.dispatch(Hook::FixedUpdate)
    }

    /// Run the active state's LateUpdate hook, if it has one.
    #[inline]
    pub fn late_update(&mut self) -> Result<(), MachineError> {
        self.dispatch(Hook::LateUpdate)
    }

    #[inline]
    fn dispatch(&mut self, hook: Hook) -> Result<(), MachineError> {
        let table = self.table.as_mut().ok_or(MachineError::TornDown)?;
        let Some(current) = self.current else {
            return Ok(());
        };
        if let Some(record) = table.get_mut(current.index()) {
            record.invoke(hook, &mut self.parent);
        }
        Ok(())
    }

    /// Run `id`'s Exit hook then its Enter hook.
    ///
    /// Current/previous are left alone and observers are not notified.
    pub fn reset_state(&mut self, id: E) -> Result<(), MachineError> {
        let table = self.table.as_mut().ok_or(MachineError::TornDown)?;
        let record = table
            .get_mut(id.index())
            .ok_or(MachineError::UnregisteredTarget { index: id.index() })?;

        record.invoke(Hook::Exit, &mut self.parent);
        record.invoke(Hook::Enter, &mut self.parent);
        debug!(state = id.name(), "Reset state");
        Ok(())
    }

    /// Drop every registered state and observer.
    ///
    /// No hook runs. Every later operation, including a second teardown,
    /// fails with [`MachineError::TornDown`].
    pub fn teardown(&mut self) -> Result<(), MachineError> {
        let table = self.table.take().ok_or(MachineError::TornDown)?;
        let released = table.len();
        drop(table);

        self.observers.clear();
        self.current = None;
        self.previous = None;
        debug!(released, "Tore down machine");
        Ok(())
    }

    /// Register a change observer, called after every successful transition.
    pub fn subscribe<F>(&mut self, callback: F) -> Result<ObserverId, MachineError>
    where
        F: FnMut(Option<E>, E) + 'static,
    {
        self.subscribe_boxed(Box::new(callback))
    }

    pub(crate) fn subscribe_boxed(
        &mut self,
        callback: ChangeCallback<E>,
    ) -> Result<ObserverId, MachineError> {
        if self.table.is_none() {
            return Err(MachineError::TornDown);
        }
        Ok(self.observers.subscribe(callback))
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// The active state, `None` before the first transition.
    pub fn current(&self) -> Option<E> {
        self.current
    }

    /// The state active before the last transition.
    pub fn previous(&self) -> Option<E> {
        self.previous
    }

    /// Whether `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether `teardown` has run.
    pub fn is_torn_down(&self) -> bool {
        self.table.is_none()
    }

    /// Whether a state is registered under `id`.
    pub fn is_registered(&self, id: E) -> bool {
        self.table
            .as_ref()
            .is_some_and(|table| table.contains(id.index()))
    }

    /// Hooks bound for `id`, `None` if nothing is registered there.
    pub fn hooks_of(&self, id: E) -> Option<HookSet> {
        self.table
            .as_ref()?
            .get(id.index())
            .map(StateRecord::hooks)
    }

    /// Number of registered states.
    pub fn registered_count(&self) -> usize {
        self.table.as_ref().map_or(0, DispatchTable::len)
    }

    /// Registered identifiers, in registration order.
    pub fn registered(&self) -> impl Iterator<Item = E> + '_ {
        self.table.iter().flat_map(DispatchTable::registered)
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> &StateHistory<E> {
        &self.history
    }

    /// Shared access to the parent context.
    pub fn parent(&self) -> &T {
        &self.parent
    }

    /// Mutable access to the parent context.
    pub fn parent_mut(&mut self) -> &mut T {
        &mut self.parent
    }

    /// Consume the machine, dropping every state, and return the parent.
    pub fn into_parent(self) -> T {
        self.parent
    }
}

impl<E: StateId, T> fmt::Debug for StateMachine<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("registered", &self.registered_count())
            .field("initialized", &self.initialized)
            .field("torn_down", &self.is_torn_down())
            .finish_non_exhaustive()
    }
}
