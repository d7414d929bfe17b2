//! State records: one registered state plus its bound hook slots.

use crate::core::{Behavior, Hook, HookSet, StateId, HOOK_COUNT};

/// Direct binding of one hook to a state's method.
pub(crate) type HookFn<T> = fn(&mut dyn Behavior<T>, &mut T);

fn call_initialize<T>(state: &mut dyn Behavior<T>, parent: &mut T) {
    state.initialize(parent)
}

fn call_enter<T>(state: &mut dyn Behavior<T>, parent: &mut T) {
    state.enter(parent)
}

fn call_update<T>(state: &mut dyn Behavior<T>, parent: &mut T) {
    state.update(parent)
}

fn call_fixed_update<T>(state: &mut dyn Behavior<T>, parent: &mut T) {
    state.fixed_update(parent)
}

fn call_late_update<T>(state: &mut dyn Behavior<T>, parent: &mut T) {
    state.late_update(parent)
}

fn call_exit<T>(state: &mut dyn Behavior<T>, parent: &mut T) {
    state.exit(parent)
}

fn bind<T>(hook: Hook) -> HookFn<T> {
    match hook {
        Hook::Initialize => call_initialize::<T>,
        Hook::Enter => call_enter::<T>,
        Hook::Update => call_update::<T>,
        Hook::FixedUpdate => call_fixed_update::<T>,
        Hook::LateUpdate => call_late_update::<T>,
        Hook::Exit => call_exit::<T>,
    }
}

/// A registered state and its dispatch slots.
///
/// Invariant: `slots[h]` is `Some` iff `hooks` contains `h`. Both are fixed
/// at construction.
pub(crate) struct StateRecord<E, T> {
    id: E,
    hooks: HookSet,
    slots: [Option<HookFn<T>>; HOOK_COUNT],
    state: Box<dyn Behavior<T>>,
}

impl<E: StateId, T> StateRecord<E, T> {
    pub(crate) fn new(id: E, state: Box<dyn Behavior<T>>, hooks: HookSet) -> Self {
        let slots = Hook::ALL.map(|hook| hooks.contains(hook).then(|| bind::<T>(hook)));
        Self {
            id,
            hooks,
            slots,
            state,
        }
    }

    pub(crate) fn id(&self) -> E {
        self.id
    }

    pub(crate) fn hooks(&self) -> HookSet {
        self.hooks
    }

    /// Run `hook` if this record has a slot for it. Returns whether it ran.
    #[inline]
    pub(crate) fn invoke(&mut self, hook: Hook, parent: &mut T) -> bool {
        match self.slots[hook.index()] {
            Some(call) => {
                call(self.state.as_mut(), parent);
                true
            }
            None => false,
        }
    }
}
