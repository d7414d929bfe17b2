//! Property-based tests for the behavior machine.
//!
//! Random operation sequences run against both the machine and a small
//! reference model; every hook call the machine makes must match the model.

use chrono::Utc;
use proptest::prelude::*;
use statehook::core::{Behavior, Hook, HookSet, StateHistory, StateId, StateTransition};
use statehook::machine::{MachineError, StateMachine};

const DOMAIN: u8 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Slot(u8);

impl StateId for Slot {
    const COUNT: usize = DOMAIN as usize;

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then_some(Slot(index as u8))
    }

    fn name(&self) -> &str {
        ["A", "B", "C", "D", "E"]
            .get(self.0 as usize)
            .copied()
            .unwrap_or("Unknown")
    }
}

#[derive(Default)]
struct Journal {
    calls: Vec<(Hook, u8)>,
}

struct Probe(u8);

impl Behavior<Journal> for Probe {
    fn initialize(&mut self, journal: &mut Journal) {
        journal.calls.push((Hook::Initialize, self.0));
    }

    fn enter(&mut self, journal: &mut Journal) {
        journal.calls.push((Hook::Enter, self.0));
    }

    fn update(&mut self, journal: &mut Journal) {
        journal.calls.push((Hook::Update, self.0));
    }

    fn fixed_update(&mut self, journal: &mut Journal) {
        journal.calls.push((Hook::FixedUpdate, self.0));
    }

    fn late_update(&mut self, journal: &mut Journal) {
        journal.calls.push((Hook::LateUpdate, self.0));
    }

    fn exit(&mut self, journal: &mut Journal) {
        journal.calls.push((Hook::Exit, self.0));
    }
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Change(u8),
    Update,
    FixedUpdate,
    LateUpdate,
    Reset(u8),
}

prop_compose! {
    /// Hook sets for each slot of the domain; `None` leaves the slot empty.
    fn arbitrary_layout()(
        slots in prop::collection::vec(prop::option::of(0u8..64), DOMAIN as usize)
    ) -> Vec<Option<HookSet>> {
        slots.into_iter().map(|bits| bits.map(HookSet::from)).collect()
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    // Targets past the domain exercise out-of-range identifiers.
    prop_oneof![
        3 => (0u8..DOMAIN + 2).prop_map(Op::Change),
        2 => Just(Op::Update),
        1 => Just(Op::FixedUpdate),
        1 => Just(Op::LateUpdate),
        1 => (0u8..DOMAIN + 2).prop_map(Op::Reset),
    ]
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arbitrary_op(), 0..40)
}

fn build(layout: &[Option<HookSet>]) -> StateMachine<Slot, Journal> {
    let mut machine = StateMachine::new(Journal::default());
    for (slot, hooks) in layout.iter().enumerate() {
        if let Some(hooks) = hooks {
            let id = slot as u8;
            machine
                .register_with_hooks(Slot(id), Probe(id), *hooks)
                .unwrap();
        }
    }
    machine
}

fn apply(machine: &mut StateMachine<Slot, Journal>, op: Op) -> Result<(), MachineError> {
    match op {
        Op::Change(target) => machine.change_state(Slot(target)),
        Op::Update => machine.update(),
        Op::FixedUpdate => machine.fixed_update(),
        Op::LateUpdate => machine.late_update(),
        Op::Reset(target) => machine.reset_state(Slot(target)),
    }
}

/// Reference model of the transition rules.
struct Model {
    layout: Vec<Option<HookSet>>,
    current: Option<u8>,
    previous: Option<u8>,
}

impl Model {
    fn new(layout: Vec<Option<HookSet>>) -> Self {
        Self {
            layout,
            current: None,
            previous: None,
        }
    }

    fn hooks(&self, slot: u8) -> Option<HookSet> {
        self.layout.get(slot as usize).copied().flatten()
    }

    fn call(&self, slot: u8, hook: Hook, calls: &mut Vec<(Hook, u8)>) {
        if self.hooks(slot).is_some_and(|hooks| hooks.contains(hook)) {
            calls.push((hook, slot));
        }
    }

    /// Whether `op` succeeds, and the hook calls it makes.
    fn apply(&mut self, op: Op) -> (bool, Vec<(Hook, u8)>) {
        let mut calls = Vec::new();
        match op {
            Op::Change(target) => {
                if self.current == Some(target) || self.hooks(target).is_none() {
                    return (false, calls);
                }
                if let Some(current) = self.current {
                    self.call(current, Hook::Exit, &mut calls);
                }
                self.previous = self.current;
                self.current = Some(target);
                self.call(target, Hook::Enter, &mut calls);
            }
            Op::Update | Op::FixedUpdate | Op::LateUpdate => {
                let hook = match op {
                    Op::Update => Hook::Update,
                    Op::FixedUpdate => Hook::FixedUpdate,
                    _ => Hook::LateUpdate,
                };
                if let Some(current) = self.current {
                    self.call(current, hook, &mut calls);
                }
            }
            Op::Reset(target) => {
                if self.hooks(target).is_none() {
                    return (false, calls);
                }
                self.call(target, Hook::Exit, &mut calls);
                self.call(target, Hook::Enter, &mut calls);
            }
        }
        (true, calls)
    }
}

proptest! {
    #[test]
    fn machine_matches_model(layout in arbitrary_layout(), ops in arbitrary_ops()) {
        let mut machine = build(&layout);
        let mut model = Model::new(layout);

        for op in ops {
            let before = machine.parent().calls.len();
            let result = apply(&mut machine, op);
            let (ok, expected) = model.apply(op);

            prop_assert_eq!(result.is_ok(), ok, "{:?} -> {:?}", op, result);
            prop_assert_eq!(&machine.parent().calls[before..], expected.as_slice());
            prop_assert_eq!(machine.current(), model.current.map(Slot));
            prop_assert_eq!(machine.previous(), model.previous.map(Slot));
        }
    }

    #[test]
    fn self_transition_is_rejected(layout in arbitrary_layout(), ops in arbitrary_ops()) {
        let mut machine = build(&layout);
        for op in ops {
            let _ = apply(&mut machine, op);
        }

        if let Some(current) = machine.current() {
            let previous = machine.previous();
            let before = machine.parent().calls.len();

            let result = machine.change_state(current);

            let is_self_transition = matches!(result, Err(MachineError::SelfTransition { .. }));
            prop_assert!(is_self_transition);
            prop_assert_eq!(machine.parent().calls.len(), before);
            prop_assert_eq!(machine.current(), Some(current));
            prop_assert_eq!(machine.previous(), previous);
        }
    }

    #[test]
    fn first_transition_never_exits(layout in arbitrary_layout(), target in 0..DOMAIN) {
        let mut machine = build(&layout);

        let result = machine.change_state(Slot(target));

        if layout[target as usize].is_some() {
            prop_assert!(result.is_ok());
            prop_assert!(machine.parent().calls.iter().all(|(hook, _)| *hook == Hook::Enter));
            prop_assert_eq!(machine.previous(), None);
        } else {
            prop_assert_eq!(result, Err(MachineError::UnregisteredTarget { index: target as usize }));
            prop_assert!(machine.parent().calls.is_empty());
            prop_assert_eq!(machine.current(), None);
        }
    }

    #[test]
    fn unregistered_target_leaves_machine_untouched(
        layout in arbitrary_layout(),
        ops in arbitrary_ops(),
        target in any::<u8>(),
    ) {
        let mut machine = build(&layout);
        for op in ops {
            let _ = apply(&mut machine, op);
        }
        prop_assume!(layout.get(target as usize).copied().flatten().is_none());

        let (current, previous) = (machine.current(), machine.previous());
        let before = machine.parent().calls.len();

        let result = machine.change_state(Slot(target));

        prop_assert_eq!(result, Err(MachineError::UnregisteredTarget { index: target as usize }));
        prop_assert_eq!(machine.parent().calls.len(), before);
        prop_assert_eq!(machine.current(), current);
        prop_assert_eq!(machine.previous(), previous);
    }

    #[test]
    fn empty_hook_set_is_never_dispatched(ops in arbitrary_ops()) {
        let silent = DOMAIN - 1;
        let mut machine = StateMachine::new(Journal::default());
        for slot in 0..DOMAIN {
            let hooks = if slot == silent { HookSet::EMPTY } else { HookSet::ALL };
            machine.register_with_hooks(Slot(slot), Probe(slot), hooks).unwrap();
        }
        machine.initialize().unwrap();

        for op in ops {
            let _ = apply(&mut machine, op);
            let _ = machine.change_state(Slot(silent));
            let _ = machine.update();
        }

        prop_assert!(machine.parent().calls.iter().all(|(_, slot)| *slot != silent));
    }

    #[test]
    fn repeated_updates_are_stable(
        layout in arbitrary_layout(),
        ops in arbitrary_ops(),
        repeats in 1usize..8,
    ) {
        let mut machine = build(&layout);
        for op in ops {
            let _ = apply(&mut machine, op);
        }
        let bound: Vec<_> = (0..DOMAIN).map(|slot| machine.hooks_of(Slot(slot))).collect();

        let mut per_call = Vec::new();
        for _ in 0..repeats {
            let before = machine.parent().calls.len();
            machine.update().unwrap();
            per_call.push(machine.parent().calls[before..].to_vec());
        }

        prop_assert!(per_call.windows(2).all(|pair| pair[0] == pair[1]));
        prop_assert!(per_call[0].len() <= 1);
        let after: Vec<_> = (0..DOMAIN).map(|slot| machine.hooks_of(Slot(slot))).collect();
        prop_assert_eq!(bound, after);
    }

    #[test]
    fn history_respects_limit(
        states in prop::collection::vec(0u8..DOMAIN, 0..30),
        limit in 0usize..10,
    ) {
        let mut history = StateHistory::with_limit(limit);
        let mut from = None;
        for to in states.iter().copied() {
            history.record(StateTransition { from, to, timestamp: Utc::now() });
            from = Some(to);
        }

        prop_assert_eq!(history.len(), states.len().min(limit));
        if limit > 0 {
            prop_assert_eq!(history.last().map(|t| t.to), states.last().copied());
        }
    }
}
