//! Change notification observers.

/// Callback invoked after every successful transition with
/// `(previous, current)`. `previous` is `None` on the first transition.
pub type ChangeCallback<E> = Box<dyn FnMut(Option<E>, E)>;

/// Handle returned by `subscribe`, used to remove an observer again.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObserverId(u64);

/// Plain list of observers, notified inline in subscription order.
pub(crate) struct ChangeObservers<E> {
    next_id: u64,
    entries: Vec<(ObserverId, ChangeCallback<E>)>,
}

impl<E: Copy> ChangeObservers<E> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, callback: ChangeCallback<E>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, previous: Option<E>, current: E) {
        for (_, callback) in &mut self.entries {
            callback(previous, current);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = ChangeObservers::new();

        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            observers.subscribe(Box::new(move |prev: Option<u8>, next: u8| {
                seen.borrow_mut().push((tag, prev, next));
            }));
        }

        observers.notify(None, 1);
        observers.notify(Some(1), 2);

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a", None, 1),
                ("b", None, 1),
                ("a", Some(1), 2),
                ("b", Some(1), 2)
            ]
        );
    }

    #[test]
    fn unsubscribe_removes_only_that_observer() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = ChangeObservers::new();

        let counter = Rc::clone(&count);
        let first = observers.subscribe(Box::new(move |_: Option<u8>, _: u8| {
            *counter.borrow_mut() += 1
        }));
        let counter = Rc::clone(&count);
        observers.subscribe(Box::new(move |_: Option<u8>, _: u8| {
            *counter.borrow_mut() += 10
        }));

        assert!(observers.unsubscribe(first));
        assert!(!observers.unsubscribe(first));
        assert_eq!(observers.len(), 1);

        observers.notify(None, 0);
        assert_eq!(*count.borrow(), 10);
    }
}
