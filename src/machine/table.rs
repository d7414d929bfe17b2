//! Dispatch table: state records addressed by identifier index.

use super::record::StateRecord;
use crate::core::{Hook, StateId};
use std::collections::HashMap;

/// Largest enumeration stored as a dense array. Larger domains fall back
/// to a map keyed by index.
pub(crate) const DENSE_LIMIT: usize = 256;

enum Storage<E, T> {
    Dense(Vec<Option<StateRecord<E, T>>>),
    Sparse(HashMap<usize, StateRecord<E, T>>),
}

/// Records of one machine, plus the order they were registered in.
///
/// The shape is fixed when the table is created; registration only fills
/// holes.
pub(crate) struct DispatchTable<E, T> {
    storage: Storage<E, T>,
    order: Vec<usize>,
}

impl<E: StateId, T> DispatchTable<E, T> {
    /// Table sized for the whole domain of `E`.
    pub(crate) fn for_domain() -> Self {
        let storage = if E::COUNT <= DENSE_LIMIT {
            Storage::Dense(std::iter::repeat_with(|| None).take(E::COUNT).collect())
        } else {
            Storage::Sparse(HashMap::new())
        };
        Self {
            storage,
            order: Vec::new(),
        }
    }

    pub(crate) fn is_dense(&self) -> bool {
        matches!(self.storage, Storage::Dense(_))
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&StateRecord<E, T>> {
        match &self.storage {
            Storage::Dense(slots) => slots.get(index).and_then(Option::as_ref),
            Storage::Sparse(map) => map.get(&index),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut StateRecord<E, T>> {
        match &mut self.storage {
            Storage::Dense(slots) => slots.get_mut(index).and_then(Option::as_mut),
            Storage::Sparse(map) => map.get_mut(&index),
        }
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Store `record` at its identifier's index.
    ///
    /// Hands the record back untouched if the slot is taken or outside the
    /// domain.
    pub(crate) fn insert(&mut self, record: StateRecord<E, T>) -> Result<(), StateRecord<E, T>> {
        let index = record.id().index();
        if index >= E::COUNT || self.contains(index) {
            return Err(record);
        }
        match &mut self.storage {
            Storage::Dense(slots) => slots[index] = Some(record),
            Storage::Sparse(map) => {
                map.insert(index, record);
            }
        }
        self.order.push(index);
        Ok(())
    }

    /// Run `hook` on every record, in registration order.
    pub(crate) fn invoke_all(&mut self, hook: Hook, parent: &mut T) {
        for &index in &self.order {
            let record = match &mut self.storage {
                Storage::Dense(slots) => slots[index].as_mut(),
                Storage::Sparse(map) => map.get_mut(&index),
            };
            if let Some(record) = record {
                record.invoke(hook, parent);
            }
        }
    }

    /// Identifiers in registration order.
    pub(crate) fn registered(&self) -> impl Iterator<Item = E> + '_ {
        self.order
            .iter()
            .filter_map(|&index| self.get(index).map(StateRecord::id))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}
