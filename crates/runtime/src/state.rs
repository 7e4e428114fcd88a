//! State boundary between the version layer and the host ledger.
//!
//! The core never owns chain state: it reads through [`StateView`] and hands
//! back a [`StateDelta`] for the host to commit atomically. Mutation
//! discipline (single writer per block, snapshot isolation for speculative
//! reads) belongs to the host ledger runtime.

use std::collections::BTreeMap;
use std::fmt;

use action_core::Address;

/// Addressable location in ledger state.
///
/// Keys are account-scoped paths: the address plus a short field tag owned by
/// the collaborator (e.g. `claimed`, `balance/GOLD`). This layer treats both
/// parts as opaque.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct StateKey {
    pub address: Address,
    pub field: String,
}

impl StateKey {
    pub fn new(address: Address, field: impl Into<String>) -> Self {
        Self {
            address,
            field: field.into(),
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.field)
    }
}

/// Read-only, synchronous view of committed chain state.
///
/// All reads are local from the core's perspective; there is no blocking I/O
/// behind this trait.
pub trait StateView {
    /// Returns the raw value recorded under `key`, if any.
    fn get(&self, key: &StateKey) -> Option<Vec<u8>>;

    /// Whether any value is recorded under `key`.
    fn contains(&self, key: &StateKey) -> bool {
        self.get(key).is_some()
    }
}

/// One write produced by a successful execution.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateWrite {
    pub key: StateKey,
    pub value: Vec<u8>,
}

/// Ordered set of writes from one action (or one block, once folded).
///
/// Order is significant: the host commits writes in sequence, and later writes
/// to the same key win. A rejected transaction contributes an empty delta by
/// construction; the executor never surfaces a partial one.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateDelta {
    writes: Vec<StateWrite>,
}

impl StateDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a write at the end of the delta.
    pub fn set(&mut self, key: StateKey, value: impl Into<Vec<u8>>) {
        self.writes.push(StateWrite {
            key,
            value: value.into(),
        });
    }

    /// Appends all writes of `other`, preserving their order.
    pub fn extend(&mut self, other: StateDelta) {
        self.writes.extend(other.writes);
    }

    pub fn writes(&self) -> &[StateWrite] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

impl IntoIterator for StateDelta {
    type Item = StateWrite;
    type IntoIter = std::vec::IntoIter<StateWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// In-memory [`StateView`] used by tests and host adapters.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStateView {
    entries: BTreeMap<StateKey, Vec<u8>>,
}

impl InMemoryStateView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: StateKey, value: impl Into<Vec<u8>>) {
        self.entries.insert(key, value.into());
    }

    /// Applies a committed delta to this view.
    pub fn apply(&mut self, delta: StateDelta) {
        for write in delta {
            self.entries.insert(write.key, write.value);
        }
    }
}

impl StateView for InMemoryStateView {
    fn get(&self, key: &StateKey) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }
}

/// Copy-on-write overlay over a base view.
///
/// Used by block execution so each transaction observes the writes of the
/// transactions before it in canonical order, without mutating the base until
/// the host commits.
pub struct OverlayView<'a> {
    base: &'a dyn StateView,
    pending: BTreeMap<StateKey, Vec<u8>>,
}

impl<'a> OverlayView<'a> {
    pub fn new(base: &'a dyn StateView) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Folds a committed delta into the overlay.
    pub fn apply(&mut self, delta: &StateDelta) {
        for write in delta.writes() {
            self.pending.insert(write.key.clone(), write.value.clone());
        }
    }
}

impl StateView for OverlayView<'_> {
    fn get(&self, key: &StateKey) -> Option<Vec<u8>> {
        self.pending
            .get(key)
            .cloned()
            .or_else(|| self.base.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tag: u8, field: &str) -> StateKey {
        StateKey::new(Address([tag; 20]), field)
    }

    #[test]
    fn overlay_prefers_pending_writes_over_base() {
        let mut base = InMemoryStateView::new();
        base.set(key(1, "balance"), b"100".to_vec());

        let mut overlay = OverlayView::new(&base);
        assert_eq!(overlay.get(&key(1, "balance")), Some(b"100".to_vec()));

        let mut delta = StateDelta::new();
        delta.set(key(1, "balance"), b"90".to_vec());
        overlay.apply(&delta);

        assert_eq!(overlay.get(&key(1, "balance")), Some(b"90".to_vec()));
        // Base stays untouched until the host commits.
        assert_eq!(base.get(&key(1, "balance")), Some(b"100".to_vec()));
    }

    #[test]
    fn delta_preserves_write_order() {
        let mut delta = StateDelta::new();
        delta.set(key(1, "a"), b"1".to_vec());
        delta.set(key(2, "b"), b"2".to_vec());
        delta.set(key(1, "a"), b"3".to_vec());
        let fields: Vec<_> = delta.writes().iter().map(|w| w.value.clone()).collect();
        assert_eq!(fields, vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]);
    }
}
