//! Obsolescence metadata registry.
//!
//! An explicit, statically inspectable table mapping every known
//! `(kind, generation)` to the first block height at which that generation is
//! rejected. The table is populated once at startup ([`ObsolescenceTable::
//! builtin`]) and is append-only across releases: entries are never mutated or
//! removed, so every historical generation stays resolvable for replay.
//!
//! # Invariants
//!
//! - Within a kind, generations are strictly ascending.
//! - Every generation except the newest carries `Some(obsolete_at)`, strictly
//!   increasing with the generation.
//! - The newest generation is unbounded (`None`).
//!
//! Together these guarantee at most one active generation per kind at any
//! height, with non-overlapping ranges covering `[0, ∞)` gap-free.

use std::collections::BTreeMap;

use crate::types::BlockIndex;
use crate::version::{ActionKind, ActionVersion, Generation, VersionMetadata};

/// Errors raised while building or validating an [`ObsolescenceTable`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("version {version} declared twice")]
    DuplicateDeclaration { version: ActionVersion },

    #[error("kind {kind}: generation {generation} is unbounded but not the newest")]
    UnboundedNotNewest {
        kind: ActionKind,
        generation: Generation,
    },

    #[error("kind {kind}: newest generation {generation} must be unbounded")]
    BoundedNewest {
        kind: ActionKind,
        generation: Generation,
    },

    #[error(
        "kind {kind}: generation {generation} obsolete bound {bound} does not \
         strictly increase over the previous generation's {previous}"
    )]
    BoundNotAscending {
        kind: ActionKind,
        generation: Generation,
        bound: BlockIndex,
        previous: BlockIndex,
    },
}

/// Declarative `(kind, generation) -> obsolete_at?` registry.
///
/// Keyed by [`ActionVersion`] in a `BTreeMap` so iteration order (and thus the
/// operator metadata export) is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObsolescenceTable {
    entries: BTreeMap<ActionVersion, Option<BlockIndex>>,
}

impl ObsolescenceTable {
    /// Creates an empty table. Prefer [`ObsolescenceTable::builtin`] outside
    /// of tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table of every generation known to this release.
    ///
    /// Bounds mirror the mainnet release history. Generation numbers are
    /// deliberately sparse where the release history was; do not renumber.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        let declarations: &[(ActionKind, u32, Option<u64>)] = &[
            // buy: single-product shape replaced by batched purchase_infos.
            (ActionKind::Buy, 0, Some(1_100_000)),
            (ActionKind::Buy, 5, None),
            // transfer_asset: memo field added in v3.
            (ActionKind::TransferAsset, 0, Some(380_000)),
            (ActionKind::TransferAsset, 3, None),
            (ActionKind::TransferAssets, 0, None),
            (ActionKind::ClaimItems, 0, None),
            // hack_and_slash: v17 retired when stage buffs landed.
            (ActionKind::HackAndSlash, 17, Some(2_000_000)),
            (ActionKind::HackAndSlash, 19, None),
        ];
        for &(kind, generation, bound) in declarations {
            let version = ActionVersion::new(kind, Generation(generation));
            // Static declarations cannot collide; a panic here is a build bug
            // caught by the validation test below.
            table
                .declare(version, bound.map(BlockIndex))
                .unwrap_or_else(|err| panic!("builtin obsolescence table: {err}"));
        }
        table
    }

    /// Declares one generation. Append-only: re-declaring an existing version
    /// fails.
    pub fn declare(
        &mut self,
        version: ActionVersion,
        obsolete_at: Option<BlockIndex>,
    ) -> Result<(), TableError> {
        if self.entries.contains_key(&version) {
            return Err(TableError::DuplicateDeclaration { version });
        }
        self.entries.insert(version, obsolete_at);
        Ok(())
    }

    /// True when the version has a declared entry.
    pub fn contains(&self, version: ActionVersion) -> bool {
        self.entries.contains_key(&version)
    }

    /// The declared obsolescence bound, if the version is known and bounded.
    pub fn obsolete_index(&self, version: ActionVersion) -> Option<BlockIndex> {
        self.entries.get(&version).copied().flatten()
    }

    /// Whether executing `version` at height `at` must be refused.
    ///
    /// Unknown versions report `false`; distinguishing unknown from known is
    /// the resolver's job, not this table's.
    pub fn is_obsolete(&self, version: ActionVersion, at: BlockIndex) -> bool {
        match self.obsolete_index(version) {
            Some(bound) => at >= bound,
            None => false,
        }
    }

    /// The generation whose active range covers `at` for the given kind.
    ///
    /// With validated ordering this is the oldest non-obsolete generation:
    /// each generation's range is `[previous bound, own bound)` and the newest
    /// is unbounded, so exactly one generation matches any height (or none,
    /// for a kind with no declarations). Newer generations are also accepted
    /// before their range begins, since gating is by obsolescence only, but
    /// this is the canonical shape for transactions authored at `at`.
    pub fn active_generation(&self, kind: ActionKind, at: BlockIndex) -> Option<ActionVersion> {
        self.entries
            .iter()
            .filter(|(version, _)| version.kind == kind)
            .find(|&(&version, _)| !self.is_obsolete(version, at))
            .map(|(&version, _)| version)
    }

    /// All declarations as metadata tuples, in deterministic order.
    pub fn metadata(&self) -> impl Iterator<Item = VersionMetadata> + '_ {
        self.entries
            .iter()
            .map(|(&version, &obsolete_at)| VersionMetadata::new(version, obsolete_at))
    }

    /// Checks the per-kind ordering invariants over the whole table.
    ///
    /// Relies on `BTreeMap` ordering: entries of one kind are contiguous and
    /// sorted by generation, so one linear pass suffices.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut run: Option<(ActionKind, Generation, Option<BlockIndex>)> = None;
        for (&version, &bound) in &self.entries {
            match run {
                Some((kind, prev_gen, prev_bound)) if kind == version.kind => {
                    // Not the newest of its kind, so the previous entry must
                    // have been bounded.
                    let previous = prev_bound.ok_or(TableError::UnboundedNotNewest {
                        kind,
                        generation: prev_gen,
                    })?;
                    if let Some(current) = bound {
                        if current <= previous {
                            return Err(TableError::BoundNotAscending {
                                kind,
                                generation: version.generation,
                                bound: current,
                                previous,
                            });
                        }
                    }
                }
                Some((kind, generation, bound_of_last)) => {
                    // Kind changed; the last entry of the previous kind is its
                    // newest and must be unbounded.
                    if bound_of_last.is_some() {
                        return Err(TableError::BoundedNewest { kind, generation });
                    }
                }
                None => {}
            }
            run = Some((version.kind, version.generation, bound));
        }
        if let Some((kind, generation, bound)) = run {
            if bound.is_some() {
                return Err(TableError::BoundedNewest { kind, generation });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(kind: ActionKind, generation: u32) -> ActionVersion {
        ActionVersion::new(kind, Generation(generation))
    }

    #[test]
    fn builtin_table_satisfies_ordering_invariants() {
        let table = ObsolescenceTable::builtin();
        table.validate().unwrap();
    }

    #[test]
    fn builtin_table_is_inclusive_at_the_bound() {
        let table = ObsolescenceTable::builtin();
        let buy0 = version(ActionKind::Buy, 0);
        let bound = table.obsolete_index(buy0).unwrap();

        assert!(!table.is_obsolete(buy0, bound.saturating_prev()));
        assert!(table.is_obsolete(buy0, bound));
        assert!(table.is_obsolete(buy0, BlockIndex(bound.0 + 1)));
    }

    #[test]
    fn newest_generation_stays_active_past_older_bounds() {
        let table = ObsolescenceTable::builtin();
        let bound = table.obsolete_index(version(ActionKind::Buy, 0)).unwrap();
        assert!(!table.is_obsolete(version(ActionKind::Buy, 5), bound));
        assert!(!table.is_obsolete(version(ActionKind::Buy, 5), BlockIndex(u64::MAX)));
    }

    #[test]
    fn exactly_one_generation_is_active_per_height() {
        let table = ObsolescenceTable::builtin();
        let heights = [0, 379_999, 380_000, 1_099_999, 1_100_000, 5_000_000];
        for &height in &heights {
            let at = BlockIndex(height);
            for kind in [ActionKind::Buy, ActionKind::TransferAsset] {
                let active = table
                    .active_generation(kind, at)
                    .unwrap_or_else(|| panic!("kind {kind} has a gap at {at}"));
                // Ranges are `[previous bound, own bound)`: the active
                // generation is never obsolete at the height that selected it.
                assert!(!table.is_obsolete(active, at));
            }
        }

        // The hand-off happens exactly at the declared bound.
        let bound = table.obsolete_index(version(ActionKind::Buy, 0)).unwrap();
        assert_eq!(
            table.active_generation(ActionKind::Buy, bound.saturating_prev()),
            Some(version(ActionKind::Buy, 0))
        );
        assert_eq!(
            table.active_generation(ActionKind::Buy, bound),
            Some(version(ActionKind::Buy, 5))
        );
    }

    #[test]
    fn declare_is_append_only() {
        let mut table = ObsolescenceTable::new();
        let buy0 = version(ActionKind::Buy, 0);
        table.declare(buy0, Some(BlockIndex(10))).unwrap();
        assert_eq!(
            table.declare(buy0, None),
            Err(TableError::DuplicateDeclaration { version: buy0 })
        );
    }

    #[test]
    fn validate_rejects_bounded_newest() {
        let mut table = ObsolescenceTable::new();
        table
            .declare(version(ActionKind::Buy, 0), Some(BlockIndex(10)))
            .unwrap();
        assert!(matches!(
            table.validate(),
            Err(TableError::BoundedNewest { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_ascending_bounds() {
        let mut table = ObsolescenceTable::new();
        table
            .declare(version(ActionKind::Buy, 0), Some(BlockIndex(100)))
            .unwrap();
        table
            .declare(version(ActionKind::Buy, 5), Some(BlockIndex(100)))
            .unwrap();
        table.declare(version(ActionKind::Buy, 9), None).unwrap();
        assert!(matches!(
            table.validate(),
            Err(TableError::BoundNotAscending { .. })
        ));
    }

    #[test]
    fn validate_rejects_unbounded_mid_chain() {
        let mut table = ObsolescenceTable::new();
        table.declare(version(ActionKind::Buy, 0), None).unwrap();
        table.declare(version(ActionKind::Buy, 5), None).unwrap();
        assert!(matches!(
            table.validate(),
            Err(TableError::UnboundedNotNewest { .. })
        ));
    }

    #[test]
    fn unknown_versions_are_not_reported_obsolete() {
        let table = ObsolescenceTable::builtin();
        assert!(!table.is_obsolete(version(ActionKind::Buy, 99), BlockIndex(u64::MAX)));
        assert!(!table.contains(version(ActionKind::Buy, 99)));
    }
}
