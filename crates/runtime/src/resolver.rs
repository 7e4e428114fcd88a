//! Version resolution against the obsolescence table.
//!
//! The resolver is the metadata authority of the pipeline: it knows every
//! declared `(kind, generation, obsolete_at?)` tuple, answers the mandatory
//! obsolescence gate, and exports the declarations for operator tooling.

use std::collections::BTreeSet;

use action_core::{
    ActionKind, ActionVersion, BlockIndex, ErrorKind, ExecutionError, ObsolescenceTable,
    TableError, VersionMetadata,
};

/// Resolves action versions and gates them by block height and availability.
#[derive(Clone, Debug)]
pub struct VersionResolver {
    table: ObsolescenceTable,
    disabled: BTreeSet<ActionKind>,
}

impl VersionResolver {
    /// Wraps a table after checking its ordering invariants.
    pub fn new(table: ObsolescenceTable) -> Result<Self, TableError> {
        table.validate()?;
        Ok(Self {
            table,
            disabled: BTreeSet::new(),
        })
    }

    /// Resolver over the release's builtin declarations.
    ///
    /// The builtin table is validated by its own unit tests, so this cannot
    /// fail at runtime.
    pub fn builtin() -> Self {
        Self {
            table: ObsolescenceTable::builtin(),
            disabled: BTreeSet::new(),
        }
    }

    /// Gates a whole kind off, independent of generation.
    ///
    /// Disabled kinds classify as `ActionUnavailable`, a first-class domain
    /// rejection. Unlike obsolescence, gating is reversible by operators.
    pub fn disable_kind(&mut self, kind: ActionKind) {
        self.disabled.insert(kind);
    }

    pub fn enable_kind(&mut self, kind: ActionKind) {
        self.disabled.remove(&kind);
    }

    pub fn is_disabled(&self, kind: ActionKind) -> bool {
        self.disabled.contains(&kind)
    }

    /// Whether the version has a declared entry.
    pub fn is_known(&self, version: ActionVersion) -> bool {
        self.table.contains(version)
    }

    /// The mandatory first gate of the dispatch path.
    ///
    /// Runs before any state read or write, so obsolete semantics can never
    /// leak into new state even partially. Returns the classified
    /// `ActionObsoleted` rejection when the height has reached the version's
    /// bound.
    pub fn check(&self, version: ActionVersion, at: BlockIndex) -> Result<(), ExecutionError> {
        if self.table.is_obsolete(version, at) {
            // obsolete_index is Some by is_obsolete's definition.
            let bound = self.table.obsolete_index(version);
            return Err(ExecutionError::new(
                ErrorKind::ActionObsoleted,
                match bound {
                    Some(bound) => format!("{version} is obsolete since {bound}, executed at {at}"),
                    None => format!("{version} is obsolete at {at}"),
                },
            ));
        }
        if self.disabled.contains(&version.kind) {
            return Err(ExecutionError::new(
                ErrorKind::ActionUnavailable,
                format!("kind {} is gated off", version.kind),
            ));
        }
        Ok(())
    }

    /// The declared obsolescence bound for a version, if bounded.
    pub fn obsolete_index(&self, version: ActionVersion) -> Option<BlockIndex> {
        self.table.obsolete_index(version)
    }

    /// The canonical generation for transactions authored at `at`.
    pub fn active_generation(&self, kind: ActionKind, at: BlockIndex) -> Option<ActionVersion> {
        self.table.active_generation(kind, at)
    }

    /// All declarations as metadata tuples, in deterministic order.
    pub fn metadata(&self) -> Vec<VersionMetadata> {
        self.table.metadata().collect()
    }

    /// Operator-facing JSON export of the metadata surface.
    pub fn export_metadata(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.metadata())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_core::Generation;

    fn buy(generation: u32) -> ActionVersion {
        ActionVersion::new(ActionKind::Buy, Generation(generation))
    }

    #[test]
    fn check_rejects_exactly_from_the_bound() {
        let resolver = VersionResolver::builtin();
        let bound = resolver.obsolete_index(buy(0)).unwrap();

        resolver.check(buy(0), bound.saturating_prev()).unwrap();
        let err = resolver.check(buy(0), bound).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionObsoleted);
    }

    #[test]
    fn new_rejects_invalid_tables() {
        let mut table = ObsolescenceTable::new();
        table.declare(buy(0), Some(BlockIndex(10))).unwrap();
        assert!(VersionResolver::new(table).is_err());
    }

    #[test]
    fn disabled_kind_classifies_as_unavailable() {
        let mut resolver = VersionResolver::builtin();
        resolver.disable_kind(ActionKind::Buy);

        let err = resolver.check(buy(5), BlockIndex(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionUnavailable);

        resolver.enable_kind(ActionKind::Buy);
        resolver.check(buy(5), BlockIndex(1)).unwrap();
        assert!(!resolver.is_disabled(ActionKind::Buy));
    }

    #[test]
    fn obsolescence_wins_over_availability_gating() {
        let mut resolver = VersionResolver::builtin();
        resolver.disable_kind(ActionKind::Buy);
        let bound = resolver.obsolete_index(buy(0)).unwrap();
        let err = resolver.check(buy(0), bound).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionObsoleted);
    }

    #[test]
    fn metadata_export_round_trips_as_json() {
        let resolver = VersionResolver::builtin();
        let json = resolver.export_metadata().unwrap();
        let parsed: Vec<VersionMetadata> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resolver.metadata());
    }
}
