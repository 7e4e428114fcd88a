//! Action version identity.
//!
//! An action's semantics are pinned by `(kind, generation)`: the kind is the
//! stable logical name, the generation is one historical revision of that
//! kind's field shape and meaning. Generations are opaque ordinals: numbering
//! may be sparse (e.g. buy 0 then 5) and nothing here assumes contiguity.

use core::fmt;

use crate::types::BlockIndex;

/// Stable logical names of the action kinds this layer knows about.
///
/// The string form is the wire-stable snake_case name. Kinds are append-only
/// across releases; removing one would orphan historical transactions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    /// Purchase one or more shop listings.
    Buy,
    /// Move a single fungible amount between two addresses.
    TransferAsset,
    /// Move fungible amounts to a batch of recipients.
    TransferAssets,
    /// Claim pre-recorded item grants for a set of addresses.
    ClaimItems,
    /// Run a stage battle.
    HackAndSlash,
}

/// One historical revision of an action kind's shape.
///
/// Opaque ordinal: ordering is meaningful (newer generations compare greater),
/// successor arithmetic is not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(pub u32);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Identity of one generation of one action kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionVersion {
    pub kind: ActionKind,
    pub generation: Generation,
}

impl ActionVersion {
    pub const fn new(kind: ActionKind, generation: Generation) -> Self {
        Self { kind, generation }
    }
}

impl fmt::Display for ActionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.generation)
    }
}

/// The `(kind, generation, obsolete_at?)` tuple, the only persisted schema
/// this layer owns. `obsolete_at` is the inclusive first height at which the
/// generation is rejected; `None` means never obsolete under current
/// knowledge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionMetadata {
    pub version: ActionVersion,
    pub obsolete_at: Option<BlockIndex>,
}

impl VersionMetadata {
    pub const fn new(version: ActionVersion, obsolete_at: Option<BlockIndex>) -> Self {
        Self {
            version,
            obsolete_at,
        }
    }

    /// True once the execution height has reached the obsolescence bound.
    pub fn is_obsolete_at(&self, at: BlockIndex) -> bool {
        match self.obsolete_at {
            Some(bound) => at >= bound,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        assert_eq!(ActionKind::HackAndSlash.to_string(), "hack_and_slash");
        assert_eq!("transfer_assets".parse(), Ok(ActionKind::TransferAssets));
        assert_ne!(ActionKind::TransferAsset, ActionKind::TransferAssets);
    }

    #[test]
    fn obsolescence_bound_is_inclusive() {
        let meta = VersionMetadata::new(
            ActionVersion::new(ActionKind::Buy, Generation(0)),
            Some(BlockIndex(100)),
        );
        assert!(!meta.is_obsolete_at(BlockIndex(99)));
        assert!(meta.is_obsolete_at(BlockIndex(100)));
        assert!(meta.is_obsolete_at(BlockIndex(101)));
    }

    #[test]
    fn unbounded_metadata_never_goes_obsolete() {
        let meta = VersionMetadata::new(
            ActionVersion::new(ActionKind::Buy, Generation(5)),
            None,
        );
        assert!(!meta.is_obsolete_at(BlockIndex(u64::MAX)));
    }
}
