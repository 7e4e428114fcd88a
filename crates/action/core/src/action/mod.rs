//! Versioned action payloads.
//!
//! Each action kind is a tagged union over its known generations; each
//! generation is a frozen struct whose field set never changes once released,
//! because retrofitting would change the replayed meaning of historical
//! transactions. Adding a generation means adding a variant, never touching an
//! old one.
//!
//! # Module Structure
//!
//! - `buy`: shop purchase (v0 single product, v5 batched purchase infos)
//! - `transfer`: single transfer (`transfer_asset`) and batched
//!   (`transfer_assets`)
//! - `claim`: pre-recorded item grants (`claim_items`)
//! - `hack_and_slash`: stage battle with sparse explicit generations
//!
//! Capability access goes through the `as_vN()` accessors, which fail with
//! [`GenerationMismatch`] when the instance's declared generation differs from
//! the requested one. That failure is a programming-contract violation in the
//! dispatcher, not a domain rejection: callers must select the generation via
//! the resolver, never guess.

pub mod buy;
pub mod claim;
pub mod hack_and_slash;
pub mod transfer;

pub use buy::{BuyAction, BuyV0, BuyV5, ItemSubType, PurchaseInfo};
pub use claim::{ClaimEntry, ClaimItemsAction, ClaimItemsV0};
pub use hack_and_slash::{HackAndSlashAction, HackAndSlashV17, HackAndSlashV19};
pub use transfer::{
    MEMO_MAX_LEN, TransferAssetAction, TransferAssetV0, TransferAssetV3, TransferAssetsAction,
    TransferAssetsV0, TransferEntry,
};

use crate::error::ExecutionError;
use crate::version::{ActionKind, ActionVersion};

/// Capability contract violation: an instance was accessed through a
/// generation it does not declare.
///
/// This is tier-1 (protocol-fatal for the single transaction), never a domain
/// rejection: a mismatch means dispatcher or collaborator code guessed a
/// generation instead of resolving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("capability contract violation: instance of {declared} accessed as {requested}")]
pub struct GenerationMismatch {
    /// The generation the instance actually carries.
    pub declared: ActionVersion,
    /// The generation the caller asked for.
    pub requested: ActionVersion,
}

/// A decoded action instance: one payload of one concrete generation.
///
/// Immutable after decoding; owned by the execution pipeline for the duration
/// of one action's execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionPayload {
    Buy(BuyAction),
    TransferAsset(TransferAssetAction),
    TransferAssets(TransferAssetsAction),
    ClaimItems(ClaimItemsAction),
    HackAndSlash(HackAndSlashAction),
}

impl ActionPayload {
    /// The stable logical kind of this payload.
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::Buy(_) => ActionKind::Buy,
            ActionPayload::TransferAsset(_) => ActionKind::TransferAsset,
            ActionPayload::TransferAssets(_) => ActionKind::TransferAssets,
            ActionPayload::ClaimItems(_) => ActionKind::ClaimItems,
            ActionPayload::HackAndSlash(_) => ActionKind::HackAndSlash,
        }
    }

    /// The `(kind, generation)` identity this instance declares.
    pub fn version(&self) -> ActionVersion {
        match self {
            ActionPayload::Buy(action) => action.version(),
            ActionPayload::TransferAsset(action) => action.version(),
            ActionPayload::TransferAssets(action) => action.version(),
            ActionPayload::ClaimItems(action) => action.version(),
            ActionPayload::HackAndSlash(action) => action.version(),
        }
    }

    /// Stateless intrinsic validation.
    ///
    /// Checks only what the payload can self-certify (amount signs, memo
    /// bounds, intra-payload duplicates); state-dependent preconditions are
    /// the collaborator's to raise. Runs after the obsolescence gate and
    /// before dispatch, so an invalid payload never produces a partial delta.
    pub fn validate(&self) -> Result<(), ExecutionError> {
        match self {
            ActionPayload::Buy(action) => action.validate(),
            ActionPayload::TransferAsset(action) => action.validate(),
            ActionPayload::TransferAssets(action) => action.validate(),
            ActionPayload::ClaimItems(action) => action.validate(),
            ActionPayload::HackAndSlash(action) => action.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, ProductId};
    use crate::version::Generation;

    #[test]
    fn payload_reports_declared_version() {
        let payload = ActionPayload::Buy(BuyAction::V0(BuyV0 {
            buyer_avatar: Address::ZERO,
            seller_agent: Address::ZERO,
            seller_avatar: Address::ZERO,
            product_id: ProductId::default(),
        }));
        assert_eq!(payload.kind(), ActionKind::Buy);
        assert_eq!(payload.version().generation, Generation(0));
    }

    #[test]
    fn mismatched_capability_access_reports_both_versions() {
        let action = BuyAction::V0(BuyV0 {
            buyer_avatar: Address::ZERO,
            seller_agent: Address::ZERO,
            seller_avatar: Address::ZERO,
            product_id: ProductId::default(),
        });
        let err = action.as_v5().unwrap_err();
        assert_eq!(err.declared.generation, Generation(0));
        assert_eq!(err.requested.generation, Generation(5));
        assert_eq!(err.declared.kind, ActionKind::Buy);
    }
}
