//! Deterministic action-version core shared across the execution stack.
//!
//! `action-core` defines the canonical vocabulary of the version layer: the
//! domain failure taxonomy, the `(kind, generation, obsolete_at?)` metadata
//! registry, and the frozen per-generation payload shapes with their
//! capability accessors. It is pure (no I/O, no clocks, no randomness), so
//! replaying the chain from genesis always re-derives identical results.
//! The execution pipeline in the `runtime` crate builds on the types
//! re-exported here.
pub mod action;
pub mod error;
pub mod obsolescence;
pub mod types;
pub mod version;

#[cfg(feature = "serde")]
pub mod codec;

pub use action::{
    ActionPayload, BuyAction, BuyV0, BuyV5, ClaimEntry, ClaimItemsAction, ClaimItemsV0,
    GenerationMismatch, HackAndSlashAction, HackAndSlashV17, HackAndSlashV19, ItemSubType,
    MEMO_MAX_LEN, PurchaseInfo, TransferAssetAction, TransferAssetV0, TransferAssetV3,
    TransferAssetsAction, TransferAssetsV0, TransferEntry,
};
pub use error::{Category, ErrorKind, ExecutionError, FailurePolicy};
pub use obsolescence::{ObsolescenceTable, TableError};
pub use types::{
    Address, AddressParseError, BlockIndex, Currency, FungibleAssetValue, ItemId, OrderId,
    ProductId,
};
pub use version::{ActionKind, ActionVersion, Generation, VersionMetadata};

#[cfg(feature = "serde")]
pub use codec::{DecodeError, EncodeError, decode, encode};
