//! Domain failure taxonomy for action execution.
//!
//! Every failure the game-logic collaborator can raise is identified by a
//! variant of [`ErrorKind`]. The execution pipeline matches on the kind, never
//! on message text, to decide the outcome of a transaction. Kinds are grouped
//! by cause via [`Category`] and map totally onto [`FailurePolicy`].
//!
//! # Design Principles
//!
//! - **Closed enumeration**: callers can exhaustively match every kind.
//! - **Stable identity**: variants are append-only across releases; a kind
//!   that has ever been recorded keeps its name and meaning forever.
//! - **Message is diagnostic only**: the free-text context attached to an
//!   [`ExecutionError`] never participates in the consensus-relevant outcome.

/// Stable, matchable identity of a domain execution failure.
///
/// Grouped by cause; see [`ErrorKind::category`]. The string form (used in
/// logs and operator tooling) is the snake_case variant name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ErrorKind {
    // ========================================================================
    // State precondition violations
    // ========================================================================
    /// The target was already activated.
    AlreadyActivated,
    /// A contract for this subject already exists.
    AlreadyContracted,
    /// The reward or delivery was already received.
    AlreadyReceived,
    /// The gift set referenced by the claim was already claimed.
    AlreadyClaimedGifts,
    /// The recipe is already unlocked.
    AlreadyRecipeUnlocked,
    /// The world is already unlocked.
    AlreadyWorldUnlocked,
    /// The arena season has not ended yet.
    ArenaNotEnded,
    /// A per-interval usage cap was exceeded.
    UsageLimitExceeded,
    /// The ranking capacity was exceeded.
    RankingExceeded,

    // ========================================================================
    // Resource insufficiency
    // ========================================================================
    NotEnoughActionPoint,
    NotEnoughCombatPoint,
    NotEnoughHammerPoint,
    NotEnoughMaterial,
    NotEnoughMedal,
    NotEnoughRank,
    NotEnoughStar,
    NotEnoughWin,

    // ========================================================================
    // Invalid input
    // ========================================================================
    InvalidAddress,
    InvalidItemId,
    InvalidItemType,
    InvalidItemCount,
    InvalidLevel,
    InvalidMaterial,
    InvalidPrice,
    InvalidProductType,
    InvalidRecipeId,
    InvalidStage,
    InvalidWorld,
    /// The avatar name does not match the allowed pattern.
    InvalidNamePattern,
    InvalidElemental,
    InvalidTradableId,
    InvalidTradableItem,
    /// The currency of a transfer is not allowed for this operation.
    InvalidTransferCurrency,
    /// A transfer amount is zero or negative.
    InvalidTransferAmount,
    InvalidMonsterCollectionRound,
    /// The claim payload itself is malformed (empty, self-inconsistent).
    InvalidClaim,
    InvalidShopItem,
    /// A repeat-play count is out of the allowed range.
    InvalidRepeatPlay,
    /// The avatar slot index is outside the account's slot range.
    AvatarIndexOutOfRange,

    // ========================================================================
    // Lookup failure
    // ========================================================================
    ItemDoesNotExist,
    OrderIdDoesNotExist,
    ProductNotFound,
    /// The combination slot exists but holds no result to retrieve.
    CombinationSlotResultNull,
    /// The agent record does not list the given avatar address.
    AgentStateNotContainsAvatarAddress,

    // ========================================================================
    // Conflict / duplication
    // ========================================================================
    DuplicateCostume,
    DuplicateEquipment,
    DuplicateMaterial,
    DuplicateOrderId,
    AvatarIndexAlreadyUsed,

    // ========================================================================
    // Expiry / timing
    // ========================================================================
    /// The shop listing expired before purchase.
    ShopItemExpired,
    /// The monster collection round expired.
    MonsterCollectionExpired,
    /// The appraisal block height has not been reached yet.
    AppraiseBlockNotReached,

    // ========================================================================
    // Unlock gating
    // ========================================================================
    CombinationSlotUnlock,
    ConsumableSlotUnlock,
    CostumeSlotUnlock,
    EquipmentSlotUnlock,
    /// The pet is locked and cannot be used.
    PetIsLocked,
    /// The equipment level exceeds the allowed maximum for this operation.
    EquipmentLevelExceeded,

    // ========================================================================
    // Protocol-level
    // ========================================================================
    /// The action's generation is no longer accepted at this block height.
    ///
    /// Raised by the obsolescence gate before any state read or write; obsolete
    /// semantics can never leak into new state, even partially.
    ActionObsoleted,
    /// The action kind is gated off (feature disabled) at this height.
    ActionUnavailable,
    /// An attached memo exceeds the protocol length bound.
    MemoLengthOverflow,
}

/// Cause grouping for [`ErrorKind`], used for diagnostics and metrics rollups.
///
/// The grouping is informational: outcome decisions are per-kind, not
/// per-category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// The chain already records a state that forbids this action.
    StatePrecondition,
    /// The actor lacks a consumable resource the action requires.
    ResourceInsufficiency,
    /// The payload carries a value that can never be valid.
    InvalidInput,
    /// A referenced entity does not exist in chain state.
    LookupFailure,
    /// The action would duplicate something that must be unique.
    Conflict,
    /// A block-height deadline has passed or not yet arrived.
    Expiry,
    /// A slot, pet, or feature is still locked for this actor.
    UnlockGating,
    /// Raised by the version layer itself, not by game logic.
    Protocol,
}

/// What the execution pipeline does with a classified failure.
///
/// Every [`ErrorKind`] maps to [`FailurePolicy::RejectTransaction`]: the
/// action's state changes are rolled back, fee/nonce effects follow the host
/// ledger's rules, and execution continues with the next transaction. No
/// domain error is node-fatal; the enum makes that policy explicit and
/// testable rather than implied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Record the transaction as failed, commit nothing from it, move on.
    RejectTransaction,
}

impl ErrorKind {
    /// Returns the cause grouping for this kind.
    pub const fn category(self) -> Category {
        use ErrorKind::*;
        match self {
            AlreadyActivated | AlreadyContracted | AlreadyReceived | AlreadyClaimedGifts
            | AlreadyRecipeUnlocked | AlreadyWorldUnlocked | ArenaNotEnded
            | UsageLimitExceeded | RankingExceeded => Category::StatePrecondition,

            NotEnoughActionPoint | NotEnoughCombatPoint | NotEnoughHammerPoint
            | NotEnoughMaterial | NotEnoughMedal | NotEnoughRank | NotEnoughStar
            | NotEnoughWin => Category::ResourceInsufficiency,

            InvalidAddress | InvalidItemId | InvalidItemType | InvalidItemCount
            | InvalidLevel | InvalidMaterial | InvalidPrice | InvalidProductType
            | InvalidRecipeId | InvalidStage | InvalidWorld | InvalidNamePattern
            | InvalidElemental | InvalidTradableId | InvalidTradableItem
            | InvalidTransferCurrency | InvalidTransferAmount
            | InvalidMonsterCollectionRound | InvalidClaim | InvalidShopItem
            | InvalidRepeatPlay | AvatarIndexOutOfRange => Category::InvalidInput,

            ItemDoesNotExist | OrderIdDoesNotExist | ProductNotFound
            | CombinationSlotResultNull | AgentStateNotContainsAvatarAddress => {
                Category::LookupFailure
            }

            DuplicateCostume | DuplicateEquipment | DuplicateMaterial | DuplicateOrderId
            | AvatarIndexAlreadyUsed => Category::Conflict,

            ShopItemExpired | MonsterCollectionExpired | AppraiseBlockNotReached => {
                Category::Expiry
            }

            CombinationSlotUnlock | ConsumableSlotUnlock | CostumeSlotUnlock
            | EquipmentSlotUnlock | PetIsLocked | EquipmentLevelExceeded => {
                Category::UnlockGating
            }

            ActionObsoleted | ActionUnavailable | MemoLengthOverflow => Category::Protocol,
        }
    }

    /// Returns the outcome policy for this kind.
    ///
    /// Every kind rejects the transaction; a release introducing a second
    /// policy must extend this mapping per kind.
    pub const fn policy(self) -> FailurePolicy {
        FailurePolicy::RejectTransaction
    }

    /// Stable snake_case name, e.g. `"not_enough_action_point"`.
    pub fn name(&self) -> &str {
        // strum's AsRefStr gives the serialized variant name.
        self.as_ref()
    }
}

/// A classified domain failure raised during action execution.
///
/// Produced by the collaborator (or by intrinsic payload validation); owned by
/// the caller that invoked execution; never persisted to chain state. Only the
/// [`ErrorKind`] discriminant is consensus-relevant; the message is a
/// free-text diagnostic for operators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind}: {message}")]
pub struct ExecutionError {
    kind: ErrorKind,
    message: String,
}

impl ExecutionError {
    /// Creates a classified failure with a diagnostic message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The classification. Idempotent: the kind is fixed at construction and
    /// re-reading it always yields the same value.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The operator-facing diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorKind> for ExecutionError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: String::new(),
        }
    }
}
