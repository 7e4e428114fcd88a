//! Fungible asset transfer actions.
//!
//! Two kinds share this module: `transfer_asset` moves one amount between two
//! addresses (generation 3 added the optional memo), and `transfer_assets`
//! fans an amount list out to a batch of recipients in a single transaction.
//! Batch settlement is all-or-nothing: intrinsic validation rejects the whole
//! payload before any entry produces a delta.

use crate::error::{ErrorKind, ExecutionError};
use crate::types::{Address, FungibleAssetValue};
use crate::version::{ActionKind, ActionVersion, Generation};

use super::GenerationMismatch;

/// Protocol bound on attached memo length, in bytes.
pub const MEMO_MAX_LEN: usize = 80;

/// Upper bound on recipients in one `transfer_assets` payload.
pub const MAX_RECIPIENTS: usize = 100;

/// One `(recipient, amount)` line of a batched transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferEntry {
    pub recipient: Address,
    pub amount: FungibleAssetValue,
}

/// `transfer_asset` generation 0: sender, recipient, amount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferAssetV0 {
    pub sender: Address,
    pub recipient: Address,
    pub amount: FungibleAssetValue,
}

impl TransferAssetV0 {
    pub const GENERATION: Generation = Generation(0);
}

/// `transfer_asset` generation 3: adds the optional memo.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferAssetV3 {
    pub sender: Address,
    pub recipient: Address,
    pub amount: FungibleAssetValue,
    pub memo: Option<String>,
}

impl TransferAssetV3 {
    pub const GENERATION: Generation = Generation(3);
}

/// Tagged union over the known `transfer_asset` generations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferAssetAction {
    V0(TransferAssetV0),
    V3(TransferAssetV3),
}

impl TransferAssetAction {
    pub fn generation(&self) -> Generation {
        match self {
            TransferAssetAction::V0(_) => TransferAssetV0::GENERATION,
            TransferAssetAction::V3(_) => TransferAssetV3::GENERATION,
        }
    }

    pub fn version(&self) -> ActionVersion {
        ActionVersion::new(ActionKind::TransferAsset, self.generation())
    }

    pub fn as_v0(&self) -> Result<&TransferAssetV0, GenerationMismatch> {
        match self {
            TransferAssetAction::V0(inner) => Ok(inner),
            _ => Err(self.mismatch(TransferAssetV0::GENERATION)),
        }
    }

    pub fn as_v3(&self) -> Result<&TransferAssetV3, GenerationMismatch> {
        match self {
            TransferAssetAction::V3(inner) => Ok(inner),
            _ => Err(self.mismatch(TransferAssetV3::GENERATION)),
        }
    }

    fn mismatch(&self, requested: Generation) -> GenerationMismatch {
        GenerationMismatch {
            declared: self.version(),
            requested: ActionVersion::new(ActionKind::TransferAsset, requested),
        }
    }

    pub fn validate(&self) -> Result<(), ExecutionError> {
        let amount = match self {
            TransferAssetAction::V0(inner) => &inner.amount,
            TransferAssetAction::V3(inner) => &inner.amount,
        };
        require_positive(amount)?;
        if let TransferAssetAction::V3(inner) = self {
            check_memo(inner.memo.as_deref())?;
        }
        Ok(())
    }
}

/// `transfer_assets` generation 0: one sender, a batch of recipients.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferAssetsV0 {
    pub sender: Address,
    pub recipients: Vec<TransferEntry>,
    pub memo: Option<String>,
}

impl TransferAssetsV0 {
    pub const GENERATION: Generation = Generation(0);
}

/// Tagged union over the known `transfer_assets` generations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferAssetsAction {
    V0(TransferAssetsV0),
}

impl TransferAssetsAction {
    pub fn generation(&self) -> Generation {
        match self {
            TransferAssetsAction::V0(_) => TransferAssetsV0::GENERATION,
        }
    }

    pub fn version(&self) -> ActionVersion {
        ActionVersion::new(ActionKind::TransferAssets, self.generation())
    }

    pub fn as_v0(&self) -> Result<&TransferAssetsV0, GenerationMismatch> {
        match self {
            TransferAssetsAction::V0(inner) => Ok(inner),
        }
    }

    /// Rejects the whole batch on the first invalid entry, so no partial
    /// transfer is ever produced.
    pub fn validate(&self) -> Result<(), ExecutionError> {
        let TransferAssetsAction::V0(inner) = self;
        if inner.recipients.is_empty() {
            return Err(ExecutionError::new(
                ErrorKind::InvalidTransferAmount,
                "transfer_assets requires at least one recipient",
            ));
        }
        if inner.recipients.len() > MAX_RECIPIENTS {
            return Err(ExecutionError::new(
                ErrorKind::UsageLimitExceeded,
                format!(
                    "transfer_assets carries {} recipients, limit is {MAX_RECIPIENTS}",
                    inner.recipients.len()
                ),
            ));
        }
        for entry in &inner.recipients {
            require_positive(&entry.amount).map_err(|err| {
                ExecutionError::new(
                    err.kind(),
                    format!("recipient {}: {}", entry.recipient, err.message()),
                )
            })?;
        }
        check_memo(inner.memo.as_deref())
    }
}

fn require_positive(amount: &FungibleAssetValue) -> Result<(), ExecutionError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(ExecutionError::new(
            ErrorKind::InvalidTransferAmount,
            format!("transfer amount must be positive, got {amount}"),
        ))
    }
}

pub(crate) fn check_memo(memo: Option<&str>) -> Result<(), ExecutionError> {
    match memo {
        Some(text) if text.len() > MEMO_MAX_LEN => Err(ExecutionError::new(
            ErrorKind::MemoLengthOverflow,
            format!("memo is {} bytes, limit is {MEMO_MAX_LEN}", text.len()),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;

    fn gold(amount: i128) -> FungibleAssetValue {
        FungibleAssetValue::new(Currency::new("GOLD", 2), amount)
    }

    fn batch(entries: Vec<(u8, i128)>) -> TransferAssetsAction {
        TransferAssetsAction::V0(TransferAssetsV0 {
            sender: Address([0xaa; 20]),
            recipients: entries
                .into_iter()
                .map(|(tag, amount)| TransferEntry {
                    recipient: Address([tag; 20]),
                    amount: gold(amount),
                })
                .collect(),
            memo: None,
        })
    }

    #[test]
    fn single_transfer_requires_positive_amount() {
        let action = TransferAssetAction::V3(TransferAssetV3 {
            sender: Address([1; 20]),
            recipient: Address([2; 20]),
            amount: gold(-1),
            memo: None,
        });
        assert_eq!(
            action.validate().unwrap_err().kind(),
            ErrorKind::InvalidTransferAmount
        );
    }

    #[test]
    fn batch_with_any_negative_entry_is_rejected_whole() {
        // A valid first entry must not survive an invalid second one.
        let action = batch(vec![(1, 10), (2, -5)]);
        assert_eq!(
            action.validate().unwrap_err().kind(),
            ErrorKind::InvalidTransferAmount
        );
    }

    #[test]
    fn batch_honors_recipient_cap() {
        let entries = (0..=MAX_RECIPIENTS as i128).map(|i| (i as u8, 1)).collect();
        let action = batch(entries);
        assert_eq!(
            action.validate().unwrap_err().kind(),
            ErrorKind::UsageLimitExceeded
        );
    }

    #[test]
    fn memo_over_bound_classifies_overflow() {
        let action = TransferAssetAction::V3(TransferAssetV3 {
            sender: Address([1; 20]),
            recipient: Address([2; 20]),
            amount: gold(10),
            memo: Some("x".repeat(MEMO_MAX_LEN + 1)),
        });
        assert_eq!(
            action.validate().unwrap_err().kind(),
            ErrorKind::MemoLengthOverflow
        );
    }

    #[test]
    fn memo_at_bound_is_accepted() {
        let action = TransferAssetAction::V3(TransferAssetV3 {
            sender: Address([1; 20]),
            recipient: Address([2; 20]),
            amount: gold(10),
            memo: Some("x".repeat(MEMO_MAX_LEN)),
        });
        action.validate().unwrap();
    }

    #[test]
    fn v0_has_no_memo_and_still_validates_amount() {
        let action = TransferAssetAction::V0(TransferAssetV0 {
            sender: Address([1; 20]),
            recipient: Address([2; 20]),
            amount: gold(0),
        });
        assert_eq!(
            action.validate().unwrap_err().kind(),
            ErrorKind::InvalidTransferAmount
        );
    }
}
