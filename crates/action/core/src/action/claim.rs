//! Item claim action (`claim_items`).
//!
//! A claim grants pre-recorded fungible item values to a set of avatar
//! addresses. Whether an address has already claimed is chain state and stays
//! with the collaborator (`AlreadyClaimedGifts`); this module only certifies
//! the payload shape.

use std::collections::BTreeSet;

use crate::error::{ErrorKind, ExecutionError};
use crate::types::{Address, FungibleAssetValue};
use crate::version::{ActionKind, ActionVersion, Generation};

use super::GenerationMismatch;
use super::transfer::check_memo;

/// One claim line: the receiving address and the values granted to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimEntry {
    pub address: Address,
    pub fungible_asset_values: Vec<FungibleAssetValue>,
}

/// `claim_items` generation 0.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimItemsV0 {
    pub claim_data: Vec<ClaimEntry>,
    pub memo: Option<String>,
}

impl ClaimItemsV0 {
    pub const GENERATION: Generation = Generation(0);
}

/// Tagged union over the known `claim_items` generations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClaimItemsAction {
    V0(ClaimItemsV0),
}

impl ClaimItemsAction {
    pub fn generation(&self) -> Generation {
        match self {
            ClaimItemsAction::V0(_) => ClaimItemsV0::GENERATION,
        }
    }

    pub fn version(&self) -> ActionVersion {
        ActionVersion::new(ActionKind::ClaimItems, self.generation())
    }

    pub fn as_v0(&self) -> Result<&ClaimItemsV0, GenerationMismatch> {
        match self {
            ClaimItemsAction::V0(inner) => Ok(inner),
        }
    }

    pub fn validate(&self) -> Result<(), ExecutionError> {
        let ClaimItemsAction::V0(inner) = self;
        if inner.claim_data.is_empty() {
            return Err(ExecutionError::new(
                ErrorKind::InvalidClaim,
                "claim_items requires at least one claim entry",
            ));
        }
        let mut seen = BTreeSet::new();
        for entry in &inner.claim_data {
            if !seen.insert(entry.address) {
                return Err(ExecutionError::new(
                    ErrorKind::InvalidClaim,
                    format!("address {} appears twice in claim_data", entry.address),
                ));
            }
            if entry.fungible_asset_values.is_empty() {
                return Err(ExecutionError::new(
                    ErrorKind::InvalidClaim,
                    format!("claim entry for {} grants nothing", entry.address),
                ));
            }
            for value in &entry.fungible_asset_values {
                if !value.is_positive() {
                    return Err(ExecutionError::new(
                        ErrorKind::InvalidClaim,
                        format!(
                            "claim entry for {} grants non-positive {value}",
                            entry.address
                        ),
                    ));
                }
            }
        }
        check_memo(inner.memo.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;

    fn crystal(amount: i128) -> FungibleAssetValue {
        FungibleAssetValue::new(Currency::new("CRYSTAL", 18), amount)
    }

    fn entry(tag: u8, values: Vec<FungibleAssetValue>) -> ClaimEntry {
        ClaimEntry {
            address: Address([tag; 20]),
            fungible_asset_values: values,
        }
    }

    fn claim(data: Vec<ClaimEntry>) -> ClaimItemsAction {
        ClaimItemsAction::V0(ClaimItemsV0 {
            claim_data: data,
            memo: None,
        })
    }

    #[test]
    fn well_formed_claim_passes() {
        claim(vec![
            entry(1, vec![crystal(100)]),
            entry(2, vec![crystal(5), crystal(7)]),
        ])
        .validate()
        .unwrap();
    }

    #[test]
    fn empty_claim_data_is_invalid() {
        assert_eq!(
            claim(vec![]).validate().unwrap_err().kind(),
            ErrorKind::InvalidClaim
        );
    }

    #[test]
    fn duplicate_address_within_payload_is_invalid() {
        let action = claim(vec![
            entry(1, vec![crystal(100)]),
            entry(1, vec![crystal(1)]),
        ]);
        assert_eq!(action.validate().unwrap_err().kind(), ErrorKind::InvalidClaim);
    }

    #[test]
    fn non_positive_grant_is_invalid() {
        let action = claim(vec![entry(1, vec![crystal(0)])]);
        assert_eq!(action.validate().unwrap_err().kind(), ErrorKind::InvalidClaim);
    }
}
