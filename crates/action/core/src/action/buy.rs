//! Shop purchase action (`buy`).
//!
//! Generation 0 bought a single listed product. Generation 5 restructured the
//! payload around a list of [`PurchaseInfo`] records to support batched
//! purchases in one transaction. The intermediate numbers were retired before
//! the surveyed history begins; treat the ordinals as opaque.

use crate::error::{ErrorKind, ExecutionError};
use crate::types::{Address, FungibleAssetValue, ProductId};
use crate::version::{ActionKind, ActionVersion, Generation};

use super::GenerationMismatch;

/// Item category a purchase targets. Affects which inventory the collaborator
/// settles the item into.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemSubType {
    Weapon,
    Armor,
    Belt,
    Necklace,
    Ring,
    Food,
    FullCostume,
    Title,
}

/// One purchase line inside a generation-5 buy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseInfo {
    pub seller_agent: Address,
    pub seller_avatar: Address,
    pub price: FungibleAssetValue,
    pub item_sub_type: ItemSubType,
}

/// Generation 0: one buyer, one seller, one product.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyV0 {
    pub buyer_avatar: Address,
    pub seller_agent: Address,
    pub seller_avatar: Address,
    pub product_id: ProductId,
}

impl BuyV0 {
    pub const GENERATION: Generation = Generation(0);
}

/// Generation 5: one buyer, a batch of purchase lines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyV5 {
    pub buyer_avatar: Address,
    pub purchase_infos: Vec<PurchaseInfo>,
}

impl BuyV5 {
    pub const GENERATION: Generation = Generation(5);
}

/// Tagged union over the known `buy` generations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuyAction {
    V0(BuyV0),
    V5(BuyV5),
}

impl BuyAction {
    pub fn generation(&self) -> Generation {
        match self {
            BuyAction::V0(_) => BuyV0::GENERATION,
            BuyAction::V5(_) => BuyV5::GENERATION,
        }
    }

    pub fn version(&self) -> ActionVersion {
        ActionVersion::new(ActionKind::Buy, self.generation())
    }

    /// Capability accessor for generation 0.
    pub fn as_v0(&self) -> Result<&BuyV0, GenerationMismatch> {
        match self {
            BuyAction::V0(inner) => Ok(inner),
            _ => Err(self.mismatch(BuyV0::GENERATION)),
        }
    }

    /// Capability accessor for generation 5.
    pub fn as_v5(&self) -> Result<&BuyV5, GenerationMismatch> {
        match self {
            BuyAction::V5(inner) => Ok(inner),
            _ => Err(self.mismatch(BuyV5::GENERATION)),
        }
    }

    fn mismatch(&self, requested: Generation) -> GenerationMismatch {
        GenerationMismatch {
            declared: self.version(),
            requested: ActionVersion::new(ActionKind::Buy, requested),
        }
    }

    /// Stateless payload checks shared by all generations.
    pub fn validate(&self) -> Result<(), ExecutionError> {
        match self {
            // Nothing a v0 payload can self-certify: product existence and
            // pricing live in chain state.
            BuyAction::V0(_) => Ok(()),
            BuyAction::V5(inner) => {
                if inner.purchase_infos.is_empty() {
                    return Err(ExecutionError::new(
                        ErrorKind::InvalidItemCount,
                        "buy requires at least one purchase info",
                    ));
                }
                for info in &inner.purchase_infos {
                    if !info.price.is_positive() {
                        return Err(ExecutionError::new(
                            ErrorKind::InvalidPrice,
                            format!(
                                "purchase from {} lists non-positive price {}",
                                info.seller_avatar, info.price
                            ),
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;

    fn gold(amount: i128) -> FungibleAssetValue {
        FungibleAssetValue::new(Currency::new("GOLD", 2), amount)
    }

    fn purchase(price: FungibleAssetValue) -> PurchaseInfo {
        PurchaseInfo {
            seller_agent: Address([1; 20]),
            seller_avatar: Address([2; 20]),
            price,
            item_sub_type: ItemSubType::Weapon,
        }
    }

    #[test]
    fn v5_accepts_positive_prices() {
        let action = BuyAction::V5(BuyV5 {
            buyer_avatar: Address([9; 20]),
            purchase_infos: vec![purchase(gold(100)), purchase(gold(1))],
        });
        action.validate().unwrap();
    }

    #[test]
    fn v5_rejects_empty_purchase_list() {
        let action = BuyAction::V5(BuyV5 {
            buyer_avatar: Address([9; 20]),
            purchase_infos: vec![],
        });
        assert_eq!(
            action.validate().unwrap_err().kind(),
            ErrorKind::InvalidItemCount
        );
    }

    #[test]
    fn v5_rejects_non_positive_price() {
        for bad in [0, -250] {
            let action = BuyAction::V5(BuyV5 {
                buyer_avatar: Address([9; 20]),
                purchase_infos: vec![purchase(gold(bad))],
            });
            assert_eq!(action.validate().unwrap_err().kind(), ErrorKind::InvalidPrice);
        }
    }

    #[test]
    fn capability_accessor_matches_declared_generation() {
        let action = BuyAction::V5(BuyV5 {
            buyer_avatar: Address([9; 20]),
            purchase_infos: vec![purchase(gold(1))],
        });
        assert!(action.as_v5().is_ok());
        assert!(action.as_v0().is_err());
    }
}
