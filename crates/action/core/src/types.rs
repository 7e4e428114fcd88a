//! Core identity and value types shared across action payloads.
//!
//! Everything here is an immutable, equality-comparable value type with no
//! independent lifecycle: instances live and die with the payload (or the
//! metadata tuple) that owns them.

use core::fmt;
use core::str::FromStr;

/// Monotonically increasing height of a block in the chain.
///
/// Block index is the deterministic clock for version gating: obsolescence
/// checks compare the execution height against a generation's declared
/// `obsolete_at` bound, never wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockIndex(pub u64);

impl BlockIndex {
    /// The genesis block height.
    pub const GENESIS: BlockIndex = BlockIndex(0);

    /// Returns the previous height, saturating at genesis.
    pub const fn saturating_prev(self) -> BlockIndex {
        BlockIndex(self.0.saturating_sub(1))
    }
}

impl fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockIndex {
    fn from(height: u64) -> Self {
        BlockIndex(height)
    }
}

/// Error raised when parsing an [`Address`] from text fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("address must be {expected} hex chars (optionally 0x-prefixed), got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("address contains non-hex characters")]
    NonHex,
}

/// A 20-byte account address (agent or avatar).
///
/// Addresses are opaque to this layer: whether one denotes an agent, an
/// avatar, or a contract is the collaborator's concern. Formatting is
/// lowercase hex with a `0x` prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    /// The all-zero address, used as a placeholder in tests and system rows.
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != Self::LEN * 2 {
            return Err(AddressParseError::Length {
                expected: Self::LEN * 2,
                actual: digits.len(),
            });
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| AddressParseError::NonHex)?;
        Ok(Address(bytes))
    }
}

/// A fungible currency descriptor.
///
/// Equality is over both fields: two currencies with the same ticker but
/// different minor-unit scales are distinct and must never be summed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Currency {
    /// Short symbolic name, e.g. "GOLD".
    pub ticker: String,
    /// Number of minor-unit decimal places carried by `raw_amount`.
    pub decimal_places: u8,
}

impl Currency {
    pub fn new(ticker: impl Into<String>, decimal_places: u8) -> Self {
        Self {
            ticker: ticker.into(),
            decimal_places,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ticker)
    }
}

/// A signed quantity of one currency, in minor units.
///
/// Payload validation treats non-positive amounts as invalid input wherever a
/// transfer or price is expected; the signed representation exists so decoded
/// payloads can carry the malformed value up to classification instead of
/// failing in the codec.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FungibleAssetValue {
    pub currency: Currency,
    /// Amount in minor units (scaled by `currency.decimal_places`).
    pub raw_amount: i128,
}

impl FungibleAssetValue {
    pub fn new(currency: Currency, raw_amount: i128) -> Self {
        Self {
            currency,
            raw_amount,
        }
    }

    pub const fn is_positive(&self) -> bool {
        self.raw_amount > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.raw_amount < 0
    }
}

impl fmt::Display for FungibleAssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.raw_amount, self.currency)
    }
}

/// Identifier of a listed product in the shop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductId(pub [u8; 16]);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Identifier of a concrete item instance (equipment, costume, consumable).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub [u8; 16]);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Identifier of a shop order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub [u8; 16]);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_round_trips_through_hex() {
        let addr = Address([0xab; 20]);
        let text = addr.to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.parse::<Address>(), Ok(addr));
    }

    #[test]
    fn address_rejects_bad_length_and_bad_digits() {
        assert!(matches!(
            "0x1234".parse::<Address>(),
            Err(AddressParseError::Length { .. })
        ));
        let junk = "zz".repeat(20);
        assert_eq!(junk.parse::<Address>(), Err(AddressParseError::NonHex));
    }

    #[test]
    fn currencies_with_different_scales_are_distinct() {
        let a = Currency::new("GOLD", 2);
        let b = Currency::new("GOLD", 18);
        assert_ne!(a, b);
    }

    #[test]
    fn block_index_prev_saturates_at_genesis() {
        assert_eq!(BlockIndex::GENESIS.saturating_prev(), BlockIndex::GENESIS);
        assert_eq!(BlockIndex(10).saturating_prev(), BlockIndex(9));
    }
}
