//! Deterministic wire codec for action payloads.
//!
//! Decoding failures are protocol-tier: they are distinct from the domain
//! taxonomy and abort the single transaction before it enters the resolver.

use crate::action::ActionPayload;

/// Raised when a raw payload cannot be decoded into an [`ActionPayload`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed action payload: {detail}")]
    Malformed { detail: String },
}

/// Raised when a payload cannot be serialized (practically unreachable for
/// the payload types in this crate, but never panics).
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("unserializable action payload: {detail}")]
    Unserializable { detail: String },
}

/// Decodes a raw transaction payload.
pub fn decode(bytes: &[u8]) -> Result<ActionPayload, DecodeError> {
    bincode::deserialize(bytes).map_err(|err| DecodeError::Malformed {
        detail: err.to_string(),
    })
}

/// Serializes a payload into its canonical wire form.
pub fn encode(payload: &ActionPayload) -> Result<Vec<u8>, EncodeError> {
    bincode::serialize(payload).map_err(|err| EncodeError::Unserializable {
        detail: err.to_string(),
    })
}
