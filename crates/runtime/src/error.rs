//! Two-tier failure model of the execution pipeline.
//!
//! Tier 1, [`ProtocolError`], covers malformed payloads and dispatcher
//! contract violations: a bug or tampered input. It aborts the single
//! transaction, never the node, and is kept distinct from the domain taxonomy.
//! Tier 2 is the classified domain rejection ([`action_core::ExecutionError`]),
//! a first-class outcome rather than an error of the pipeline itself.

use action_core::{ActionVersion, ExecutionError, GenerationMismatch};
use action_core::codec::DecodeError;

/// Protocol-fatal failure of one transaction.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The raw payload did not decode into any known action shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The decoded version has no entry in the obsolescence table. Every
    /// shipped generation is declared, so an undeclared one reaching the
    /// resolver means a decoder/table release mismatch.
    #[error("version {version} is not declared in the obsolescence table")]
    UnregisteredVersion { version: ActionVersion },

    /// No collaborator handler is registered for the version.
    #[error("no handler registered for version {version}")]
    UnhandledVersion { version: ActionVersion },

    /// The dispatcher or collaborator accessed the wrong generation.
    #[error(transparent)]
    ContractViolation(#[from] GenerationMismatch),
}

/// Either tier, for callers that gate transactions ahead of commit.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteFailure {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Domain(#[from] ExecutionError),
}
