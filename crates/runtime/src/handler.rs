//! Boundary toward the game-logic collaborator.
//!
//! The pipeline never inspects game mechanics: it hands the payload to an
//! [`ActionHandler`] registered for the instance's exact `(kind, generation)`
//! and takes back either a [`StateDelta`] or a classified failure. Handlers
//! reach the generation's frozen fields through the payload's capability
//! accessors; a mismatched access surfaces as a contract violation, not a
//! domain rejection.

use std::collections::BTreeMap;

use action_core::{
    ActionPayload, ActionVersion, BlockIndex, ErrorKind, ExecutionError, GenerationMismatch,
};
use tracing::debug;

use crate::state::{StateDelta, StateView};

/// Per-execution context handed to handlers.
pub struct ExecutionContext<'a> {
    /// Height of the block the transaction executes in.
    pub block_index: BlockIndex,
    /// Read-only view of chain state as of the preceding transaction.
    pub view: &'a dyn StateView,
}

/// Failure raised from inside a handler.
///
/// `Domain` is the expected path; `Contract` means the handler guessed a
/// generation instead of using the one it was registered for.
#[derive(Debug, thiserror::Error)]
pub enum HandlerFailure {
    #[error(transparent)]
    Domain(#[from] ExecutionError),

    #[error(transparent)]
    Contract(#[from] GenerationMismatch),
}

impl From<ErrorKind> for HandlerFailure {
    fn from(kind: ErrorKind) -> Self {
        HandlerFailure::Domain(kind.into())
    }
}

/// One generation's worth of game logic.
///
/// Implementations must only raise taxonomy kinds through
/// [`HandlerFailure::Domain`]; anything else is a contract breach of the
/// collaborator.
pub trait ActionHandler: Send + Sync {
    /// State-dependent precondition checks, before any mutation is computed.
    fn pre_validate(
        &self,
        _payload: &ActionPayload,
        _ctx: &ExecutionContext<'_>,
    ) -> Result<(), HandlerFailure> {
        Ok(())
    }

    /// Computes the state delta for the action.
    ///
    /// Must be all-or-nothing: on failure, no partial delta escapes (a
    /// failed call returns no delta at all).
    fn apply(
        &self,
        payload: &ActionPayload,
        ctx: &ExecutionContext<'_>,
    ) -> Result<StateDelta, HandlerFailure>;
}

/// Dispatch table mapping versions to collaborator handlers.
///
/// Populated at startup alongside the obsolescence table; keyed by the full
/// [`ActionVersion`] so every generation keeps its historical logic
/// permanently resolvable for replay.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<ActionVersion, Box<dyn ActionHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for one version, replacing any previous one.
    pub fn register(&mut self, version: ActionVersion, handler: Box<dyn ActionHandler>) {
        debug!(%version, "registering action handler");
        self.handlers.insert(version, handler);
    }

    pub fn get(&self, version: ActionVersion) -> Option<&dyn ActionHandler> {
        self.handlers.get(&version).map(Box::as_ref)
    }

    pub fn contains(&self, version: ActionVersion) -> bool {
        self.handlers.contains_key(&version)
    }

    /// Registered versions in deterministic order.
    pub fn versions(&self) -> impl Iterator<Item = ActionVersion> + '_ {
        self.handlers.keys().copied()
    }
}
