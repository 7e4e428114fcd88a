//! Action execution pipeline.
//!
//! Per instance, execution walks a fixed state machine:
//!
//! ```text
//! Decoded → ObsolescenceChecked → {Rejected(ActionObsoleted) | Dispatched}
//!         → {Succeeded | Failed(ErrorKind)}
//! ```
//!
//! No transition skips the obsolescence check, including internally generated
//! system submissions. Every path terminates in either a committed delta or an
//! explicit classified error; nothing is silently swallowed.

use action_core::{ActionPayload, BlockIndex, ErrorKind, ExecutionError};
use tracing::{debug, warn};

use crate::error::{ExecuteFailure, ProtocolError};
use crate::handler::{ExecutionContext, HandlerFailure, HandlerRegistry};
use crate::resolver::VersionResolver;
use crate::state::{OverlayView, StateDelta, StateView};

/// Terminal state of one action's execution.
///
/// Both variants are first-class outcomes: a rejection is an expected result
/// of a well-formed transaction, recorded as failed with zero state mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The action succeeded; the host commits this delta atomically.
    Committed(StateDelta),
    /// The action was refused with a classified kind; nothing is committed.
    /// Fee and nonce effects follow the host ledger's rules.
    Rejected { kind: ErrorKind, message: String },
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed(_))
    }

    /// The classified kind, for rejected outcomes.
    pub fn rejection_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Committed(_) => None,
            Outcome::Rejected { kind, .. } => Some(*kind),
        }
    }

    fn rejected(error: ExecutionError) -> Self {
        Outcome::Rejected {
            kind: error.kind(),
            message: error.message().to_owned(),
        }
    }
}

/// Result of executing one block's transactions in canonical order.
#[derive(Debug)]
pub struct BlockOutcome {
    /// Per-transaction terminal states, in submission order. A protocol-fatal
    /// entry aborted that transaction alone; the rest of the block proceeded.
    pub receipts: Vec<Result<Outcome, ProtocolError>>,
    /// Committed writes of the whole block, in canonical order.
    pub delta: StateDelta,
}

/// Drives decoded action instances through resolution, validation, and
/// dispatch.
pub struct Executor {
    resolver: VersionResolver,
    handlers: HandlerRegistry,
}

impl Executor {
    pub fn new(resolver: VersionResolver, handlers: HandlerRegistry) -> Self {
        Self { resolver, handlers }
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    /// Executes one decoded instance at the given height.
    ///
    /// `Err` is tier-1 (protocol-fatal for this transaction); `Ok(Rejected)`
    /// is the classified tier-2 outcome.
    pub fn execute(
        &self,
        payload: &ActionPayload,
        at: BlockIndex,
        view: &dyn StateView,
    ) -> Result<Outcome, ProtocolError> {
        let version = payload.version();

        // Unknown versions are a decoder/table release mismatch, not a domain
        // outcome.
        if !self.resolver.is_known(version) {
            warn!(%version, %at, "rejecting undeclared action version");
            return Err(ProtocolError::UnregisteredVersion { version });
        }

        // Obsolescence gate: first, before any state read.
        if let Err(error) = self.resolver.check(version, at) {
            debug!(%version, %at, "action refused by obsolescence gate");
            return Ok(Outcome::rejected(error));
        }

        // Intrinsic shape checks, still before any state read.
        if let Err(error) = payload.validate() {
            debug!(%version, %at, kind = %error.kind(), "payload failed intrinsic validation");
            return Ok(Outcome::rejected(error));
        }

        let handler = self
            .handlers
            .get(version)
            .ok_or(ProtocolError::UnhandledVersion { version })?;

        let ctx = ExecutionContext {
            block_index: at,
            view,
        };
        let dispatched = handler
            .pre_validate(payload, &ctx)
            .and_then(|()| handler.apply(payload, &ctx));

        match dispatched {
            Ok(delta) => {
                debug!(%version, %at, writes = delta.len(), "action committed");
                Ok(Outcome::Committed(delta))
            }
            Err(HandlerFailure::Domain(error)) => {
                debug!(%version, %at, kind = %error.kind(), "action rejected by collaborator");
                Ok(Outcome::rejected(error))
            }
            Err(HandlerFailure::Contract(violation)) => {
                warn!(%version, %at, %violation, "capability contract violation");
                Err(ProtocolError::ContractViolation(violation))
            }
        }
    }

    /// Decodes a raw transaction payload and executes it.
    pub fn execute_raw(
        &self,
        bytes: &[u8],
        at: BlockIndex,
        view: &dyn StateView,
    ) -> Result<Outcome, ProtocolError> {
        let payload = action_core::decode(bytes)?;
        self.execute(&payload, at, view)
    }

    /// Read-only speculative gate for candidate transactions.
    ///
    /// Evaluates the obsolescence check and intrinsic shape validation without
    /// touching chain state, so callers may run it concurrently ahead of
    /// commit. A passing candidate can still fail at execution if a preceding
    /// transaction invalidates its preconditions; committed effects stay
    /// serialized in canonical order.
    pub fn prevalidate(&self, payload: &ActionPayload, at: BlockIndex) -> Result<(), ExecuteFailure> {
        let version = payload.version();
        if !self.resolver.is_known(version) {
            return Err(ProtocolError::UnregisteredVersion { version }.into());
        }
        if !self.handlers.contains(version) {
            return Err(ProtocolError::UnhandledVersion { version }.into());
        }
        self.resolver.check(version, at)?;
        payload.validate()?;
        Ok(())
    }

    /// Executes a block's transactions in canonical order.
    ///
    /// Each transaction observes the committed writes of its predecessors
    /// through a copy-on-write overlay; the base view is never mutated. A
    /// protocol-fatal transaction is recorded and skipped, the rest of the
    /// block proceeds.
    pub fn execute_block(
        &self,
        payloads: &[ActionPayload],
        at: BlockIndex,
        base: &dyn StateView,
    ) -> BlockOutcome {
        let mut overlay = OverlayView::new(base);
        let mut block_delta = StateDelta::new();
        let mut receipts = Vec::with_capacity(payloads.len());

        for payload in payloads {
            let receipt = self.execute(payload, at, &overlay);
            if let Ok(Outcome::Committed(delta)) = &receipt {
                overlay.apply(delta);
                block_delta.extend(delta.clone());
            }
            receipts.push(receipt);
        }

        BlockOutcome {
            receipts,
            delta: block_delta,
        }
    }
}
