//! Execution pipeline for versioned ledger actions.
//!
//! This crate sits between the host ledger and the game-logic collaborator:
//! it resolves each decoded action instance to its declared generation, gates
//! it through the obsolescence table, dispatches it to the handler registered
//! for that exact version, and classifies every failure through the
//! `action-core` taxonomy. Consumers embed [`Executor`] and feed it decoded
//! payloads (or raw bytes) in canonical block order.
//!
//! Modules are organized by responsibility:
//! - [`resolver`] answers version metadata and the obsolescence gate
//! - [`handler`] defines the collaborator boundary and the dispatch table
//! - [`executor`] drives the per-instance state machine and block ordering
//! - [`state`] holds the read-view/delta seam toward the host ledger
//! - [`error`] separates protocol-fatal failures from domain rejections
pub mod error;
pub mod executor;
pub mod handler;
pub mod resolver;
pub mod state;

pub use error::{ExecuteFailure, ProtocolError};
pub use executor::{BlockOutcome, Executor, Outcome};
pub use handler::{ActionHandler, ExecutionContext, HandlerFailure, HandlerRegistry};
pub use resolver::VersionResolver;
pub use state::{InMemoryStateView, OverlayView, StateDelta, StateKey, StateView, StateWrite};
