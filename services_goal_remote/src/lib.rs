//! # Goal Remote Sink
//!
//! Forwards full goal records to the remote goal endpoint.
//!
//! ## Philosophy
//!
//! - **Fire-and-forget**: `persist` returns immediately with a [`PersistTicket`]
//! - **Observable, not awaited**: The ticket resolves to the remote outcome for
//!   whoever cares; dropping it does not cancel the write
//! - **No retries**: A failed write is reported once and never replayed
//! - **Explicit progress**: [`QueuedSink`] only talks to its transport when pumped
//!
//! ## Wire Format
//!
//! Writes travel as [`MessageEnvelope`]s carrying a JSON [`GoalUpdateCall`]
//! under the `goal.update` action, schema `v1.0`. The endpoint answers with a
//! [`GoalUpdateResponse`] correlated to the call.
//!
//! ## Example
//!
//! ```ignore
//! use services_goal_remote::{QueuedSink, RemoteSink, SinkConfig};
//!
//! let mut sink = QueuedSink::new(transport, SinkConfig::default());
//! let ticket = sink.persist(&goal.id, &goal);
//!
//! // Later, from the event loop
//! sink.pump();
//! ```

pub mod error;
pub mod server;
pub mod sink;
pub mod ticket;
pub mod wire;

pub use error::{RemoteError, RemoteResult};
pub use server::{GoalBackend, GoalPersistServer};
pub use sink::{QueuedSink, RemoteSink, RemoteTransport, SinkConfig};
pub use ticket::{PersistAck, PersistResolver, PersistResult, PersistTicket};
pub use wire::{
    GoalUpdateCall, GoalUpdateResponse, MessageEnvelope, MessageId, MessagePayload, SchemaVersion,
    GOAL_SCHEMA_VERSION, GOAL_UPDATE_ACTION, GOAL_UPDATE_RESPONSE_ACTION,
};
