//! Remote sinks

use std::collections::VecDeque;

use goal_types::{Goal, GoalId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RemoteError, RemoteResult};
use crate::ticket::{PersistAck, PersistResolver, PersistResult, PersistTicket};
use crate::wire::{
    decode_update_response, encode_update_call, GoalUpdateCall, MessageEnvelope, MessageId,
    SchemaVersion,
};

/// Asynchronous write target for full goal records
pub trait RemoteSink {
    /// Starts a write of `goal` and returns without waiting for it
    fn persist(&mut self, id: &GoalId, goal: &Goal) -> PersistTicket;
}

impl<R: RemoteSink + ?Sized> RemoteSink for &mut R {
    fn persist(&mut self, id: &GoalId, goal: &Goal) -> PersistTicket {
        (**self).persist(id, goal)
    }
}

/// Request/response channel to the goal endpoint
pub trait RemoteTransport {
    fn send(&mut self, message: MessageEnvelope) -> RemoteResult<()>;
    fn receive(&mut self) -> RemoteResult<MessageEnvelope>;
}

/// Sink configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Endpoint writes are addressed to
    pub endpoint: String,
    /// Schema version stamped on outgoing calls
    pub schema_version: SchemaVersion,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            endpoint: "goals".to_string(),
            schema_version: SchemaVersion::default(),
        }
    }
}

/// A write waiting for its turn on the transport
#[derive(Debug)]
struct PendingWrite {
    goal_id: GoalId,
    request_id: MessageId,
    envelope: MessageEnvelope,
    resolver: PersistResolver,
}

/// Sink that queues writes and delivers them when pumped
///
/// `persist` never touches the transport. The owner's event loop calls
/// [`QueuedSink::pump`] to deliver queued writes and resolve their tickets.
/// Every write is delivered exactly once, whether or not a newer write for
/// the same goal is queued behind it.
#[derive(Debug)]
pub struct QueuedSink<T: RemoteTransport> {
    transport: T,
    config: SinkConfig,
    pending: VecDeque<PendingWrite>,
}

impl<T: RemoteTransport> QueuedSink<T> {
    /// Creates a sink over `transport`
    pub fn new(transport: T, config: SinkConfig) -> Self {
        Self {
            transport,
            config,
            pending: VecDeque::new(),
        }
    }

    /// Returns the sink configuration
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Returns the number of writes not yet delivered
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Borrows the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrows the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Delivers the oldest queued write; returns false if none was queued
    pub fn pump_one(&mut self) -> bool {
        let Some(write) = self.pending.pop_front() else {
            return false;
        };

        let result = self.deliver(&write);
        match &result {
            Ok(_) => debug!(goal = %write.goal_id, request = %write.request_id, "goal write acknowledged"),
            Err(err) => warn!(goal = %write.goal_id, request = %write.request_id, %err, "goal write failed"),
        }
        write.resolver.resolve(result);
        true
    }

    /// Delivers every queued write; returns how many were delivered
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while self.pump_one() {
            delivered += 1;
        }
        delivered
    }

    fn deliver(&mut self, write: &PendingWrite) -> PersistResult {
        self.transport.send(write.envelope.clone())?;
        let reply = self.transport.receive()?;
        let response = decode_update_response(&reply, self.config.schema_version)?;

        if response.request_id != write.request_id {
            return Err(RemoteError::RequestMismatch {
                expected: write.request_id,
                received: response.request_id,
            });
        }

        response
            .result
            .map(|()| PersistAck {
                request_id: write.request_id,
            })
            .map_err(RemoteError::Rejected)
    }
}

impl<T: RemoteTransport> RemoteSink for QueuedSink<T> {
    /// Queues one write per call
    ///
    /// Nothing is coalesced: a keystroke-driven editor adds an entry for every
    /// edit, and the queue only shrinks when the owner calls
    /// [`QueuedSink::pump`] or [`QueuedSink::pump_one`]. Owners must pump from
    /// their event loop; [`QueuedSink::pending_count`] reports the backlog.
    fn persist(&mut self, id: &GoalId, goal: &Goal) -> PersistTicket {
        let call = GoalUpdateCall::new(id.clone(), goal.clone());
        let (ticket, resolver) = PersistTicket::pending(call.request_id, id.clone());

        match encode_update_call(&call, &self.config.endpoint, self.config.schema_version) {
            Ok(envelope) => {
                debug!(goal = %id, request = %call.request_id, "goal write queued");
                self.pending.push_back(PendingWrite {
                    goal_id: id.clone(),
                    request_id: call.request_id,
                    envelope,
                    resolver,
                });
            }
            Err(err) => {
                warn!(goal = %id, %err, "goal write could not be encoded");
                resolver.resolve(Err(err));
            }
        }

        ticket
    }
}
