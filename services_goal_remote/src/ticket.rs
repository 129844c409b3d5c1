//! Persist tickets
//!
//! A ticket is the caller's view of one remote write. It resolves once, with
//! the remote outcome. Dropping a ticket only stops observing the write; the
//! sink still delivers it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use goal_types::GoalId;
use tokio::sync::oneshot;

use crate::error::RemoteError;
use crate::wire::MessageId;

/// Acknowledgment of a completed remote write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistAck {
    /// Request the endpoint acknowledged
    pub request_id: MessageId,
}

/// Outcome of a remote write
pub type PersistResult = Result<PersistAck, RemoteError>;

/// Future of the outcome of one remote write
#[derive(Debug)]
pub struct PersistTicket {
    request_id: MessageId,
    goal_id: GoalId,
    receiver: oneshot::Receiver<PersistResult>,
}

/// Sink-side half of a ticket
#[derive(Debug)]
pub struct PersistResolver {
    request_id: MessageId,
    sender: oneshot::Sender<PersistResult>,
}

impl PersistTicket {
    /// Creates an unresolved ticket and the resolver that completes it
    pub fn pending(request_id: MessageId, goal_id: GoalId) -> (PersistTicket, PersistResolver) {
        let (sender, receiver) = oneshot::channel();
        (
            PersistTicket {
                request_id,
                goal_id,
                receiver,
            },
            PersistResolver { request_id, sender },
        )
    }

    /// Creates a ticket that is already resolved
    pub fn ready(request_id: MessageId, goal_id: GoalId, result: PersistResult) -> PersistTicket {
        let (ticket, resolver) = Self::pending(request_id, goal_id);
        resolver.resolve(result);
        ticket
    }

    /// Returns the request this ticket tracks
    pub fn request_id(&self) -> MessageId {
        self.request_id
    }

    /// Returns the goal that was written
    pub fn goal_id(&self) -> &GoalId {
        &self.goal_id
    }

    /// Takes the outcome without waiting
    ///
    /// Returns `None` while the write is in flight. The outcome is handed out
    /// once; later calls report [`RemoteError::Dropped`].
    pub fn try_outcome(&mut self) -> Option<PersistResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(RemoteError::Dropped)),
        }
    }
}

impl Future for PersistTicket {
    type Output = PersistResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(RemoteError::Dropped)))
    }
}

impl PersistResolver {
    /// Returns the request this resolver completes
    pub fn request_id(&self) -> MessageId {
        self.request_id
    }

    /// Reports the outcome; a dropped ticket is not an error
    pub fn resolve(self, result: PersistResult) {
        let _ = self.sender.send(result);
    }
}
