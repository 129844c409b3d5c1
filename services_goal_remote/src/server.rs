//! Receiving side of goal writes
//!
//! The endpoint decodes each call, applies it to a [`GoalBackend`] and answers
//! with a correlated response. Loopback transports in tests and demos route
//! sink traffic straight into a server.

use goal_types::{Goal, GoalId};
use tracing::debug;

use crate::error::RemoteResult;
use crate::wire::{
    decode_update_call, encode_update_response, GoalUpdateResponse, MessageEnvelope,
    SchemaVersion, GOAL_SCHEMA_VERSION,
};

/// Where the endpoint keeps goals
pub trait GoalBackend {
    fn update_goal(&mut self, id: &GoalId, goal: Goal) -> Result<(), String>;
}

/// Goal write endpoint
#[derive(Debug)]
pub struct GoalPersistServer<B: GoalBackend> {
    backend: B,
    endpoint: String,
    schema_version: SchemaVersion,
}

impl<B: GoalBackend> GoalPersistServer<B> {
    /// Creates an endpoint speaking the current schema
    pub fn new(backend: B, endpoint: impl Into<String>) -> Self {
        Self {
            backend,
            endpoint: endpoint.into(),
            schema_version: GOAL_SCHEMA_VERSION,
        }
    }

    /// Borrows the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrows the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Handles one call envelope and returns the response envelope
    ///
    /// Calls that cannot be decoded are an error for the transport; calls
    /// whose ID disagrees with the record they carry are answered with a
    /// rejection.
    pub fn handle_message(&mut self, message: MessageEnvelope) -> RemoteResult<MessageEnvelope> {
        let call = decode_update_call(&message, self.schema_version)?;

        let result = if call.goal_id != call.goal.id {
            Err(format!(
                "goal id mismatch: addressed {} but record is {}",
                call.goal_id, call.goal.id
            ))
        } else {
            self.backend.update_goal(&call.goal_id, call.goal)
        };
        debug!(goal = %call.goal_id, request = %call.request_id, ok = result.is_ok(), "goal write handled");

        let response = GoalUpdateResponse {
            request_id: call.request_id,
            result,
        };
        encode_update_response(&response, &self.endpoint, self.schema_version, message.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::wire::{decode_update_response, encode_update_call, GoalUpdateCall};
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct VecBackend {
        writes: Vec<Goal>,
    }

    impl GoalBackend for VecBackend {
        fn update_goal(&mut self, _id: &GoalId, goal: Goal) -> Result<(), String> {
            self.writes.push(goal);
            Ok(())
        }
    }

    fn goal(id: &str) -> Goal {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Goal::new(id, "Trip", 500.0, created)
    }

    #[test]
    fn test_handle_update() {
        let mut server = GoalPersistServer::new(VecBackend::default(), "goals");
        let call = GoalUpdateCall::new(GoalId::new("g1"), goal("g1"));
        let message = encode_update_call(&call, "goals", GOAL_SCHEMA_VERSION).unwrap();
        let message_id = message.id;

        let reply = server.handle_message(message).unwrap();
        let response = decode_update_response(&reply, GOAL_SCHEMA_VERSION).unwrap();

        assert_eq!(reply.correlation_id, Some(message_id));
        assert_eq!(response.request_id, call.request_id);
        assert_eq!(response.result, Ok(()));
        assert_eq!(server.backend().writes, vec![goal("g1")]);
    }

    #[test]
    fn test_mismatched_id_is_rejected() {
        let mut server = GoalPersistServer::new(VecBackend::default(), "goals");
        let call = GoalUpdateCall::new(GoalId::new("g1"), goal("g2"));
        let message = encode_update_call(&call, "goals", GOAL_SCHEMA_VERSION).unwrap();

        let reply = server.handle_message(message).unwrap();
        let response = decode_update_response(&reply, GOAL_SCHEMA_VERSION).unwrap();

        assert!(response.result.is_err());
        assert!(server.backend().writes.is_empty());
    }

    #[test]
    fn test_incompatible_schema_is_an_error() {
        let mut server = GoalPersistServer::new(VecBackend::default(), "goals");
        let call = GoalUpdateCall::new(GoalId::new("g1"), goal("g1"));
        let message = encode_update_call(&call, "goals", SchemaVersion::new(3, 0)).unwrap();

        let result = server.handle_message(message);
        assert!(matches!(result, Err(RemoteError::SchemaMismatch { .. })));
    }
}
