//! Goal update contract tests
//!
//! These tests define the stable contract for goal writes to the remote
//! endpoint.

use services_goal_remote::SchemaVersion;

// ===== Goal Update Contract Version =====
pub const GOAL_UPDATE_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

// ===== Action Identifiers =====
pub const ACTION_GOAL_UPDATE: &str = "goal.update";
pub const ACTION_GOAL_UPDATE_RESPONSE: &str = "goal.update.response";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        object_keys, sample_goal, verify_envelope_contract, verify_major_version,
    };
    use goal_types::GoalId;
    use services_goal_remote::{
        GoalUpdateCall, GoalUpdateResponse, MessageId, SinkConfig, GOAL_SCHEMA_VERSION,
        GOAL_UPDATE_ACTION, GOAL_UPDATE_RESPONSE_ACTION,
    };
    use services_goal_remote::wire::{encode_update_call, encode_update_response};

    #[test]
    fn test_action_identifiers_stable() {
        assert_eq!(GOAL_UPDATE_ACTION, ACTION_GOAL_UPDATE);
        assert_eq!(GOAL_UPDATE_RESPONSE_ACTION, ACTION_GOAL_UPDATE_RESPONSE);
    }

    #[test]
    fn test_schema_version_stable() {
        assert_eq!(GOAL_SCHEMA_VERSION, GOAL_UPDATE_SCHEMA_VERSION);
        assert_eq!(SinkConfig::default().schema_version, GOAL_UPDATE_SCHEMA_VERSION);
        assert_eq!(SinkConfig::default().endpoint, "goals");
    }

    #[test]
    fn test_update_call_envelope() {
        let call = GoalUpdateCall::new(GoalId::new("g1"), sample_goal());
        let envelope = encode_update_call(&call, "goals", GOAL_SCHEMA_VERSION).unwrap();

        verify_envelope_contract(&envelope, ACTION_GOAL_UPDATE, GOAL_UPDATE_SCHEMA_VERSION);
        verify_major_version(&envelope, 1);
        assert_eq!(envelope.correlation_id, None);
    }

    #[test]
    fn test_update_call_payload_fields() {
        let call = GoalUpdateCall::new(GoalId::new("g1"), sample_goal());
        let envelope = encode_update_call(&call, "goals", GOAL_SCHEMA_VERSION).unwrap();
        let payload: serde_json::Value =
            serde_json::from_slice(envelope.payload.as_bytes()).unwrap();

        assert_eq!(object_keys(&payload), vec!["goal", "goalId", "requestId"]);
        assert_eq!(payload["goalId"], "g1");
        assert_eq!(payload["goal"]["id"], "g1");
    }

    #[test]
    fn test_update_response_envelope() {
        let call_id = MessageId::new();
        let response = GoalUpdateResponse {
            request_id: MessageId::new(),
            result: Ok(()),
        };
        let envelope =
            encode_update_response(&response, "goals", GOAL_SCHEMA_VERSION, call_id).unwrap();

        verify_envelope_contract(
            &envelope,
            ACTION_GOAL_UPDATE_RESPONSE,
            GOAL_UPDATE_SCHEMA_VERSION,
        );
        assert_eq!(envelope.correlation_id, Some(call_id));
    }

    #[test]
    fn test_update_response_payload_fields() {
        let response = GoalUpdateResponse {
            request_id: MessageId::new(),
            result: Err("quota exceeded".to_string()),
        };
        let payload = serde_json::to_value(&response).unwrap();

        assert_eq!(object_keys(&payload), vec!["requestId", "result"]);
        assert_eq!(payload["result"]["Err"], "quota exceeded");
    }
}
