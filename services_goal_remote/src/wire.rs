//! Wire format for remote goal writes

use goal_types::{Goal, GoalId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{RemoteError, RemoteResult};

/// Action for a goal write
pub const GOAL_UPDATE_ACTION: &str = "goal.update";

/// Action for the endpoint's answer to a goal write
pub const GOAL_UPDATE_RESPONSE_ACTION: &str = "goal.update.response";

/// Schema version spoken by this crate
pub const GOAL_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

/// Request or envelope ID of a goal write
///
/// Calls carry one as `requestId`; replies echo it so the sink can match a
/// reply to the write it is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "write:{}", self.0)
    }
}

/// Version of the goal update payloads
///
/// The endpoint accepts any call with its own major version; a minor bump
/// only adds optional goal fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether a peer stamping `other` can read goals written as `self`
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        GOAL_SCHEMA_VERSION
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Serialized JSON payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    data: Vec<u8>,
}

impl MessagePayload {
    /// Serializes `data` into a payload
    pub fn new<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            data: serde_json::to_vec(data)?,
        })
    }

    /// Deserializes the payload into a specific type
    pub fn deserialize<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }

    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Routing and metadata around a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Unique identifier for this message
    pub id: MessageId,
    /// Endpoint the message is addressed to
    pub endpoint: String,
    /// Action to invoke
    pub action: String,
    /// Schema version of the payload
    pub schema_version: SchemaVersion,
    /// Request this message answers, if it is a response
    pub correlation_id: Option<MessageId>,
    /// Serialized payload
    pub payload: MessagePayload,
}

impl MessageEnvelope {
    /// Creates a new message envelope
    pub fn new(
        endpoint: impl Into<String>,
        action: impl Into<String>,
        schema_version: SchemaVersion,
        payload: MessagePayload,
    ) -> Self {
        Self {
            id: MessageId::new(),
            endpoint: endpoint.into(),
            action: action.into(),
            schema_version,
            correlation_id: None,
            payload,
        }
    }

    /// Sets the correlation ID (for responses)
    pub fn with_correlation(mut self, correlation_id: MessageId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Checks if this is a response to another message
    pub fn is_response(&self) -> bool {
        self.correlation_id.is_some()
    }
}

/// A full-record write of one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdateCall {
    pub request_id: MessageId,
    pub goal_id: GoalId,
    pub goal: Goal,
}

impl GoalUpdateCall {
    /// Creates a call with a fresh request ID
    pub fn new(goal_id: GoalId, goal: Goal) -> Self {
        Self {
            request_id: MessageId::new(),
            goal_id,
            goal,
        }
    }
}

/// The endpoint's answer to a [`GoalUpdateCall`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdateResponse {
    pub request_id: MessageId,
    pub result: Result<(), String>,
}

/// Encodes a call addressed to `endpoint`
pub fn encode_update_call(
    call: &GoalUpdateCall,
    endpoint: &str,
    schema_version: SchemaVersion,
) -> RemoteResult<MessageEnvelope> {
    let payload = MessagePayload::new(call).map_err(|err| RemoteError::Codec(err.to_string()))?;
    Ok(MessageEnvelope::new(
        endpoint,
        GOAL_UPDATE_ACTION,
        schema_version,
        payload,
    ))
}

/// Decodes a call, rejecting other actions and incompatible schemas
pub fn decode_update_call(
    message: &MessageEnvelope,
    expected: SchemaVersion,
) -> RemoteResult<GoalUpdateCall> {
    check_message(message, GOAL_UPDATE_ACTION, expected)?;
    message
        .payload
        .deserialize::<GoalUpdateCall>()
        .map_err(|err| RemoteError::Codec(err.to_string()))
}

/// Encodes a response correlated to the call's envelope
pub fn encode_update_response(
    response: &GoalUpdateResponse,
    endpoint: &str,
    schema_version: SchemaVersion,
    correlation_id: MessageId,
) -> RemoteResult<MessageEnvelope> {
    let payload =
        MessagePayload::new(response).map_err(|err| RemoteError::Codec(err.to_string()))?;
    Ok(MessageEnvelope::new(
        endpoint,
        GOAL_UPDATE_RESPONSE_ACTION,
        schema_version,
        payload,
    )
    .with_correlation(correlation_id))
}

/// Decodes a response, rejecting other actions and incompatible schemas
pub fn decode_update_response(
    message: &MessageEnvelope,
    expected: SchemaVersion,
) -> RemoteResult<GoalUpdateResponse> {
    check_message(message, GOAL_UPDATE_RESPONSE_ACTION, expected)?;
    message
        .payload
        .deserialize::<GoalUpdateResponse>()
        .map_err(|err| RemoteError::Codec(err.to_string()))
}

fn check_message(
    message: &MessageEnvelope,
    action: &str,
    expected: SchemaVersion,
) -> RemoteResult<()> {
    if message.action != action {
        return Err(RemoteError::Codec(format!(
            "unexpected action '{}', expected '{}'",
            message.action, action
        )));
    }
    if !message.schema_version.is_compatible_with(&expected) {
        return Err(RemoteError::SchemaMismatch {
            expected,
            received: message.schema_version,
        });
    }
    Ok(())
}
