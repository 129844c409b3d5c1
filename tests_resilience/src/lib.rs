//! Resilience Test Utilities
//!
//! Shared fixtures for end-to-end goal editing tests.
//!
//! ## Test Philosophy
//!
//! - **Optimistic under faults**: Remote failures never roll back local state
//! - **Deterministic failures**: Every fault is scripted through a [`FaultPlan`]
//! - **Full records**: The endpoint always receives the whole goal
//! - **Consistency**: Local and remote stores agree once every write succeeds

use std::collections::VecDeque;

use chrono::{TimeZone, Utc};
use goal_types::{Goal, GoalId};
use services_goal_editor::{EditorConfig, FieldEditSession};
use services_goal_remote::wire::{decode_update_response, encode_update_response};
use services_goal_remote::{
    GoalBackend, GoalPersistServer, GoalUpdateResponse, MessageEnvelope, MessageId, QueuedSink,
    RemoteError, RemoteResult, RemoteTransport, GOAL_SCHEMA_VERSION,
};
use services_goal_store::{GoalStore, RecordStore, SharedGoalStore};

/// Endpoint-side goal storage
#[derive(Debug, Default)]
pub struct StoreBackend {
    pub store: GoalStore,
    pub writes: Vec<Goal>,
}

impl GoalBackend for StoreBackend {
    fn update_goal(&mut self, _id: &GoalId, goal: Goal) -> Result<(), String> {
        self.writes.push(goal.clone());
        self.store.replace(goal);
        Ok(())
    }
}

/// What happens to one delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Delivered normally
    None,
    /// The send fails before reaching the endpoint
    Unreachable,
    /// The endpoint refuses the write without storing it
    Reject,
    /// The endpoint stores the write but the reply names another request
    StaleReply,
}

/// Faults to apply to successive deliveries; exhausted plans deliver normally
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    faults: VecDeque<Fault>,
}

impl FaultPlan {
    pub fn new(faults: impl IntoIterator<Item = Fault>) -> Self {
        Self {
            faults: faults.into_iter().collect(),
        }
    }

    fn next(&mut self) -> Fault {
        self.faults.pop_front().unwrap_or(Fault::None)
    }
}

/// In-process transport into a [`GoalPersistServer`]
#[derive(Debug)]
pub struct LoopbackTransport {
    pub server: GoalPersistServer<StoreBackend>,
    /// Endpoint of every envelope sent, in order
    pub endpoints: Vec<String>,
    plan: FaultPlan,
    reply: Option<MessageEnvelope>,
}

impl LoopbackTransport {
    pub fn new(plan: FaultPlan) -> Self {
        Self {
            server: GoalPersistServer::new(StoreBackend::default(), "goals"),
            endpoints: Vec::new(),
            plan,
            reply: None,
        }
    }

    /// Goals the endpoint has stored
    pub fn remote(&self) -> &GoalStore {
        &self.server.backend().store
    }

    fn reject(&self, message: &MessageEnvelope) -> RemoteResult<MessageEnvelope> {
        let call = services_goal_remote::wire::decode_update_call(message, GOAL_SCHEMA_VERSION)?;
        let response = GoalUpdateResponse {
            request_id: call.request_id,
            result: Err("rejected by endpoint".to_string()),
        };
        encode_update_response(&response, "goals", GOAL_SCHEMA_VERSION, message.id)
    }

    fn restamp(reply: MessageEnvelope) -> RemoteResult<MessageEnvelope> {
        let mut response = decode_update_response(&reply, GOAL_SCHEMA_VERSION)?;
        response.request_id = MessageId::new();
        let correlation = reply.correlation_id.unwrap_or_default();
        encode_update_response(&response, "goals", GOAL_SCHEMA_VERSION, correlation)
    }
}

impl RemoteTransport for LoopbackTransport {
    fn send(&mut self, message: MessageEnvelope) -> RemoteResult<()> {
        self.endpoints.push(message.endpoint.clone());
        let reply = match self.plan.next() {
            Fault::None => self.server.handle_message(message)?,
            Fault::Unreachable => {
                return Err(RemoteError::Transport("endpoint unreachable".to_string()))
            }
            Fault::Reject => self.reject(&message)?,
            Fault::StaleReply => Self::restamp(self.server.handle_message(message)?)?,
        };
        self.reply = Some(reply);
        Ok(())
    }

    fn receive(&mut self) -> RemoteResult<MessageEnvelope> {
        self.reply
            .take()
            .ok_or_else(|| RemoteError::Transport("no reply pending".to_string()))
    }
}

/// Session type used across the resilience tests
pub type TestSession = FieldEditSession<SharedGoalStore, QueuedSink<LoopbackTransport>>;

/// The goal from the Trip Fund walkthrough
pub fn trip() -> Goal {
    let created = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
    Goal::new("g1", "Trip", 500.0, created).with_balance(120.0)
}

/// A second goal with an icon and target date
pub fn car() -> Goal {
    let created = Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap();
    let target = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    Goal::new("g2", "Car", 9000.0, created)
        .with_icon("🚗")
        .with_target_date(target)
}

/// Builds a session over a shared store holding `goals`
///
/// The remote side starts with the same goals.
pub fn test_session(goals: Vec<Goal>, plan: FaultPlan) -> (TestSession, SharedGoalStore) {
    test_session_with_config(goals, plan, EditorConfig::default())
}

/// Like [`test_session`], with the sink and policy taken from `config`
pub fn test_session_with_config(
    goals: Vec<Goal>,
    plan: FaultPlan,
    config: EditorConfig,
) -> (TestSession, SharedGoalStore) {
    let store = SharedGoalStore::new(GoalStore::with_goals(goals.clone()));
    let mut transport = LoopbackTransport::new(plan);
    transport.server.backend_mut().store.import_goals(goals);
    (FieldEditSession::from_config(store.clone(), transport, config), store)
}

/// Reads one goal out of a shared store
pub fn local_goal(store: &SharedGoalStore, id: &str) -> Option<Goal> {
    store.get(&GoalId::new(id))
}
