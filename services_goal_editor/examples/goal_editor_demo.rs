//! Edits a goal through a session wired to a loopback endpoint.
//!
//! Run with `RUST_LOG=debug` to see the session and sink events.

use chrono::{TimeZone, Utc};
use goal_types::{Goal, GoalId};
use services_goal_editor::{load_config_safe, FieldEditSession, IconPicker};
use services_goal_remote::{
    GoalBackend, GoalPersistServer, MessageEnvelope, RemoteError, RemoteResult, RemoteTransport,
};
use services_goal_store::{GoalStore, RecordStore, SharedGoalStore};
use tracing_subscriber::EnvFilter;

/// Endpoint storage: a second store standing in for the backend database
#[derive(Default)]
struct RemoteGoals(GoalStore);

impl GoalBackend for RemoteGoals {
    fn update_goal(&mut self, _id: &GoalId, goal: Goal) -> Result<(), String> {
        self.0.replace(goal);
        Ok(())
    }
}

/// Hands each call straight to the server and keeps its reply
struct Loopback {
    server: GoalPersistServer<RemoteGoals>,
    reply: Option<MessageEnvelope>,
}

impl RemoteTransport for Loopback {
    fn send(&mut self, message: MessageEnvelope) -> RemoteResult<()> {
        self.reply = Some(self.server.handle_message(message)?);
        Ok(())
    }

    fn receive(&mut self) -> RemoteResult<MessageEnvelope> {
        self.reply
            .take()
            .ok_or_else(|| RemoteError::Transport("no reply".to_string()))
    }
}

struct FirstStar;

impl IconPicker for FirstStar {
    type Choice = String;

    fn present(&mut self) -> Option<String> {
        Some("⭐".to_string())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let created = Utc
        .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
        .single()
        .ok_or("invalid creation time")?;
    let trip = Goal::new("g1", "Trip", 500.0, created).with_balance(120.0);

    let store = SharedGoalStore::new(GoalStore::with_goals(vec![trip]));
    let transport = Loopback {
        server: GoalPersistServer::new(RemoteGoals::default(), "goals"),
        reply: None,
    };
    let config = load_config_safe(br#"{ "version": 1, "sink": { "endpoint": "goals" } }"#);
    let mut session = FieldEditSession::from_config(store.clone(), transport, config);

    session.open(&GoalId::new("g1"))?;
    print_view("opened", &session);

    let mut tickets = Vec::new();
    tickets.extend(session.edit_name("Trip Fund").into_ticket());
    tickets.extend(session.edit_target_amount("600").into_ticket());
    session.toggle_icon_picker();
    print_view("picker open", &session);
    tickets.extend(session.present_icon_picker(&mut FirstStar).into_ticket());
    print_view("edited", &session);

    let delivered = session.sink_mut().pump();
    println!("delivered {delivered} writes");
    for mut ticket in tickets {
        println!("  {} -> {:?}", ticket.request_id(), ticket.try_outcome());
    }

    let local = store.with(|goals| goals.goal(&GoalId::new("g1")).cloned());
    let remote = session
        .sink()
        .transport()
        .server
        .backend()
        .0
        .goal(&GoalId::new("g1"))
        .cloned();
    println!("local:  {}", serde_json::to_string(&local)?);
    println!("remote: {}", serde_json::to_string(&remote)?);
    Ok(())
}

fn print_view<S: RecordStore, R: services_goal_remote::RemoteSink>(
    label: &str,
    session: &FieldEditSession<S, R>,
) {
    if let Some(view) = session.view() {
        match serde_json::to_string(&view) {
            Ok(json) => println!("{label}: {json}"),
            Err(err) => eprintln!("{label}: {err}"),
        }
    }
}
