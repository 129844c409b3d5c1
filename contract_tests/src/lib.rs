//! # Goal Contract Tests
//!
//! "Golden" tests for the goal wire and storage formats, so they don't drift
//! accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Field names and action identifiers are written out
//! - **Testability first**: Contract tests fail when a format changes
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! - `goal_record`: JSON shape of a goal
//! - `goal_update`: envelope, action and schema of goal writes
//! - `goal_snapshot`: on-disk snapshot format

pub mod goal_record;
pub mod goal_snapshot;
pub mod goal_update;

/// Common test helpers for contract validation
pub mod test_helpers {
    use chrono::{TimeZone, Utc};
    use goal_types::Goal;
    use services_goal_remote::{MessageEnvelope, SchemaVersion};

    /// A fully populated goal with fixed timestamps
    pub fn sample_goal() -> Goal {
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let target = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        Goal::new("g1", "Trip", 500.0, created)
            .with_icon("⭐")
            .with_target_date(target)
            .with_balance(120.0)
    }

    /// Verifies an envelope has the expected action and version
    pub fn verify_envelope_contract(
        envelope: &MessageEnvelope,
        expected_action: &str,
        expected_version: SchemaVersion,
    ) {
        assert_eq!(
            envelope.action, expected_action,
            "Action identifier changed: expected '{}', got '{}'",
            expected_action, envelope.action
        );
        assert_eq!(
            envelope.schema_version, expected_version,
            "Schema version changed: expected {}, got {}",
            expected_version, envelope.schema_version
        );
    }

    /// Verifies schema version stays within major version
    pub fn verify_major_version(envelope: &MessageEnvelope, expected_major: u32) {
        assert_eq!(
            envelope.schema_version.major, expected_major,
            "Major version changed (breaking change): expected {}, got {}",
            expected_major, envelope.schema_version.major
        );
    }

    /// Returns the sorted keys of a JSON object
    pub fn object_keys(value: &serde_json::Value) -> Vec<String> {
        let mut keys: Vec<String> = value
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}
