//! Goal snapshot contract tests
//!
//! Snapshots written by one build must load in the next.

#[cfg(test)]
mod tests {
    use crate::test_helpers::{object_keys, sample_goal};
    use goal_types::GoalId;
    use services_goal_store::persistence::{
        deserialize_snapshot, serialize_snapshot, GoalSnapshot, PersistenceError,
    };
    use services_goal_store::GoalStore;

    #[test]
    fn test_snapshot_version_stable() {
        assert_eq!(GoalSnapshot::CURRENT_VERSION, 1);
    }

    #[test]
    fn test_snapshot_top_level_fields() {
        let store = GoalStore::with_goals(vec![sample_goal()]);
        let bytes = serialize_snapshot(&GoalSnapshot::from_store(&store)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(object_keys(&value), vec!["goals", "version"]);
        assert_eq!(value["version"], 1);
        assert_eq!(value["goals"]["g1"]["name"], "Trip");
    }

    #[test]
    fn test_golden_snapshot_loads() {
        let golden = r#"{
            "version": 1,
            "goals": {
                "g1": {
                    "id": "g1",
                    "name": "Trip",
                    "icon": "⭐",
                    "targetAmount": 500.0,
                    "targetDate": "2024-12-01T00:00:00Z",
                    "balance": 120.0,
                    "created": "2024-01-15T09:30:00Z"
                }
            }
        }"#.as_bytes();

        let store = deserialize_snapshot(golden).unwrap().to_store();
        assert_eq!(store.goal(&GoalId::new("g1")), Some(&sample_goal()));
    }

    #[test]
    fn test_future_snapshot_version_rejected() {
        let future = br#"{ "version": 2, "goals": {} }"#;

        assert!(matches!(
            deserialize_snapshot(future),
            Err(PersistenceError::UnsupportedVersion(2))
        ));
    }
}
