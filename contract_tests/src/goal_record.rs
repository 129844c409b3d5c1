//! Goal record contract tests
//!
//! The backend stores goals as camelCase JSON. These tests pin the field
//! names and the encoding of optional and non-finite values.

#[cfg(test)]
mod tests {
    use crate::test_helpers::{object_keys, sample_goal};
    use goal_types::Goal;
    use serde_json::json;

    #[test]
    fn test_goal_field_names() {
        let value = serde_json::to_value(sample_goal()).unwrap();

        assert_eq!(
            object_keys(&value),
            vec![
                "balance",
                "created",
                "icon",
                "id",
                "name",
                "targetAmount",
                "targetDate"
            ]
        );
    }

    #[test]
    fn test_goal_golden_json() {
        let value = serde_json::to_value(sample_goal()).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "g1",
                "name": "Trip",
                "icon": "⭐",
                "targetAmount": 500.0,
                "targetDate": "2024-12-01T00:00:00Z",
                "balance": 120.0,
                "created": "2024-01-15T09:30:00Z"
            })
        );
    }

    #[test]
    fn test_absent_icon_is_omitted() {
        let mut goal = sample_goal();
        goal.icon = None;
        let value = serde_json::to_value(goal).unwrap();

        assert!(value.get("icon").is_none());
    }

    #[test]
    fn test_absent_target_date_is_null() {
        let mut goal = sample_goal();
        goal.target_date = None;
        let value = serde_json::to_value(goal).unwrap();

        assert!(value["targetDate"].is_null());
    }

    #[test]
    fn test_nan_amount_is_null() {
        let mut goal = sample_goal();
        goal.target_amount = f64::NAN;
        let value = serde_json::to_value(&goal).unwrap();

        assert!(value["targetAmount"].is_null());

        let decoded: Goal = serde_json::from_value(value).unwrap();
        assert!(decoded.target_amount.is_nan());
        assert_eq!(decoded, goal);
    }

    #[test]
    fn test_minimal_backend_record_decodes() {
        let value = json!({
            "id": "g2",
            "name": "Car",
            "targetAmount": 9000,
            "balance": 0,
            "created": "2023-06-01T12:00:00Z"
        });

        let goal: Goal = serde_json::from_value(value).unwrap();
        assert_eq!(goal.icon, None);
        assert_eq!(goal.target_date, None);
        assert_eq!(goal.target_amount, 9000.0);
    }
}
