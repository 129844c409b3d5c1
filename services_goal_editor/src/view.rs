//! Display projection of an editing session
//!
//! Rendering is external; this is what a renderer needs to draw the goal
//! editor.

use chrono::{DateTime, Utc};
use goal_types::{format_amount, Goal};
use serde::Serialize;

use crate::icon::IconPickerState;

pub const ADD_ICON_LABEL: &str = "Add Icon";
pub const CHANGE_ICON_LABEL: &str = "Change Icon";

/// What the goal editor shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    /// Icon to show; `None` when the mirror is empty
    pub icon: Option<String>,
    pub icon_button_label: &'static str,
    pub icon_picker_open: bool,
    pub name: String,
    pub target_date: Option<DateTime<Utc>>,
    /// Amount input text; empty for NaN
    pub target_amount: String,
    /// Balance text (read-only)
    pub balance: String,
    /// Creation date as `YYYY-MM-DD` (read-only)
    pub created: String,
}

impl GoalView {
    /// Projects local mirrors over the merge base
    ///
    /// Mirrors that were never set fall back to the goal's own values.
    pub fn project(
        source: &Goal,
        name: Option<&str>,
        icon: Option<&str>,
        target_amount: Option<f64>,
        target_date: Option<DateTime<Utc>>,
        picker: IconPickerState,
    ) -> Self {
        let icon = icon
            .unwrap_or_else(|| source.icon_or_empty())
            .to_string();
        let icon_button_label = if icon.is_empty() {
            ADD_ICON_LABEL
        } else {
            CHANGE_ICON_LABEL
        };

        Self {
            icon: Some(icon).filter(|icon| !icon.is_empty()),
            icon_button_label,
            icon_picker_open: picker.is_open(),
            name: name.unwrap_or(&source.name).to_string(),
            target_date: target_date.or(source.target_date),
            target_amount: amount_text(target_amount.unwrap_or(source.target_amount)),
            balance: amount_text(source.balance),
            created: source.created.format("%Y-%m-%d").to_string(),
        }
    }
}

fn amount_text(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format_amount(value)
    }
}
