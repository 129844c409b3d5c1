//! The goal record and single-field edits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::{same_amount, serde_amount};
use crate::GoalId;

/// A savings goal
///
/// Field names follow the backend's camelCase JSON. `target_amount` may hold
/// NaN while a user is typing; it is written as `null` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Stable identifier
    pub id: GoalId,
    /// Display name
    pub name: String,
    /// A single displayable symbol, if one was chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Amount the user is saving towards
    #[serde(with = "serde_amount")]
    pub target_amount: f64,
    /// Date the user wants to reach the target by
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    /// Running balance (derived by the backend)
    #[serde(with = "serde_amount")]
    pub balance: f64,
    /// Creation time
    pub created: DateTime<Utc>,
}

impl Goal {
    /// Creates a goal with no icon, no target date and a zero balance
    pub fn new(
        id: impl Into<GoalId>,
        name: impl Into<String>,
        target_amount: f64,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            target_amount,
            target_date: None,
            balance: 0.0,
            created,
        }
    }

    /// Sets the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the target date
    pub fn with_target_date(mut self, target_date: DateTime<Utc>) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Sets the balance
    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    /// Returns the icon, normalized to empty text when absent
    pub fn icon_or_empty(&self) -> &str {
        self.icon.as_deref().unwrap_or("")
    }

    /// Returns a full copy of this goal with one field replaced
    pub fn merged_with(&self, value: &FieldValue) -> Goal {
        let mut merged = self.clone();
        match value {
            FieldValue::Name(name) => merged.name = name.clone(),
            FieldValue::Icon(icon) => merged.icon = Some(icon.clone()),
            FieldValue::TargetAmount(amount) => merged.target_amount = *amount,
            FieldValue::TargetDate(date) => merged.target_date = Some(*date),
        }
        merged
    }

    /// Checks whether the fields an editor watches are unchanged
    ///
    /// Watched fields are the identity, name, icon, target amount and target
    /// date. Balance and creation time are ignored.
    pub fn watched_fields_eq(&self, other: &Goal) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.icon == other.icon
            && same_amount(self.target_amount, other.target_amount)
            && self.target_date == other.target_date
    }
}

impl PartialEq for Goal {
    fn eq(&self, other: &Self) -> bool {
        self.watched_fields_eq(other)
            && same_amount(self.balance, other.balance)
            && self.created == other.created
    }
}

/// An editable goal field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalField {
    /// Display name
    Name,
    /// Icon symbol
    Icon,
    /// Target amount
    TargetAmount,
    /// Target date
    TargetDate,
}

impl GoalField {
    /// Returns the backend field name
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalField::Name => "name",
            GoalField::Icon => "icon",
            GoalField::TargetAmount => "targetAmount",
            GoalField::TargetDate => "targetDate",
        }
    }
}

impl fmt::Display for GoalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced value for a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Name(String),
    Icon(String),
    TargetAmount(f64),
    TargetDate(DateTime<Utc>),
}

impl FieldValue {
    /// Returns the field this value belongs to
    pub fn field(&self) -> GoalField {
        match self {
            FieldValue::Name(_) => GoalField::Name,
            FieldValue::Icon(_) => GoalField::Icon,
            FieldValue::TargetAmount(_) => GoalField::TargetAmount,
            FieldValue::TargetDate(_) => GoalField::TargetDate,
        }
    }
}
