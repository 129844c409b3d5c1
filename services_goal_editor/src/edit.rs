//! Field edits and their outcomes

use chrono::{DateTime, Utc};
use goal_types::{Goal, GoalField};
use services_goal_remote::PersistTicket;

/// A raw user edit of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Name text, accepted verbatim
    Name(String),
    /// Amount text, coerced to a number (NaN when unparseable)
    TargetAmount(String),
    /// Date picker value; `None` means the pick was cleared
    TargetDate(Option<DateTime<Utc>>),
    /// Symbol emitted by the icon picker
    Icon(String),
}

impl FieldEdit {
    /// Returns the field this edit targets
    pub fn field(&self) -> GoalField {
        match self {
            FieldEdit::Name(_) => GoalField::Name,
            FieldEdit::TargetAmount(_) => GoalField::TargetAmount,
            FieldEdit::TargetDate(_) => GoalField::TargetDate,
            FieldEdit::Icon(_) => GoalField::Icon,
        }
    }
}

/// Why an edit changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No goal has been primed yet
    Unprimed,
    /// The date picker was cleared
    NoDateSelected,
    /// The icon picker is not open
    PickerClosed,
    /// The icon picker was dismissed without a selection
    PickerDismissed,
}

/// Result of applying a [`FieldEdit`]
#[derive(Debug)]
pub enum EditOutcome {
    /// The merged goal was written to the store and handed to the sink
    Propagated {
        goal: Goal,
        ticket: PersistTicket,
    },
    /// The local mirror changed but nothing was propagated
    Withheld { field: GoalField },
    /// Nothing changed
    Ignored(IgnoreReason),
}

impl EditOutcome {
    pub fn is_propagated(&self) -> bool {
        matches!(self, EditOutcome::Propagated { .. })
    }

    /// Returns the propagated goal, if any
    pub fn goal(&self) -> Option<&Goal> {
        match self {
            EditOutcome::Propagated { goal, .. } => Some(goal),
            _ => None,
        }
    }

    /// Takes the persist ticket, if the edit was propagated
    pub fn into_ticket(self) -> Option<PersistTicket> {
        match self {
            EditOutcome::Propagated { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Returns the reason the edit was ignored, if it was
    pub fn ignored_reason(&self) -> Option<IgnoreReason> {
        match self {
            EditOutcome::Ignored(reason) => Some(*reason),
            _ => None,
        }
    }
}
