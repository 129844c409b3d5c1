//! FieldEditSession state machine
//!
//! The session mirrors the editable fields of one goal. The owner primes it
//! with the externally supplied goal and reports later changes through
//! [`FieldEditSession::observe`]. User edits update a mirror, merge into the
//! full goal, and go to the store and the sink in that order.

use chrono::{DateTime, Utc};
use goal_types::{parse_amount, FieldValue, Goal, GoalField, GoalId};
use services_goal_remote::{QueuedSink, RemoteSink, RemoteTransport};
use services_goal_store::RecordStore;
use tracing::debug;

use crate::config::{AmountPolicy, EditorConfig};
use crate::edit::{EditOutcome, FieldEdit, IgnoreReason};
use crate::error::SessionError;
use crate::icon::{IconChoice, IconPicker, IconPickerState};
use crate::view::GoalView;

/// Result of handing the session an external goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeOutcome {
    /// Mirrors were overwritten from the goal
    Primed { identity_changed: bool },
    /// Watched fields matched; mirrors were left alone
    Unchanged,
}

/// Local editable copies of the watched fields
#[derive(Debug, Clone, Default)]
struct LocalMirror {
    name: Option<String>,
    target_date: Option<DateTime<Utc>>,
    target_amount: Option<f64>,
    icon: Option<String>,
}

impl LocalMirror {
    fn from_goal(goal: &Goal) -> Self {
        Self {
            name: Some(goal.name.clone()),
            target_date: goal.target_date,
            target_amount: Some(goal.target_amount),
            icon: Some(goal.icon_or_empty().to_string()),
        }
    }
}

/// Editing session for one goal at a time
pub struct FieldEditSession<S: RecordStore, R: RemoteSink> {
    store: S,
    sink: R,
    config: EditorConfig,
    /// Latest external goal; merge base for edits
    source: Option<Goal>,
    mirror: LocalMirror,
    picker: IconPickerState,
}

impl<S: RecordStore, R: RemoteSink> FieldEditSession<S, R> {
    /// Creates an unprimed session with default configuration
    pub fn new(store: S, sink: R) -> Self {
        Self::with_config(store, sink, EditorConfig::default())
    }

    /// Creates an unprimed session
    pub fn with_config(store: S, sink: R, config: EditorConfig) -> Self {
        Self {
            store,
            sink,
            config,
            source: None,
            mirror: LocalMirror::default(),
            picker: IconPickerState::Closed,
        }
    }

    /// Overwrites every mirror from `goal`
    ///
    /// Unsent local edits are discarded. The picker state, the store and the
    /// sink are untouched.
    pub fn prime(&mut self, goal: &Goal) -> PrimeOutcome {
        let identity_changed = self.source_id() != Some(&goal.id);
        debug!(goal = %goal.id, identity_changed, "priming goal editor");

        self.mirror = LocalMirror::from_goal(goal);
        self.source = Some(goal.clone());
        PrimeOutcome::Primed { identity_changed }
    }

    /// Reports the current external goal
    ///
    /// The goal always becomes the merge base for later edits. Mirrors are
    /// re-primed only if the identity or a watched field changed since the
    /// last goal the session saw.
    pub fn observe(&mut self, goal: &Goal) -> PrimeOutcome {
        match &self.source {
            Some(source) if source.watched_fields_eq(goal) => {
                self.source = Some(goal.clone());
                PrimeOutcome::Unchanged
            }
            _ => self.prime(goal),
        }
    }

    /// Loads `id` from the store and observes it
    pub fn open(&mut self, id: &GoalId) -> Result<PrimeOutcome, SessionError> {
        let goal = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::GoalNotFound(id.clone()))?;
        Ok(self.observe(&goal))
    }

    /// Applies one user edit
    pub fn edit(&mut self, edit: FieldEdit) -> EditOutcome {
        if self.source.is_none() {
            debug!(field = %edit.field(), "edit before priming ignored");
            return EditOutcome::Ignored(IgnoreReason::Unprimed);
        }

        let value = match edit {
            FieldEdit::Name(name) => {
                self.mirror.name = Some(name.clone());
                FieldValue::Name(name)
            }
            FieldEdit::TargetAmount(raw) => {
                let amount = parse_amount(&raw);
                self.mirror.target_amount = Some(amount);
                if amount.is_nan() && self.config.amount_policy == AmountPolicy::WithholdInvalid {
                    debug!(raw = %raw, "unparseable amount kept local");
                    return EditOutcome::Withheld {
                        field: GoalField::TargetAmount,
                    };
                }
                FieldValue::TargetAmount(amount)
            }
            FieldEdit::TargetDate(None) => {
                return EditOutcome::Ignored(IgnoreReason::NoDateSelected);
            }
            FieldEdit::TargetDate(Some(date)) => {
                self.mirror.target_date = Some(date);
                FieldValue::TargetDate(date)
            }
            FieldEdit::Icon(symbol) => {
                self.mirror.icon = Some(symbol.clone());
                self.picker = IconPickerState::Closed;
                FieldValue::Icon(symbol)
            }
        };

        self.propagate(value)
    }

    /// Edits the name
    pub fn edit_name(&mut self, raw: impl Into<String>) -> EditOutcome {
        self.edit(FieldEdit::Name(raw.into()))
    }

    /// Edits the target amount from raw text
    pub fn edit_target_amount(&mut self, raw: impl Into<String>) -> EditOutcome {
        self.edit(FieldEdit::TargetAmount(raw.into()))
    }

    /// Applies a date picker value; `None` is a no-op
    pub fn pick_target_date(&mut self, date: Option<DateTime<Utc>>) -> EditOutcome {
        self.edit(FieldEdit::TargetDate(date))
    }

    /// Applies an icon selection and closes the picker
    pub fn select_icon<C: IconChoice + ?Sized>(&mut self, choice: &C) -> EditOutcome {
        self.edit(FieldEdit::Icon(choice.symbol().to_string()))
    }

    /// Flips the icon picker between open and closed
    pub fn toggle_icon_picker(&mut self) -> IconPickerState {
        self.picker = self.picker.toggled();
        self.picker
    }

    /// Presents `picker` if the icon picker is open
    ///
    /// A selection is applied like [`select_icon`](Self::select_icon); a
    /// dismissal leaves the picker open.
    pub fn present_icon_picker<P: IconPicker>(&mut self, picker: &mut P) -> EditOutcome {
        if !self.picker.is_open() {
            return EditOutcome::Ignored(IgnoreReason::PickerClosed);
        }
        match picker.present() {
            Some(choice) => self.select_icon(&choice),
            None => EditOutcome::Ignored(IgnoreReason::PickerDismissed),
        }
    }

    fn propagate(&mut self, value: FieldValue) -> EditOutcome {
        let Some(source) = &self.source else {
            return EditOutcome::Ignored(IgnoreReason::Unprimed);
        };
        let merged = source.merged_with(&value);

        self.store.replace(merged.clone());
        let ticket = self.sink.persist(&merged.id, &merged);
        debug!(
            goal = %merged.id,
            field = %value.field(),
            request = %ticket.request_id(),
            "goal edit propagated"
        );

        // The store now holds `merged`; the owner will report it back as the
        // external goal, so it is the merge base from here on.
        self.source = Some(merged.clone());
        EditOutcome::Propagated {
            goal: merged,
            ticket,
        }
    }

    /// Returns the ID of the goal being edited
    pub fn source_id(&self) -> Option<&GoalId> {
        self.source.as_ref().map(|goal| &goal.id)
    }

    /// Returns the current merge base
    pub fn source(&self) -> Option<&Goal> {
        self.source.as_ref()
    }

    pub fn is_primed(&self) -> bool {
        self.source.is_some()
    }

    pub fn local_name(&self) -> Option<&str> {
        self.mirror.name.as_deref()
    }

    pub fn local_target_date(&self) -> Option<DateTime<Utc>> {
        self.mirror.target_date
    }

    pub fn local_target_amount(&self) -> Option<f64> {
        self.mirror.target_amount
    }

    pub fn local_icon(&self) -> Option<&str> {
        self.mirror.icon.as_deref()
    }

    pub fn icon_picker_state(&self) -> IconPickerState {
        self.picker
    }

    pub fn icon_picker_open(&self) -> bool {
        self.picker.is_open()
    }

    /// Projects the session for display; `None` until primed
    pub fn view(&self) -> Option<GoalView> {
        let source = self.source.as_ref()?;
        Some(GoalView::project(
            source,
            self.local_name(),
            self.local_icon(),
            self.local_target_amount(),
            self.local_target_date(),
            self.picker,
        ))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    /// Ends the session, handing back its collaborators
    pub fn into_parts(self) -> (S, R) {
        (self.store, self.sink)
    }
}

impl<S: RecordStore, T: RemoteTransport> FieldEditSession<S, QueuedSink<T>> {
    /// Creates an unprimed session whose sink speaks `config.sink`
    pub fn from_config(store: S, transport: T, config: EditorConfig) -> Self {
        let sink = QueuedSink::new(transport, config.sink.clone());
        Self::with_config(store, sink, config)
    }
}
