//! # Goal Store Service
//!
//! The shared, process-wide record of every loaded goal.
//!
//! ## Philosophy
//!
//! - **Injected, not ambient**: Editors receive a [`RecordStore`] at construction
//! - **Whole records**: `replace` overwrites the full goal at its ID
//! - **Last writer wins**: No merging, no conflict detection
//! - **Observable**: Every write bumps a revision counter owners can poll
//!
//! ## Example
//!
//! ```ignore
//! use services_goal_store::{GoalStore, RecordStore, SharedGoalStore};
//!
//! let store = SharedGoalStore::new(GoalStore::new());
//! let mut writer = store.clone();
//!
//! writer.replace(goal);
//! let current = store.get(&goal_id);
//! ```

pub mod persistence;

use goal_types::{Goal, GoalId};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::trace;

/// Read/replace access to the canonical goal records
pub trait RecordStore {
    /// Looks up a goal; `None` means the goal is not loaded yet
    fn get(&self, id: &GoalId) -> Option<Goal>;

    /// Overwrites the stored goal at `goal.id`
    fn replace(&mut self, goal: Goal);
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn get(&self, id: &GoalId) -> Option<Goal> {
        (**self).get(id)
    }

    fn replace(&mut self, goal: Goal) {
        (**self).replace(goal)
    }
}

/// In-memory goal store
#[derive(Debug, Clone, Default)]
pub struct GoalStore {
    /// Goals keyed by ID (stable ordering)
    goals: BTreeMap<GoalId, Goal>,
    /// Incremented on every write
    revision: u64,
}

impl GoalStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given goals
    pub fn with_goals(goals: impl IntoIterator<Item = Goal>) -> Self {
        let mut store = Self::new();
        store.import_goals(goals);
        store
    }

    /// Borrows a stored goal
    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.get(id)
    }

    /// Removes a goal, returning it if it was present
    pub fn remove(&mut self, id: &GoalId) -> Option<Goal> {
        let removed = self.goals.remove(id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Returns all goal IDs in stable order
    pub fn list_ids(&self) -> Vec<GoalId> {
        self.goals.keys().cloned().collect()
    }

    /// Returns the number of stored goals
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Returns true if no goals are stored
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Returns the write revision
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Exports every goal for persistence
    pub fn export_goals(&self) -> Vec<Goal> {
        self.goals.values().cloned().collect()
    }

    /// Replaces each given goal (merges with existing goals)
    pub fn import_goals(&mut self, goals: impl IntoIterator<Item = Goal>) {
        for goal in goals {
            self.replace(goal);
        }
    }

    /// Drops every stored goal
    pub fn clear(&mut self) {
        self.goals.clear();
        self.revision += 1;
    }
}

impl RecordStore for GoalStore {
    fn get(&self, id: &GoalId) -> Option<Goal> {
        self.goals.get(id).cloned()
    }

    fn replace(&mut self, goal: Goal) {
        self.revision += 1;
        trace!(goal = %goal.id, revision = self.revision, "goal replaced");
        self.goals.insert(goal.id.clone(), goal);
    }
}

/// Clonable handle to one [`GoalStore`] shared between views
///
/// Handles are single-threaded; every clone reads and writes the same store.
#[derive(Debug, Clone, Default)]
pub struct SharedGoalStore {
    inner: Rc<RefCell<GoalStore>>,
}

impl SharedGoalStore {
    /// Wraps a store in a shared handle
    pub fn new(store: GoalStore) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Runs `f` with read access to the store
    pub fn with<R>(&self, f: impl FnOnce(&GoalStore) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Runs `f` with write access to the store
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut GoalStore) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Returns the write revision of the shared store
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision()
    }
}

impl RecordStore for SharedGoalStore {
    fn get(&self, id: &GoalId) -> Option<Goal> {
        self.inner.borrow().get(id)
    }

    fn replace(&mut self, goal: Goal) {
        self.inner.borrow_mut().replace(goal)
    }
}
