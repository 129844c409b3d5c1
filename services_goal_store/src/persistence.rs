//! Goal store persistence layer
//!
//! Snapshots of the store are versioned JSON with goals in stable ID order.
//! Loading is strict by default; `load_snapshot_safe` falls back to an empty
//! snapshot when the bytes are corrupt or from an unknown version.

use crate::GoalStore;
use goal_types::{Goal, GoalId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Serializable container for every stored goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Version of the snapshot format
    pub version: u32,
    /// Goals keyed by ID (stable ordering via BTreeMap)
    pub goals: BTreeMap<GoalId, Goal>,
}

impl GoalSnapshot {
    /// Current version of the snapshot format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            goals: BTreeMap::new(),
        }
    }

    /// Captures the contents of a store
    pub fn from_store(store: &GoalStore) -> Self {
        let mut snapshot = Self::new();
        for goal in store.export_goals() {
            snapshot.goals.insert(goal.id.clone(), goal);
        }
        snapshot
    }

    /// Rebuilds a store from this snapshot
    pub fn to_store(&self) -> GoalStore {
        GoalStore::with_goals(self.goals.values().cloned())
    }
}

impl Default for GoalSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize goals: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize goals: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Snapshot entry {key} holds goal {id}")]
    KeyMismatch { key: GoalId, id: GoalId },

    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes a snapshot to JSON bytes
pub fn serialize_snapshot(snapshot: &GoalSnapshot) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot)
        .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes a snapshot from JSON bytes
pub fn deserialize_snapshot(bytes: &[u8]) -> PersistenceResult<GoalSnapshot> {
    let snapshot: GoalSnapshot = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    if snapshot.version != GoalSnapshot::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(snapshot.version));
    }

    if let Some((key, goal)) = snapshot.goals.iter().find(|(key, goal)| **key != goal.id) {
        return Err(PersistenceError::KeyMismatch {
            key: key.clone(),
            id: goal.id.clone(),
        });
    }

    Ok(snapshot)
}

/// Loads a snapshot from bytes, falling back to an empty one on error
pub fn load_snapshot_safe(bytes: &[u8]) -> GoalSnapshot {
    deserialize_snapshot(bytes).unwrap_or_else(|err| {
        tracing::warn!(%err, "discarding unreadable goal snapshot");
        GoalSnapshot::new()
    })
}

/// Writes a snapshot of `store` to `path`
pub fn save_store(store: &GoalStore, path: impl AsRef<Path>) -> PersistenceResult<()> {
    let bytes = serialize_snapshot(&GoalSnapshot::from_store(store))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Reads a store back from `path`
pub fn load_store(path: impl AsRef<Path>) -> PersistenceResult<GoalStore> {
    let bytes = std::fs::read(path)?;
    Ok(deserialize_snapshot(&bytes)?.to_store())
}
