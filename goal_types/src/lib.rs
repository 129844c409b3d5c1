//! # Goal Types
//!
//! This crate defines the goal record shared by the store, the remote sink
//! and the editing session.
//!
//! ## Philosophy
//!
//! - **Full records only**: Edits are merged into complete records, never patches
//! - **Coercion is total**: Unparseable amounts become NaN, not errors
//! - **Value identity**: Goals compare by value, with NaN equal to NaN
//!
//! ## Key Types
//!
//! - [`GoalId`]: Opaque stable identifier of a goal
//! - [`Goal`]: The full goal record
//! - [`GoalField`] / [`FieldValue`]: A single edited field and its coerced value

pub mod amount;
pub mod goal;
pub mod ids;

pub use amount::{format_amount, parse_amount, same_amount};
pub use goal::{FieldValue, Goal, GoalField};
pub use ids::GoalId;
