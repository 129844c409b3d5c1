//! # Goal Editor
//!
//! Per-field optimistic editing of a single goal.
//!
//! ## Philosophy
//!
//! - **Local first**: Each field has a local mirror that is the truth for that
//!   field until the next user edit or re-prime
//! - **Full records out**: Every accepted edit is merged into the whole goal and
//!   written to the store and the remote sink
//! - **Optimistic**: Remote outcomes are never applied back; failures do not
//!   roll anything back
//! - **Explicit events**: Priming, edits and picker toggles are method calls the
//!   owner makes; nothing happens in the background
//!
//! ## Example
//!
//! ```ignore
//! use services_goal_editor::{FieldEditSession, EditOutcome};
//!
//! let mut session = FieldEditSession::new(store, sink);
//! session.open(&goal_id)?;
//!
//! if let EditOutcome::Propagated { goal, ticket } = session.edit_name("Trip Fund") {
//!     // `goal` is already in the store; `ticket` resolves when the endpoint answers
//! }
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod icon;
pub mod session;
pub mod view;

pub use config::{load_config_safe, parse_config, AmountPolicy, ConfigError, EditorConfig};
pub use edit::{EditOutcome, FieldEdit, IgnoreReason};
pub use error::SessionError;
pub use icon::{IconChoice, IconPicker, IconPickerState};
pub use session::{FieldEditSession, PrimeOutcome};
pub use view::{GoalView, ADD_ICON_LABEL, CHANGE_ICON_LABEL};
