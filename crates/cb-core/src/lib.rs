//! Content Blocker Core Library
//!
//! Rule model for browser content-blocking rule lists: a trigger describing
//! which requests match, paired with the action applied to them.
//!
//! # Modules
//!
//! - `types`: Rule, trigger, action and their enumerated fields
//! - `order`: Canonical total order used before a rule list is emitted
//! - `subsume`: Superset test between two rules' matching scopes

pub mod order;
pub mod subsume;
pub mod types;

// Re-export commonly used types
pub use order::{is_canonical, sort_rules};
pub use types::{
    Action, ActionType, LoadType, ResourceType, Rule, Trigger, UrlSelection, UrlSelectionKind,
};
