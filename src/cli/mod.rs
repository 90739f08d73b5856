//! CLI command handlers
//!
//! Bridges the clap argument parsing with the view, snapshot and backend
//! layers.

pub mod auth;
pub mod context;
pub mod transaction;

pub use auth::{handle_config, handle_login, handle_logout, handle_signup, handle_theme};
pub use context::{AppContext, SourceArgs};
pub use transaction::{
    handle_add, handle_delete, handle_edit, handle_list, handle_summary, AddArgs, DeleteArgs,
    EditArgs, FilterArgs, ListArgs, SummaryArgs,
};
