//! savekeep - snapshot, restore and manage named save folders
//!
//! This library copies a configured set of files between a live "origin"
//! folder and numbered snapshot folders under a "destination" folder, and
//! keeps several named profiles of those settings.

// Core modules
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod services;
pub mod state;
pub mod toast;
pub mod utils;

// Re-exports for convenience
pub use app::{App, OperationReport};
pub use config::{AppConfig, Profile};
pub use error::{SaveError, SaveResult};
pub use services::{CopyReport, ProfileService, RenameResult, SnapshotService};
pub use state::resolve_selection;
