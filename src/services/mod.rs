//! Application services layer.
//!
//! Services encapsulate the filesystem work behind profile and snapshot
//! operations, separated from the session state kept by [`App`](crate::app::App).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Front end (CLI)                 │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │        App (session: profile, listing,          │
//! │             selection, toasts)                  │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │               Services Layer                    │
//! │  ┌────────────────┐   ┌─────────────────┐       │
//! │  │ ProfileService │   │ SnapshotService │       │
//! │  └────────────────┘   └─────────────────┘       │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │   Infrastructure (file_manager, config JSON)    │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod profile_service;
pub mod snapshot_service;

// Re-export common types
pub use profile_service::ProfileService;
pub use snapshot_service::{CopyReport, RenameResult, SnapshotInfo, SnapshotService};
