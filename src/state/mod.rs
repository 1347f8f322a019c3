//! Session state owned by the [`App`](crate::app::App) facade.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │                   App                    │
//! ├──────────────────────────────────────────┤
//! │  current profile name + Profile record   │
//! │  ┌────────────────────────────────────┐  │
//! │  │ SnapshotList                       │  │
//! │  │  - sorted snapshot names           │  │
//! │  │  - selected index (resolved by     │  │
//! │  │    name after every refresh)       │  │
//! │  └────────────────────────────────────┘  │
//! │  ToastManager (status line)              │
//! └──────────────────────────────────────────┘
//! ```

pub mod selection;

pub use selection::{resolve_selection, SnapshotList};
