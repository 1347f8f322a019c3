//! Error types for snapshot and profile operations.

use std::io;

use thiserror::Error;

/// Result type for snapshot and profile operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors surfaced by the services and the [`App`](crate::app::App) facade.
///
/// None of these are fatal: the front end turns each into a message and the
/// session stays usable.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Origin or destination folder is not set for the current profile.
    #[error("Origin and destination folders must be set")]
    ConfigIncomplete,
    /// An action that needs a selected snapshot was invoked without one.
    #[error("Please select a save to {action}")]
    NoSelection { action: &'static str },
    /// An underlying filesystem call failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    /// A snapshot or profile with this name already exists.
    #[error("'{0}' already exists")]
    NameConflict(String),
    /// Empty name or reserved characters present.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
    /// Every `save_NNNNNNNN` slot is taken.
    #[error("No available save slot found")]
    NoSlotAvailable,
    /// Refused to delete the only remaining profile.
    #[error("You must have at least one profile")]
    LastProfile,
    /// No persisted record exists for this profile.
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),
    /// No snapshot with this name under the destination folder.
    #[error("Save '{0}' not found")]
    SnapshotNotFound(String),
    /// A persisted JSON record could not be read or written.
    #[error("Invalid record {context}: {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SaveError {
    /// Wrap an I/O error with the stage that failed.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn invalid_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason,
        }
    }

    /// Whether this is an informational notice rather than a failure.
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::NoSelection { .. } | Self::ConfigIncomplete)
    }
}
