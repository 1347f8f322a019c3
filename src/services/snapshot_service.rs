//! Snapshot service for save folder operations.
//!
//! A snapshot is a directory directly under the destination folder holding
//! copies of the profile's configured files. Automatically named snapshots
//! use `save_` followed by an eight digit, zero padded slot number; the
//! lowest free slot is always allocated.

use crate::error::{SaveError, SaveResult};
use crate::file_manager::{copy_file, create_dir, is_missing, FILE_MODE};
use crate::utils::validate_name;
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Prefix of automatically allocated snapshot names.
pub const SLOT_PREFIX: &str = "save_";

/// Number of digits in an allocated slot number.
pub const SLOT_DIGITS: usize = 8;

/// Number of allocatable slots (`save_00000000` ..= `save_99999999`).
pub const SLOT_COUNT: u32 = 100_000_000;

/// Outcome of copying a profile's file list between origin and a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Files copied, in file-list order.
    pub copied: Vec<String>,
    /// Files that were absent from the source and skipped.
    pub missing: Vec<String>,
}

impl CopyReport {
    /// Whether any configured file was skipped.
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Result of renaming a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameResult {
    /// The directory was renamed.
    Renamed,
    /// The new name equals the old one; nothing was touched.
    Unchanged,
}

/// A snapshot with its modification time, for display.
#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    pub name: String,
    pub modified: Option<DateTime<Local>>,
}

/// Service for snapshot operations.
///
/// All operations take the paths explicitly; callers own the profile state.
pub struct SnapshotService;

impl SnapshotService {
    /// List every direct subdirectory of `destination`, sorted.
    ///
    /// # Returns
    ///
    /// An empty list when `destination` is unset (empty path).
    pub fn list_snapshots(destination: &Path) -> SaveResult<Vec<String>> {
        if destination.as_os_str().is_empty() {
            return Ok(Vec::new());
        }

        let read_err =
            |e| SaveError::io(format!("Failed to read destination folder {:?}", destination), e);
        let mut names = Vec::new();
        for entry in fs::read_dir(destination).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("Skipping snapshot with non UTF-8 name: {:?}", raw),
            }
        }
        names.sort();
        Ok(names)
    }

    /// List snapshots along with their modification times.
    pub fn list_snapshot_details(destination: &Path) -> SaveResult<Vec<SnapshotInfo>> {
        let names = Self::list_snapshots(destination)?;
        Ok(names
            .into_iter()
            .map(|name| {
                let modified = fs::metadata(destination.join(&name))
                    .and_then(|m| m.modified())
                    .ok()
                    .map(DateTime::<Local>::from);
                SnapshotInfo { name, modified }
            })
            .collect())
    }

    /// Allocate the lowest unused `save_NNNNNNNN` name under `destination`.
    ///
    /// # Errors
    ///
    /// `NoSlotAvailable` when every slot is taken, `Io` if the folder is unreadable.
    pub fn allocate_name(destination: &Path) -> SaveResult<String> {
        let used: HashSet<u32> = Self::list_snapshots(destination)?
            .iter()
            .filter_map(|name| parse_slot(name))
            .collect();

        first_free_slot(&used, SLOT_COUNT)
            .map(format_slot)
            .ok_or(SaveError::NoSlotAvailable)
    }

    /// Create snapshot `name` under `destination` from the origin's files.
    ///
    /// Files absent from the origin are skipped and reported. Any other copy
    /// failure aborts and leaves the files copied so far in place.
    pub fn create(
        origin: &Path,
        destination: &Path,
        name: &str,
        files: &[String],
    ) -> SaveResult<CopyReport> {
        require_paths(origin, destination)?;

        let snapshot_dir = destination.join(name);
        create_dir(&snapshot_dir).map_err(|e| {
            SaveError::io(
                format!("Failed to create snapshot directory {:?}", snapshot_dir),
                e,
            )
        })?;

        let report = copy_files(origin, &snapshot_dir, files)?;
        info!(
            "Created snapshot '{}' ({} copied, {} missing)",
            name,
            report.copied.len(),
            report.missing.len()
        );
        Ok(report)
    }

    /// Copy the files of snapshot `name` back into the origin.
    ///
    /// Same missing-file policy as [`create`](Self::create); files already
    /// restored stay restored if a later copy fails.
    pub fn restore(
        origin: &Path,
        destination: &Path,
        name: &str,
        files: &[String],
    ) -> SaveResult<CopyReport> {
        require_paths(origin, destination)?;

        let snapshot_dir = destination.join(name);
        if !snapshot_dir.is_dir() {
            return Err(SaveError::io(
                format!("Snapshot {:?} not found", snapshot_dir),
                std::io::ErrorKind::NotFound.into(),
            ));
        }

        let report = copy_files(&snapshot_dir, origin, files)?;
        info!(
            "Restored snapshot '{}' ({} copied, {} missing)",
            name,
            report.copied.len(),
            report.missing.len()
        );
        Ok(report)
    }

    /// Replace the contents of snapshot `name` with the current origin files.
    ///
    /// Deletes the directory, then creates it again under the same name. If the
    /// re-creation fails partway the snapshot is left partially populated.
    pub fn replace(
        origin: &Path,
        destination: &Path,
        name: &str,
        files: &[String],
    ) -> SaveResult<CopyReport> {
        require_paths(origin, destination)?;
        Self::delete(destination, name)?;
        Self::create(origin, destination, name, files)
    }

    /// Recursively remove snapshot `name`.
    pub fn delete(destination: &Path, name: &str) -> SaveResult<()> {
        let snapshot_dir = destination.join(name);
        fs::remove_dir_all(&snapshot_dir).map_err(|e| {
            SaveError::io(
                format!("Failed to remove snapshot directory {:?}", snapshot_dir),
                e,
            )
        })?;
        info!("Deleted snapshot '{}'", name);
        Ok(())
    }

    /// Rename snapshot `old_name` to `new_name` (trimmed).
    ///
    /// Validation happens before any filesystem mutation: empty or reserved
    /// names fail with `InvalidName`, an existing sibling with `NameConflict`.
    /// Renaming to the same name is a successful no-op.
    pub fn rename(destination: &Path, old_name: &str, new_name: &str) -> SaveResult<RenameResult> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(SaveError::invalid_name(new_name, "name cannot be empty"));
        }
        if new_name == old_name {
            return Ok(RenameResult::Unchanged);
        }
        validate_name(new_name)?;

        let new_path = destination.join(new_name);
        if fs::symlink_metadata(&new_path).is_ok() {
            return Err(SaveError::NameConflict(new_name.to_string()));
        }

        let old_path = destination.join(old_name);
        fs::rename(&old_path, &new_path).map_err(|e| {
            SaveError::io(format!("Failed to rename save '{}'", old_name), e)
        })?;
        info!("Renamed snapshot '{}' to '{}'", old_name, new_name);
        Ok(RenameResult::Renamed)
    }
}

fn require_paths(origin: &Path, destination: &Path) -> SaveResult<()> {
    if origin.as_os_str().is_empty() || destination.as_os_str().is_empty() {
        return Err(SaveError::ConfigIncomplete);
    }
    Ok(())
}

fn copy_files(from_dir: &Path, to_dir: &Path, files: &[String]) -> SaveResult<CopyReport> {
    let mut report = CopyReport::default();
    for file in files {
        let source = from_dir.join(file);
        if is_missing(&source)? {
            warn!("File {:?} not found, skipping", source);
            report.missing.push(file.clone());
            continue;
        }
        copy_file(&source, &to_dir.join(file), FILE_MODE)?;
        report.copied.push(file.clone());
    }
    Ok(report)
}

/// Slot number of an automatically named snapshot, if `name` is one.
pub fn parse_slot(name: &str) -> Option<u32> {
    let digits = name.strip_prefix(SLOT_PREFIX)?;
    if digits.len() != SLOT_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Format a slot number as a snapshot name.
pub fn format_slot(slot: u32) -> String {
    format!("{}{:0width$}", SLOT_PREFIX, slot, width = SLOT_DIGITS)
}

fn first_free_slot(used: &HashSet<u32>, capacity: u32) -> Option<u32> {
    (0..capacity).find(|slot| !used.contains(slot))
}
