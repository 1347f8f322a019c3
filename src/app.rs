//! The session facade driven by a front end.
//!
//! [`App`] owns the current profile, the snapshot listing with its
//! selection, and the toast slot. Every user action is a method returning a
//! typed result; the front end decides how to render notices and errors.

use crate::config::{AppConfig, Profile};
use crate::error::{SaveError, SaveResult};
use crate::file_manager::list_files;
use crate::services::{CopyReport, ProfileService, RenameResult, SnapshotService};
use crate::state::SnapshotList;
use crate::toast::ToastManager;
use crate::utils::{get_app_config_path, get_profiles_dir, next_profile_name, validate_name};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// What a snapshot copy operation did.
#[derive(Debug, Clone)]
pub struct OperationReport {
    /// Snapshot the operation acted on.
    pub snapshot: String,
    /// Files copied and files skipped because they were missing.
    pub copy: CopyReport,
}

/// Main application state
pub struct App {
    config_dir: PathBuf,
    app_config: AppConfig,
    profile: Profile,
    snapshots: SnapshotList,
    toasts: ToastManager,
}

impl App {
    /// Open a session on `config_dir`, creating first-run state as needed.
    pub fn open(config_dir: impl Into<PathBuf>) -> SaveResult<Self> {
        Self::with_toasts(config_dir, ToastManager::new())
    }

    /// Open a session with a caller-provided toast manager.
    pub fn with_toasts(config_dir: impl Into<PathBuf>, toasts: ToastManager) -> SaveResult<Self> {
        let config_dir = config_dir.into();
        let app_config = AppConfig::load_or_create(&get_app_config_path(&config_dir))?;
        let profile = ProfileService::load(&get_profiles_dir(&config_dir), &app_config.current_profile)?;
        info!(
            "Opened session in {:?} with profile '{}'",
            config_dir, app_config.current_profile
        );

        let mut app = Self {
            config_dir,
            app_config,
            profile,
            snapshots: SnapshotList::new(),
            toasts,
        };
        app.refresh_or_warn();
        Ok(app)
    }

    // ==================== Accessors ====================

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn profiles_dir(&self) -> PathBuf {
        get_profiles_dir(&self.config_dir)
    }

    /// Name of the current profile.
    pub fn current_profile(&self) -> &str {
        &self.app_config.current_profile
    }

    /// Settings of the current profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Sorted snapshot names under the current destination.
    pub fn snapshots(&self) -> &[String] {
        self.snapshots.names()
    }

    pub fn selected(&self) -> Option<usize> {
        self.snapshots.selected()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.snapshots.selected_name()
    }

    /// Select a snapshot by list index. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        self.snapshots.select(index)
    }

    /// Select a snapshot by name. Returns false if it is not listed.
    pub fn select_name(&mut self, name: &str) -> bool {
        self.snapshots.select_name(name)
    }

    /// Select a snapshot by name, failing with `SnapshotNotFound` if it is not listed.
    pub fn select_snapshot(&mut self, name: &str) -> SaveResult<()> {
        if self.snapshots.select_name(name) {
            Ok(())
        } else {
            Err(SaveError::SnapshotNotFound(name.to_string()))
        }
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    /// Current status line text (empty when no toast is showing).
    pub fn status(&self) -> String {
        self.toasts.message()
    }

    // ==================== Listing ====================

    /// Re-read the destination folder and re-resolve the selection by name.
    ///
    /// On failure the listing is emptied so it never shows stale names.
    pub fn refresh(&mut self) -> SaveResult<()> {
        match SnapshotService::list_snapshots(&self.profile.destination_path) {
            Ok(names) => {
                self.snapshots.refresh(names);
                Ok(())
            }
            Err(e) => {
                self.snapshots.clear();
                Err(e)
            }
        }
    }

    fn refresh_or_warn(&mut self) {
        if let Err(e) = self.refresh() {
            warn!("Failed to read destination folder: {}", e);
            self.toasts.error(e.to_string());
        }
    }

    fn require_selection(&self, action: &'static str) -> SaveResult<String> {
        self.snapshots
            .selected_name()
            .map(str::to_owned)
            .ok_or(SaveError::NoSelection { action })
    }

    // ==================== Snapshot actions ====================

    /// Capture the origin files into a newly allocated `save_NNNNNNNN` snapshot
    /// and select it.
    pub fn import_snapshot(&mut self) -> SaveResult<OperationReport> {
        if !self.profile.is_configured() {
            return Err(SaveError::ConfigIncomplete);
        }

        let destination = &self.profile.destination_path;
        let name = SnapshotService::allocate_name(destination)?;
        let result = SnapshotService::create(
            &self.profile.origin_path,
            destination,
            &name,
            &self.profile.files_to_copy,
        );

        let copy = match result {
            Ok(copy) => copy,
            Err(e) => {
                // A partially written snapshot may be on disk
                error!("Import into '{}' failed: {}", name, e);
                self.refresh_or_warn();
                self.toasts.error(format!("Failed to import {}", name));
                return Err(e);
            }
        };

        self.refresh()?;
        self.snapshots.select_name(&name);

        if copy.has_missing() {
            self.toasts.warning(format!(
                "Save {} imported, not found: {}",
                name,
                copy.missing.join(", ")
            ));
        } else {
            self.toasts
                .success(format!("Save {} successfully imported", name));
        }
        Ok(OperationReport {
            snapshot: name,
            copy,
        })
    }

    /// Copy the selected snapshot's files back into the origin.
    pub fn load_snapshot(&mut self) -> SaveResult<OperationReport> {
        let name = self.require_selection("load")?;
        let copy = SnapshotService::restore(
            &self.profile.origin_path,
            &self.profile.destination_path,
            &name,
            &self.profile.files_to_copy,
        )
        .inspect_err(|e| error!("Loading '{}' failed: {}", name, e))?;

        if copy.has_missing() {
            self.toasts.warning(format!(
                "Save loaded, missing in save: {}",
                copy.missing.join(", ")
            ));
        } else {
            self.toasts.success("Save loaded");
        }
        Ok(OperationReport {
            snapshot: name,
            copy,
        })
    }

    /// Overwrite the selected snapshot with the current origin files.
    pub fn replace_snapshot(&mut self) -> SaveResult<OperationReport> {
        let name = self.require_selection("replace")?;
        let result = SnapshotService::replace(
            &self.profile.origin_path,
            &self.profile.destination_path,
            &name,
            &self.profile.files_to_copy,
        );

        // The directory may be gone or half written; the listing must say so
        let refreshed = self.refresh();
        if let Err(e) = &refreshed {
            warn!("Failed to read destination folder: {}", e);
            self.toasts.error(e.to_string());
        }
        let copy = result.inspect_err(|e| error!("Replacing '{}' failed: {}", name, e))?;
        refreshed?;

        if copy.has_missing() {
            self.toasts.warning(format!(
                "{} replaced, not found: {}",
                name,
                copy.missing.join(", ")
            ));
        } else {
            self.toasts
                .success(format!("{} successfully replaced", name));
        }
        Ok(OperationReport {
            snapshot: name,
            copy,
        })
    }

    /// Delete the selected snapshot; the selection falls back to the last entry.
    ///
    /// Returns the deleted name.
    pub fn delete_snapshot(&mut self) -> SaveResult<String> {
        let name = self.require_selection("delete")?;
        if let Err(e) = SnapshotService::delete(&self.profile.destination_path, &name) {
            error!("Deleting '{}' failed: {}", name, e);
            // Part of the tree may already be gone
            self.refresh_or_warn();
            self.toasts.error(format!("Failed to delete {}", name));
            return Err(e);
        }

        self.snapshots.clear_selection();
        self.refresh()?;
        self.toasts
            .success(format!("{} successfully deleted", name));
        Ok(name)
    }

    /// Rename the selected snapshot and keep it selected under its new name.
    pub fn rename_snapshot(&mut self, new_name: &str) -> SaveResult<RenameResult> {
        let old_name = self.require_selection("rename")?;
        let new_name = new_name.trim();

        let result = SnapshotService::rename(&self.profile.destination_path, &old_name, new_name)?;
        if result == RenameResult::Renamed {
            self.refresh()?;
            self.snapshots.select_name(new_name);
            self.toasts
                .success(format!("Renamed {} to {}", old_name, new_name));
        }
        Ok(result)
    }

    // ==================== Profile settings ====================

    fn persist_profile(&self) -> SaveResult<()> {
        ProfileService::save(&self.profiles_dir(), self.current_profile(), &self.profile)
    }

    /// Set the origin folder. A different origin clears the file list.
    ///
    /// Returns true if the file list was cleared.
    pub fn set_origin_path(&mut self, path: impl Into<PathBuf>) -> SaveResult<bool> {
        let cleared = self.profile.set_origin(path.into());
        self.persist_profile()?;
        info!(
            "Origin set to {:?} (file list cleared: {})",
            self.profile.origin_path, cleared
        );
        Ok(cleared)
    }

    /// Set the destination folder and list its snapshots.
    pub fn set_destination_path(&mut self, path: impl Into<PathBuf>) -> SaveResult<()> {
        self.profile.set_destination(path.into());
        self.persist_profile()?;
        info!("Destination set to {:?}", self.profile.destination_path);
        self.refresh()
    }

    /// Replace the list of files captured by each snapshot.
    pub fn set_files_to_copy<I, S>(&mut self, files: I) -> SaveResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profile.set_files(files);
        self.persist_profile()
    }

    pub fn clear_files_to_copy(&mut self) -> SaveResult<()> {
        self.profile.clear_files();
        self.persist_profile()
    }

    /// Regular files in the origin folder, for choosing the file list.
    pub fn origin_files(&self) -> SaveResult<Vec<String>> {
        if self.profile.origin_path.as_os_str().is_empty() {
            return Err(SaveError::ConfigIncomplete);
        }
        list_files(&self.profile.origin_path)
    }

    // ==================== Profiles ====================

    /// All profile names, sorted.
    pub fn list_profiles(&self) -> SaveResult<Vec<String>> {
        ProfileService::list_profiles(&self.profiles_dir())
    }

    fn activate_profile(&mut self, name: &str) -> SaveResult<()> {
        self.profile = ProfileService::load(&self.profiles_dir(), name)?;
        self.app_config.current_profile = name.to_string();
        self.app_config
            .save(&get_app_config_path(&self.config_dir))?;
        self.snapshots.clear();
        self.refresh_or_warn();
        Ok(())
    }

    /// Make `name` the current profile, creating it empty if it has no record.
    pub fn switch_profile(&mut self, name: &str) -> SaveResult<()> {
        validate_name(name)?;
        self.persist_profile()?;
        self.activate_profile(name)?;
        info!("Switched to profile '{}'", name);
        Ok(())
    }

    /// Create an empty `New Profile N` and make it current.
    pub fn new_profile(&mut self) -> SaveResult<String> {
        self.persist_profile()?;
        let name = next_profile_name(&self.list_profiles()?);
        ProfileService::create_profile(&self.profiles_dir(), &name)?;
        self.activate_profile(&name)?;
        Ok(name)
    }

    /// Rename the current profile.
    pub fn rename_profile(&mut self, new_name: &str) -> SaveResult<String> {
        let old_name = self.current_profile().to_string();
        self.persist_profile()?;
        let new_name = ProfileService::rename_profile(&self.profiles_dir(), &old_name, new_name)?;

        self.app_config.current_profile = new_name.clone();
        self.app_config
            .save(&get_app_config_path(&self.config_dir))?;
        self.persist_profile()?;
        Ok(new_name)
    }

    /// Delete the current profile and switch to the first remaining one.
    ///
    /// Returns the name of the profile that is now current.
    pub fn delete_profile(&mut self) -> SaveResult<String> {
        let deleted = self.current_profile().to_string();
        let remaining = ProfileService::delete_profile(&self.profiles_dir(), &deleted)?;
        let next = remaining
            .into_iter()
            .next()
            .ok_or(SaveError::LastProfile)?;

        self.activate_profile(&next)?;
        info!("Deleted profile '{}', now using '{}'", deleted, next);
        Ok(next)
    }
}
