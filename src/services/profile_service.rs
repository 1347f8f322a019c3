//! Profile service for profile management operations.
//!
//! Each profile is one JSON record `<name>.json` inside the profiles
//! directory. The record file name is the profile's identity, so renaming
//! a profile renames its file.

use crate::config::{read_json, write_json, Profile};
use crate::error::{SaveError, SaveResult};
use crate::utils::validate_name;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const RECORD_EXTENSION: &str = "json";

/// Service for profile-related operations.
///
/// This service provides a clean interface for profile records without
/// direct dependencies on UI state.
pub struct ProfileService;

impl ProfileService {
    /// Path of the record for `name`.
    pub fn record_path(profiles_dir: &Path, name: &str) -> PathBuf {
        profiles_dir.join(format!("{}.{}", name, RECORD_EXTENSION))
    }

    /// Whether a record exists for `name`.
    pub fn exists(profiles_dir: &Path, name: &str) -> bool {
        Self::record_path(profiles_dir, name).is_file()
    }

    /// Get all profile names, sorted.
    ///
    /// # Returns
    ///
    /// An empty list if the profiles directory does not exist yet.
    pub fn list_profiles(profiles_dir: &Path) -> SaveResult<Vec<String>> {
        let entries = match fs::read_dir(profiles_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SaveError::io(
                    format!("Failed to read profiles directory {:?}", profiles_dir),
                    e,
                ))
            }
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load a profile, creating an empty record on first use.
    ///
    /// # Arguments
    ///
    /// * `profiles_dir` - Directory holding the profile records.
    /// * `name` - Name of the profile to load.
    pub fn load(profiles_dir: &Path, name: &str) -> SaveResult<Profile> {
        let path = Self::record_path(profiles_dir, name);
        if path.exists() {
            let profile = read_json(&path)?;
            debug!("Loaded profile '{}'", name);
            Ok(profile)
        } else {
            let profile = Profile::default();
            Self::save(profiles_dir, name, &profile)?;
            info!("Created empty profile '{}'", name);
            Ok(profile)
        }
    }

    /// Persist `profile` under `name`, overwriting any prior record.
    pub fn save(profiles_dir: &Path, name: &str, profile: &Profile) -> SaveResult<()> {
        write_json(&Self::record_path(profiles_dir, name), profile)?;
        debug!("Saved profile '{}'", name);
        Ok(())
    }

    /// Create a new, empty profile record.
    ///
    /// # Errors
    ///
    /// `InvalidName` for a bad name, `NameConflict` if the record already exists.
    pub fn create_profile(profiles_dir: &Path, name: &str) -> SaveResult<Profile> {
        validate_name(name)?;
        if Self::exists(profiles_dir, name) {
            return Err(SaveError::NameConflict(name.to_string()));
        }

        let profile = Profile::default();
        Self::save(profiles_dir, name, &profile)?;
        info!("Created profile: {}", name);
        Ok(profile)
    }

    /// Rename a profile.
    ///
    /// # Arguments
    ///
    /// * `profiles_dir` - Directory holding the profile records.
    /// * `old_name` - Current name of the profile.
    /// * `new_name` - New name for the profile (trimmed before use).
    ///
    /// # Returns
    ///
    /// The trimmed new name.
    pub fn rename_profile(profiles_dir: &Path, old_name: &str, new_name: &str) -> SaveResult<String> {
        let new_name = new_name.trim();
        validate_name(new_name)?;

        if new_name == old_name {
            return Ok(new_name.to_string());
        }
        if Self::exists(profiles_dir, new_name) {
            return Err(SaveError::NameConflict(new_name.to_string()));
        }
        if !Self::exists(profiles_dir, old_name) {
            return Err(SaveError::ProfileNotFound(old_name.to_string()));
        }

        let old_path = Self::record_path(profiles_dir, old_name);
        let new_path = Self::record_path(profiles_dir, new_name);
        fs::rename(&old_path, &new_path).map_err(|e| {
            SaveError::io(format!("Failed to rename profile '{}'", old_name), e)
        })?;

        info!("Renamed profile from '{}' to '{}'", old_name, new_name);
        Ok(new_name.to_string())
    }

    /// Delete a profile.
    ///
    /// # Returns
    ///
    /// The remaining profile names, sorted. The caller switches to the first one
    /// if it deleted the current profile.
    ///
    /// # Errors
    ///
    /// `LastProfile` if this is the only remaining profile.
    pub fn delete_profile(profiles_dir: &Path, name: &str) -> SaveResult<Vec<String>> {
        let profiles = Self::list_profiles(profiles_dir)?;
        if profiles.len() <= 1 {
            return Err(SaveError::LastProfile);
        }
        if !profiles.iter().any(|p| p == name) {
            return Err(SaveError::ProfileNotFound(name.to_string()));
        }

        let path = Self::record_path(profiles_dir, name);
        fs::remove_file(&path)
            .map_err(|e| SaveError::io(format!("Failed to delete profile '{}'", name), e))?;

        info!("Deleted profile: {}", name);
        Ok(profiles.into_iter().filter(|p| p != name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_profiles_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let names = ProfileService::list_profiles(&temp_dir.path().join("profiles")).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_list_profiles_sorted_json_only() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("zeta.json"), "{}").unwrap();
        fs::write(dir.join("alpha.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.join("dir.json")).unwrap();

        let names = ProfileService::list_profiles(dir).unwrap();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_load_auto_creates_empty_record() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("profiles");

        let profile = ProfileService::load(&dir, "default").unwrap();
        assert_eq!(profile, Profile::default());
        assert!(ProfileService::exists(&dir, "default"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let mut profile = Profile::default();
        profile.set_origin(PathBuf::from("/games/live"));
        profile.set_files(["slot1.sav"]);

        ProfileService::save(dir, "main", &profile).unwrap();
        assert_eq!(ProfileService::load(dir, "main").unwrap(), profile);
    }

    #[test]
    fn test_rename_conflict_and_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        ProfileService::create_profile(dir, "a").unwrap();
        ProfileService::create_profile(dir, "b").unwrap();

        let err = ProfileService::rename_profile(dir, "a", "b").unwrap_err();
        assert!(matches!(err, SaveError::NameConflict(_)));

        let err = ProfileService::rename_profile(dir, "missing", "c").unwrap_err();
        assert!(matches!(err, SaveError::ProfileNotFound(_)));

        let err = ProfileService::rename_profile(dir, "a", "a/b").unwrap_err();
        assert!(matches!(err, SaveError::InvalidName { .. }));

        let renamed = ProfileService::rename_profile(dir, "a", "  c  ").unwrap();
        assert_eq!(renamed, "c");
        assert_eq!(ProfileService::list_profiles(dir).unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn test_delete_last_profile_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        ProfileService::create_profile(dir, "only").unwrap();

        let err = ProfileService::delete_profile(dir, "only").unwrap_err();
        assert!(matches!(err, SaveError::LastProfile));
        assert_eq!(ProfileService::list_profiles(dir).unwrap(), vec!["only"]);
    }

    #[test]
    fn test_delete_returns_remaining() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        for name in ["c", "a", "b"] {
            ProfileService::create_profile(dir, name).unwrap();
        }

        let remaining = ProfileService::delete_profile(dir, "a").unwrap();
        assert_eq!(remaining, vec!["b", "c"]);
        assert!(!ProfileService::exists(dir, "a"));
    }

    #[test]
    fn test_create_duplicate_profile_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        ProfileService::create_profile(dir, "work").unwrap();
        let err = ProfileService::create_profile(dir, "work").unwrap_err();
        assert!(matches!(err, SaveError::NameConflict(_)));
    }
}
