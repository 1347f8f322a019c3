use crate::error::{SaveError, SaveResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the profile created on first run
pub const DEFAULT_PROFILE: &str = "default";

/// Process-wide configuration: which profile is current
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the current profile
    #[serde(default = "default_profile_name")]
    pub current_profile: String,
}

/// A named (origin, destination, file list) triple
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Live working directory of the application; empty when unset
    #[serde(default)]
    pub origin_path: PathBuf,
    /// Archive directory holding one subdirectory per snapshot; empty when unset
    #[serde(default)]
    pub destination_path: PathBuf,
    /// File names (relative to the origin) captured into each snapshot
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files_to_copy: Vec<String>,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE.to_string()
}

// Older records store an empty file list as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_profile: default_profile_name(),
        }
    }
}

impl AppConfig {
    /// Load the process-wide record, creating it with the default profile if absent
    pub fn load_or_create(config_path: &Path) -> SaveResult<Self> {
        if config_path.exists() {
            let mut config: AppConfig = read_json(config_path)?;
            if config.current_profile.is_empty() {
                config.current_profile = default_profile_name();
            }
            debug!("Loaded app config: current profile '{}'", config.current_profile);
            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            info!("Created app config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save the process-wide record
    pub fn save(&self, config_path: &Path) -> SaveResult<()> {
        write_json(config_path, self)
    }
}

impl Profile {
    /// Whether both origin and destination are set
    pub fn is_configured(&self) -> bool {
        !self.origin_path.as_os_str().is_empty() && !self.destination_path.as_os_str().is_empty()
    }

    /// Set the origin folder. A different origin invalidates the file list.
    ///
    /// Returns true if the file list was cleared.
    pub fn set_origin(&mut self, path: PathBuf) -> bool {
        let changed = self.origin_path != path;
        self.origin_path = path;
        if changed && !self.files_to_copy.is_empty() {
            self.files_to_copy.clear();
            return true;
        }
        false
    }

    /// Set the destination folder
    pub fn set_destination(&mut self, path: PathBuf) {
        self.destination_path = path;
    }

    /// Replace the file list, dropping duplicates and keeping first-seen order
    pub fn set_files<I, S>(&mut self, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files_to_copy.clear();
        for file in files {
            let file = file.into();
            if !self.files_to_copy.contains(&file) {
                self.files_to_copy.push(file);
            }
        }
    }

    /// Empty the file list
    pub fn clear_files(&mut self) {
        self.files_to_copy.clear();
    }

    /// Check if a file is in the list
    pub fn has_file(&self, file: &str) -> bool {
        self.files_to_copy.iter().any(|f| f == file)
    }
}

/// Read and parse a JSON record
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> SaveResult<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SaveError::io(format!("Failed to read {:?}", path), e))?;
    serde_json::from_str(&content).map_err(|e| SaveError::Serialization {
        context: format!("{:?}", path),
        source: e,
    })
}

/// Serialize and write a JSON record, creating the parent directory if needed
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> SaveResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| SaveError::Serialization {
        context: format!("{:?}", path),
        source: e,
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SaveError::io(format!("Failed to create directory {:?}", parent), e))?;
    }

    std::fs::write(path, content + "\n")
        .map_err(|e| SaveError::io(format!("Failed to write {:?}", path), e))
}
