//! Shared test utilities for workflow integration tests.
//!
//! Provides `TestEnv` - an isolated savekeep environment (origin folder,
//! destination folder, config directory) with automatic cleanup via `TempDir`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use savekeep::config::{AppConfig, Profile};
use savekeep::toast::ToastManager;
use savekeep::utils::{get_app_config_path, get_profiles_dir};
use savekeep::App;

/// A complete isolated savekeep test environment.
///
/// Creates a temporary directory structure:
/// - `origin/` - live working files of the application
/// - `saves/` - destination folder holding snapshots
/// - `config/` - config directory (record + `profiles/`)
#[allow(dead_code)]
pub struct TestEnv {
    temp_dir: TempDir,
    pub origin: PathBuf,
    pub destination: PathBuf,
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new TestEnvBuilder for fluent configuration.
    pub fn new() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    /// Open a session on this environment. Toasts stay up long enough to inspect.
    pub fn open(&self) -> Result<App> {
        App::with_toasts(
            &self.config_dir,
            ToastManager::with_duration(Duration::from_secs(30)),
        )
        .context("Failed to open app")
    }

    // ==================== Path Helpers ====================

    pub fn origin_path(&self, file: &str) -> PathBuf {
        self.origin.join(file)
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.destination.join(name)
    }

    pub fn snapshot_file(&self, name: &str, file: &str) -> PathBuf {
        self.snapshot_path(name).join(file)
    }

    pub fn profile_record(&self, name: &str) -> PathBuf {
        get_profiles_dir(&self.config_dir).join(format!("{}.json", name))
    }

    // ==================== State Inspection ====================

    /// Subdirectory names of the destination, sorted.
    pub fn snapshot_dirs(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.destination)
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.path().is_dir())
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    pub fn read_origin(&self, file: &str) -> Option<String> {
        fs::read_to_string(self.origin_path(file)).ok()
    }

    pub fn read_snapshot(&self, name: &str, file: &str) -> Option<String> {
        fs::read_to_string(self.snapshot_file(name, file)).ok()
    }

    /// Load the process-wide record from disk.
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let content = fs::read_to_string(get_app_config_path(&self.config_dir))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a profile record from disk.
    pub fn load_profile(&self, name: &str) -> Result<Profile> {
        let content = fs::read_to_string(self.profile_record(name))?;
        Ok(serde_json::from_str(&content)?)
    }

    // ==================== Mutations ====================

    pub fn write_origin(&self, file: &str, content: &str) -> Result<()> {
        fs::write(self.origin_path(file), content)?;
        Ok(())
    }

    pub fn remove_origin(&self, file: &str) -> Result<()> {
        fs::remove_file(self.origin_path(file))?;
        Ok(())
    }

    pub fn remove_snapshot_file(&self, name: &str, file: &str) -> Result<()> {
        fs::remove_file(self.snapshot_file(name, file))?;
        Ok(())
    }

    // ==================== Assertions ====================

    /// Assert a snapshot file is byte-identical to its origin counterpart.
    pub fn assert_snapshot_matches_origin(&self, name: &str, file: &str) {
        let snapshot = fs::read(self.snapshot_file(name, file))
            .unwrap_or_else(|e| panic!("Failed to read {}/{}: {}", name, file, e));
        let origin = fs::read(self.origin_path(file))
            .unwrap_or_else(|e| panic!("Failed to read origin {}: {}", file, e));
        assert_eq!(snapshot, origin, "{}/{} differs from origin", name, file);
    }
}

/// Builder for TestEnv with fluent configuration.
#[derive(Default)]
#[allow(dead_code)]
pub struct TestEnvBuilder {
    origin_files: Vec<(String, String)>,
    files_to_copy: Vec<String>,
    snapshots: Vec<(String, Vec<(String, String)>)>,
    extra_profiles: Vec<String>,
    unconfigured: bool,
}

#[allow(dead_code)]
impl TestEnvBuilder {
    /// Add a file to the origin folder.
    pub fn with_origin_file(mut self, name: &str, content: &str) -> Self {
        self.origin_files
            .push((name.to_string(), content.to_string()));
        self
    }

    /// Set the current profile's file list.
    pub fn with_files_to_copy(mut self, files: &[&str]) -> Self {
        self.files_to_copy = files.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Add a pre-existing snapshot with the given files.
    pub fn with_snapshot(mut self, name: &str, files: &[(&str, &str)]) -> Self {
        self.snapshots.push((
            name.to_string(),
            files
                .iter()
                .map(|(f, c)| ((*f).to_string(), (*c).to_string()))
                .collect(),
        ));
        self
    }

    /// Add another (empty) profile record next to "default".
    pub fn with_profile(mut self, name: &str) -> Self {
        self.extra_profiles.push(name.to_string());
        self
    }

    /// Leave the default profile's origin and destination unset.
    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    /// Build the test environment.
    pub fn build(self) -> Result<TestEnv> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let base = temp_dir.path();

        let origin = base.join("origin");
        let destination = base.join("saves");
        let config_dir = base.join("config");
        let profiles_dir = get_profiles_dir(&config_dir);

        fs::create_dir_all(&origin)?;
        fs::create_dir_all(&destination)?;
        fs::create_dir_all(&profiles_dir)?;

        for (name, content) in &self.origin_files {
            fs::write(origin.join(name), content)?;
        }

        for (name, files) in &self.snapshots {
            let dir = destination.join(name);
            fs::create_dir_all(&dir)?;
            for (file, content) in files {
                fs::write(dir.join(file), content)?;
            }
        }

        let profile = if self.unconfigured {
            Profile::default()
        } else {
            Profile {
                origin_path: origin.clone(),
                destination_path: destination.clone(),
                files_to_copy: self.files_to_copy.clone(),
            }
        };
        write_record(&profiles_dir.join("default.json"), &profile)?;
        for name in &self.extra_profiles {
            write_record(&profiles_dir.join(format!("{}.json", name)), &Profile::default())?;
        }

        write_record(&get_app_config_path(&config_dir), &AppConfig::default())?;

        Ok(TestEnv {
            temp_dir,
            origin,
            destination,
            config_dir,
        })
    }
}

fn write_record<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

// ==================== Convenience Constructors ====================

/// Environment with `a.txt` and `b.txt` in origin, both configured for copying.
#[allow(dead_code)]
pub fn two_file_env() -> Result<TestEnv> {
    TestEnv::new()
        .with_origin_file("a.txt", "alpha v1")
        .with_origin_file("b.txt", "bravo v1")
        .with_files_to_copy(&["a.txt", "b.txt"])
        .build()
}
