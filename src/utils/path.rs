use std::path::{Path, PathBuf};

/// Environment variable that relocates the config directory (used by tests and portable installs)
pub const CONFIG_DIR_ENV: &str = "SAVEKEEP_CONFIG_DIR";

/// Name of the process-wide config record inside the config directory
pub const APP_CONFIG_FILE: &str = "save_manager_config.json";

/// Name of the directory holding one JSON record per profile
pub const PROFILES_DIR: &str = "profiles";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path
///
/// `$SAVEKEEP_CONFIG_DIR` wins; otherwise the platform config dir (e.g. ~/.config/savekeep).
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| get_home_dir().join(".config"))
        .join("savekeep")
}

/// Get the process-wide config record path for a config directory
pub fn get_app_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_CONFIG_FILE)
}

/// Get the profile records directory for a config directory
pub fn get_profiles_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(PROFILES_DIR)
}

/// Get the log directory (~/.cache/savekeep on Linux)
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("savekeep")
}

/// Format a path for display (show ~ for home, "<unset>" for an empty path)
pub fn format_path_for_display(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        return "<unset>".to_string();
    }

    let home_dir = get_home_dir();
    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_paths() {
        let dir = PathBuf::from("/tmp/savekeep-config");
        assert_eq!(
            get_app_config_path(&dir),
            PathBuf::from("/tmp/savekeep-config/save_manager_config.json")
        );
        assert_eq!(
            get_profiles_dir(&dir),
            PathBuf::from("/tmp/savekeep-config/profiles")
        );
    }

    #[test]
    fn test_format_unset_path() {
        assert_eq!(format_path_for_display(Path::new("")), "<unset>");
        assert_eq!(format_path_for_display(&get_home_dir()), "~");
    }
}
