use crate::error::{SaveError, SaveResult};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;

/// Permission mode applied to every copied file
pub const FILE_MODE: u32 = 0o644;

/// Permission mode for newly created snapshot directories
pub const DIR_MODE: u32 = 0o755;

/// Copy a single file, streaming its bytes, then apply `mode` to the destination.
///
/// The destination is created or truncated. A failure partway leaves whatever was
/// written so far; nothing is rolled back. `mode` is ignored on non-Unix platforms.
///
/// Returns the number of bytes copied.
pub fn copy_file(source: &Path, dest: &Path, mode: u32) -> SaveResult<u64> {
    let mut input = File::open(source)
        .map_err(|e| SaveError::io(format!("Failed to open {:?}", source), e))?;
    let mut output = File::create(dest)
        .map_err(|e| SaveError::io(format!("Failed to create {:?}", dest), e))?;

    let bytes = io::copy(&mut input, &mut output).map_err(|e| {
        SaveError::io(format!("Failed to copy {:?} to {:?}", source, dest), e)
    })?;

    set_mode(dest, mode)?;
    debug!("Copied {} bytes: {:?} -> {:?}", bytes, source, dest);
    Ok(bytes)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> SaveResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| SaveError::io(format!("Failed to set permissions on {:?}", path), e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> SaveResult<()> {
    Ok(())
}

/// Create a single directory; fails if it already exists
pub fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

/// Whether `path` is absent (as opposed to present or unreadable)
pub fn is_missing(path: &Path) -> SaveResult<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(SaveError::io(format!("Failed to stat {:?}", path), e)),
    }
}

/// List the regular files directly inside `dir`, sorted by name
pub fn list_files(dir: &Path) -> SaveResult<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| SaveError::io(format!("Failed to read directory {:?}", dir), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| SaveError::io(format!("Failed to read directory {:?}", dir), e))?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}
