use crate::error::{SaveError, SaveResult};

/// Characters that cannot appear in a snapshot or profile name
pub const RESERVED_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Validate a snapshot or profile name
///
/// # Arguments
/// * `name` - The name to validate, already trimmed by the caller
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(SaveError::InvalidName)` with the reason otherwise
///
/// # Rules
/// - Cannot be empty
/// - Cannot contain any of `\ / : * ? " < > |`
/// - Cannot be `.` or `..`
///
/// Uniqueness is checked by the caller against the directory it renames in.
pub fn validate_name(name: &str) -> SaveResult<()> {
    if name.is_empty() {
        return Err(SaveError::invalid_name(name, "name cannot be empty"));
    }

    if name.contains(RESERVED_CHARS) {
        return Err(SaveError::invalid_name(
            name,
            "name contains invalid characters",
        ));
    }

    if name == "." || name == ".." {
        return Err(SaveError::invalid_name(name, "name is reserved"));
    }

    Ok(())
}

/// Pick the first `New Profile N` (N >= 1) not present in `existing`
pub fn next_profile_name(existing: &[String]) -> String {
    (1..)
        .map(|n: u32| format!("New Profile {}", n))
        .find(|candidate| !existing.iter().any(|p| p == candidate))
        .unwrap_or_else(|| "New Profile".to_string())
}
