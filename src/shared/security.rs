use crate::shared::error::ComplianceError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum config file size (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Checks that `path` is a regular file, not a symbolic link, and no larger
/// than `max_size` bytes.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
pub fn validate_config_file(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ComplianceError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(ComplianceError::SecurityError {
            path: path.to_path_buf(),
            reason: "Symbolic links are not allowed for config files".to_string(),
            hint: "Point to the config file itself instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        return Err(ComplianceError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                max_size
            ),
            hint: "Config files should only contain a handful of settings".to_string(),
        }
        .into());
    }

    Ok(())
}
