//! Input validation and output-path policy.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf, is_separator};

use crate::{Result, TorrentEditError};

/// Resolve the torrent path to an absolute path and check it names a file
///
/// # Errors
///
/// - `TorrentEditError::Path` - If the path cannot be resolved, does not exist or is a directory
pub fn validate_input_path(path: &Path) -> Result<PathBuf> {
    let path_error = |reason: String| TorrentEditError::Path {
        path: path.to_path_buf(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(path_error("torrent file path is required".to_string()));
    }

    let absolute = std::path::absolute(path)
        .map_err(|e| path_error(format!("cannot resolve path: {e}")))?;

    let metadata = fs::metadata(&absolute).map_err(|e| match e.kind() {
        ErrorKind::NotFound => path_error("file does not exist".to_string()),
        _ => path_error(e.to_string()),
    })?;

    if metadata.is_dir() {
        return Err(path_error("expected a file but got a directory".to_string()));
    }

    Ok(absolute)
}

/// Decide where the edited torrent is written
///
/// - An existing directory, or a target ending in a path separator, receives
///   the original file name.
/// - A target that does not exist and has no extension is treated as a
///   directory to be created, and also receives the original file name.
///   Any dot in the final component counts as an extension, so `.edited`
///   names a file.
/// - Anything else is used as the output file path as given.
///
/// Nothing is created here; `MetaInfo::save` creates the directories.
///
/// # Errors
///
/// - `TorrentEditError::Path` - If the original path has no file name
pub fn resolve_output_path(output_target: &Path, original_path: &Path) -> Result<PathBuf> {
    if is_directory_target(output_target) {
        let file_name = original_path
            .file_name()
            .ok_or_else(|| TorrentEditError::Path {
                path: original_path.to_path_buf(),
                reason: "input path has no file name".to_string(),
            })?;
        Ok(output_target.join(file_name))
    } else {
        Ok(output_target.to_path_buf())
    }
}

fn is_directory_target(target: &Path) -> bool {
    if target.is_dir() || has_trailing_separator(target) {
        return true;
    }
    !target.exists() && !has_extension(target)
}

fn has_extension(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains('.'))
}

fn has_trailing_separator(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(is_separator)
}
