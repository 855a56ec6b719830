//! rmtrackers core - tracker removal for BitTorrent metainfo files
//!
//! This crate provides the building blocks of the `rmtrackers` pipeline:
//! decoding a `.torrent` file, stripping its tracker announce fields,
//! persisting the result and deriving name, size, info hash and magnet link
//! from the edited metainfo.

pub mod config;
pub mod paths;
pub mod report;
pub mod strip;
pub mod torrent;
pub mod tracing_setup;

use std::path::PathBuf;

// Re-export main types for convenient access
pub use config::EditConfig;
pub use report::{ReportEntry, ReportSink, ReportSummary, StdoutSink, report_metadata};
pub use strip::strip_trackers;
pub use torrent::{InfoHash, MagnetLink, MetaInfo};

/// Errors that can bubble up from any stage of the edit pipeline.
///
/// Every stage returns its failure to the caller unchanged; the driver
/// decides whether a failure is fatal.
#[derive(Debug, thiserror::Error)]
pub enum TorrentEditError {
    #[error("Invalid path {}: {reason}", path.display())]
    Path { path: PathBuf, reason: String },

    #[error("Failed to decode torrent: {reason}")]
    Decode { reason: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode torrent: {reason}")]
    Encode { reason: String },
}

impl TorrentEditError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            TorrentEditError::Path { path, reason } => {
                format!("Error validating file {}: {reason}", path.display())
            }
            TorrentEditError::Decode { reason } => format!("Error loading meta info: {reason}"),
            TorrentEditError::Io { path, source } => {
                format!("Error saving modified torrent to {}: {source}", path.display())
            }
            TorrentEditError::Encode { reason } => {
                format!("Error encoding modified torrent: {reason}")
            }
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TorrentEditError::Path { .. } | TorrentEditError::Decode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TorrentEditError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_path_error_is_user_error() {
        let error = TorrentEditError::Path {
            path: PathBuf::from("/missing.torrent"),
            reason: "file does not exist".to_string(),
        };

        assert!(error.is_user_error());
        assert_eq!(
            error.to_string(),
            "Invalid path /missing.torrent: file does not exist"
        );
        assert!(error.user_message().contains("file does not exist"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = TorrentEditError::Io {
            path: Path::new("/out/a.torrent").to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(!error.is_user_error());
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("/out/a.torrent"));
    }
}
