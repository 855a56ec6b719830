//! CLI command implementation

use std::path::PathBuf;
use std::sync::Arc;

use rmtrackers_core::paths::validate_input_path;
use rmtrackers_core::{
    EditConfig, MetaInfo, ReportSink, Result, StdoutSink, report_metadata, strip_trackers,
};
use tracing::{debug, warn};

/// One edit run as requested on the command line.
pub struct StripRequest {
    /// Torrent file to edit
    pub torrent: PathBuf,
    /// Output file or directory
    pub output: PathBuf,
    pub config: EditConfig,
}

/// Strip trackers from a torrent, save it and report its metadata
///
/// Load, edit and save failures are returned. Derivation failures during
/// reporting are only logged, since the edited file is already on disk.
///
/// # Errors
/// - `TorrentEditError::Path` - Torrent path missing, nonexistent or a directory
/// - `TorrentEditError::Decode` - Torrent file is not valid metainfo
/// - `TorrentEditError::Io` - Reading the input or writing the output failed
/// - `TorrentEditError::Encode` - Edited metainfo failed to serialize
pub async fn strip_torrent(request: StripRequest) -> Result<PathBuf> {
    strip_torrent_with_sink(request, Arc::new(StdoutSink)).await
}

async fn strip_torrent_with_sink(
    request: StripRequest,
    sink: Arc<dyn ReportSink>,
) -> Result<PathBuf> {
    let input_path = validate_input_path(&request.torrent)?;
    let mut metainfo = MetaInfo::load(&input_path)?;

    if let Ok(info) = metainfo.info() {
        debug!(
            piece_length = info.piece_length,
            pieces = info.piece_count(),
            source = %info.source_label().unwrap_or_default(),
            "Loaded torrent {}",
            info.display_name()
        );
        for file in info.files.iter().flatten() {
            debug!("  {} ({} bytes)", file.display_path(), file.length);
        }
        if info.is_private() {
            warn!("Torrent is marked private; it will not find peers without a tracker");
        }
    }

    let removed = strip_trackers(&mut metainfo, &request.config);
    debug!("Removed {} tracker URLs", removed.len());

    let saved_path = metainfo.save(&input_path, &request.output)?;

    let summary = report_metadata(Arc::new(metainfo), sink).await;
    if summary.failed > 0 {
        warn!(
            "{} of {} metadata values could not be derived",
            summary.failed,
            summary.failed + summary.reported
        );
    }

    println!("Saved modified torrent to: {}", saved_path.display());
    Ok(saved_path)
}
