//! Concurrent reporting of derived torrent metadata.
//!
//! Name, total size and info hash/magnet link are derived by three
//! independent tasks over a shared read-only `MetaInfo`. Each task emits its
//! entries as soon as they are ready, so output order across tasks is not
//! fixed. A failed derivation is logged and counted; it never stops the
//! others.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::warn;

use crate::torrent::{InfoHash, MagnetLink, MetaInfo};

/// One reported value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Name(String),
    TotalSize(u64),
    InfoHash(InfoHash),
    MagnetLink(MagnetLink),
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEntry::Name(name) => write!(f, "Name: {name}"),
            ReportEntry::TotalSize(size) => write!(f, "Total size: {size} bytes"),
            ReportEntry::InfoHash(hash) => write!(f, "Info hash: {hash}"),
            ReportEntry::MagnetLink(link) => write!(f, "Magnet link: {link}"),
        }
    }
}

/// Destination for report entries, shared by all reporting tasks.
pub trait ReportSink: Send + Sync {
    fn emit(&self, entry: ReportEntry);
}

/// Prints each entry as one line on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, entry: ReportEntry) {
        println!("{entry}");
    }
}

/// Counts of entries reported and derivations that failed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub reported: usize,
    pub failed: usize,
}

impl ReportSummary {
    fn merge(&mut self, other: ReportSummary) {
        self.reported += other.reported;
        self.failed += other.failed;
    }

    fn record<T>(
        &mut self,
        sink: &dyn ReportSink,
        result: crate::Result<T>,
        what: &str,
        entry: impl FnOnce(T) -> ReportEntry,
    ) {
        match result {
            Ok(value) => {
                sink.emit(entry(value));
                self.reported += 1;
            }
            Err(e) => {
                warn!("Error {what}: {e}");
                self.failed += 1;
            }
        }
    }
}

/// Derive and report name, total size, info hash and magnet link
///
/// Spawns one task per derivation and waits for all of them.
pub async fn report_metadata(
    metainfo: Arc<MetaInfo>,
    sink: Arc<dyn ReportSink>,
) -> ReportSummary {
    let mut tasks = JoinSet::new();

    let (task_metainfo, task_sink) = (Arc::clone(&metainfo), Arc::clone(&sink));
    tasks.spawn(async move { report_name(&task_metainfo, task_sink.as_ref()) });

    let (task_metainfo, task_sink) = (Arc::clone(&metainfo), Arc::clone(&sink));
    tasks.spawn(async move { report_total_size(&task_metainfo, task_sink.as_ref()) });

    let (task_metainfo, task_sink) = (metainfo, sink);
    tasks.spawn(async move { report_hash_and_magnet(&task_metainfo, task_sink.as_ref()) });

    let mut summary = ReportSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(task_summary) => summary.merge(task_summary),
            Err(e) => {
                warn!("Reporting task failed: {e}");
                summary.failed += 1;
            }
        }
    }
    summary
}

fn report_name(metainfo: &MetaInfo, sink: &dyn ReportSink) -> ReportSummary {
    let mut summary = ReportSummary::default();
    summary.record(
        sink,
        metainfo.name(),
        "extracting name from metadata",
        ReportEntry::Name,
    );
    summary
}

fn report_total_size(metainfo: &MetaInfo, sink: &dyn ReportSink) -> ReportSummary {
    let mut summary = ReportSummary::default();
    summary.record(
        sink,
        metainfo.total_size(),
        "calculating total size",
        ReportEntry::TotalSize,
    );
    summary
}

fn report_hash_and_magnet(metainfo: &MetaInfo, sink: &dyn ReportSink) -> ReportSummary {
    let mut summary = ReportSummary::default();
    summary.record(
        sink,
        Ok(metainfo.info_hash()),
        "hashing info dictionary",
        ReportEntry::InfoHash,
    );
    summary.record(
        sink,
        metainfo.magnet_link(),
        "building magnet link",
        ReportEntry::MagnetLink,
    );
    summary
}
