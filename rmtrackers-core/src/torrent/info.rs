//! Decoded view of the info dictionary

use std::borrow::Cow;

use serde::Deserialize;
use serde_bytes::ByteBuf;

use crate::{Result, TorrentEditError};

/// Info dictionary of a torrent.
///
/// Decoded on demand from the raw info bytes kept by `MetaInfo`; never
/// re-encoded, so fields not listed here survive untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    /// Raw name bytes; legacy torrents may use a non-UTF-8 encoding
    #[serde(default)]
    pub name: ByteBuf,
    #[serde(rename = "name.utf-8", default)]
    pub name_utf8: Option<ByteBuf>,
    #[serde(rename = "piece length", default)]
    pub piece_length: u64,
    #[serde(default)]
    pub pieces: ByteBuf,
    /// Present in single-file torrents
    #[serde(default)]
    pub length: Option<u64>,
    /// Present in multi-file torrents
    #[serde(default)]
    pub files: Option<Vec<FileEntry>>,
    #[serde(default)]
    pub private: Option<i64>,
    #[serde(default)]
    pub source: Option<ByteBuf>,
}

/// Individual file within a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileEntry {
    pub length: u64,
    #[serde(default)]
    pub path: Vec<ByteBuf>,
}

impl Info {
    /// Decode an info dictionary from its bencoded bytes
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the bytes are not a well-formed info dictionary
    pub fn from_bytes(info_bytes: &[u8]) -> Result<Self> {
        serde_bencode::from_bytes(info_bytes).map_err(|e| TorrentEditError::Decode {
            reason: format!("Malformed info dictionary: {e}"),
        })
    }

    /// Name bytes as declared, preferring the explicit UTF-8 variant.
    pub fn name_bytes(&self) -> &[u8] {
        self.name_utf8.as_ref().unwrap_or(&self.name)
    }

    /// Name to show users, lossily converted to UTF-8.
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.name_bytes())
    }

    pub fn source_label(&self) -> Option<Cow<'_, str>> {
        self.source.as_ref().map(|source| String::from_utf8_lossy(source))
    }

    /// Total content size in bytes.
    ///
    /// Multi-file torrents sum their file lengths (zero for an empty list);
    /// single-file torrents report `length`.
    pub fn total_length(&self) -> u64 {
        match &self.files {
            Some(files) => files
                .iter()
                .fold(0u64, |total, file| total.saturating_add(file.length)),
            None => self.length.unwrap_or(0),
        }
    }

    /// Number of pieces described by the `pieces` hash string.
    pub fn piece_count(&self) -> usize {
        self.pieces.len() / 20
    }

    pub fn is_private(&self) -> bool {
        self.private == Some(1)
    }
}

impl FileEntry {
    /// Path components joined with `/`, lossily converted to UTF-8.
    pub fn display_path(&self) -> String {
        self.path
            .iter()
            .map(|component| String::from_utf8_lossy(component))
            .collect::<Vec<_>>()
            .join("/")
    }
}
