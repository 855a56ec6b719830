//! Magnet link construction

use std::fmt;

use super::InfoHash;

/// Magnet link components.
///
/// Trackerless magnet URI carrying the info hash, an optional display name
/// and the exact content length. Formats as
/// `magnet:?xt=urn:btih:<hex>&dn=<name>&xl=<size>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    pub info_hash: InfoHash,
    /// Name bytes as declared by the torrent, percent-encoded on output
    pub display_name: Option<Vec<u8>>,
    pub exact_length: u64,
}

impl MagnetLink {
    /// Builds a magnet link; an empty name leaves out the `dn` parameter.
    pub fn new(info_hash: InfoHash, display_name: impl AsRef<[u8]>, exact_length: u64) -> Self {
        let display_name = display_name.as_ref();
        Self {
            info_hash,
            display_name: (!display_name.is_empty()).then(|| display_name.to_vec()),
            exact_length,
        }
    }
}

impl fmt::Display for MagnetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "magnet:?xt=urn:btih:{}", self.info_hash)?;
        if let Some(name) = &self.display_name {
            write!(f, "&dn={}", urlencoding::encode_binary(name))?;
        }
        write!(f, "&xl={}", self.exact_length)
    }
}
