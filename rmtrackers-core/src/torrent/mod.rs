//! BitTorrent metainfo model, info hash and magnet link derivation

pub mod bencode;
pub mod info;
pub mod magnet;
pub mod metainfo;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

use std::fmt;

use sha1::{Digest, Sha1};

pub use bencode::BencodeScanner;
pub use info::{FileEntry, Info};
pub use magnet::MagnetLink;
pub use metainfo::MetaInfo;

/// SHA-1 hash identifying a unique torrent.
///
/// 20-byte SHA-1 hash of the bencoded info dictionary. The hex form used for
/// display and the raw bytes used in links both come from this one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Creates InfoHash from 20-byte SHA-1 hash.
    pub fn new(hash: [u8; 20]) -> Self {
        Self(hash)
    }

    /// Hashes the exact bytes of a bencoded info dictionary.
    pub fn from_info_bytes(info_bytes: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(info_bytes);
        let hash_result = hasher.finalize();
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&hash_result);
        Self(hash)
    }

    /// Returns reference to underlying 20-byte hash.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hexadecimal form, 40 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
