//! Metainfo root dictionary: decoding, re-encoding and derivations
//!
//! Bencode values are decoded and encoded with `serde_bencode`. The info
//! dictionary is the exception: its original bytes are sliced out of the input
//! and written back verbatim, so the info hash can never drift.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_bencode::value::Value;
use tracing::{debug, info};

use super::bencode::{BencodeScanner, INFO_KEY};
use super::info::Info;
use super::magnet::MagnetLink;
use super::InfoHash;
use crate::paths::resolve_output_path;
use crate::{Result, TorrentEditError};

const ANNOUNCE_KEY: &[u8] = b"announce";
const ANNOUNCE_LIST_KEY: &[u8] = b"announce-list";
const COMMENT_KEY: &[u8] = b"comment";
const CREATED_BY_KEY: &[u8] = b"created by";
const CREATION_DATE_KEY: &[u8] = b"creation date";

/// Decoded root of a `.torrent` file.
///
/// Tracker and authorship fields are exposed for editing. Every other
/// top-level key is carried along unchanged and written back on encode.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaInfo {
    /// Primary tracker URL, empty when absent
    pub announce: String,
    /// Tracker tiers, each an ordered list of URLs
    pub announce_list: Vec<Vec<String>>,
    pub created_by: String,
    pub comment: String,
    /// Seconds since the Unix epoch
    pub creation_date: Option<i64>,
    info_bytes: Vec<u8>,
    extra: BTreeMap<Vec<u8>, Value>,
}

impl MetaInfo {
    /// Decode a metainfo file from its raw bytes
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the data is not bencode, the root is not a dictionary,
    ///   or the `info` key is missing
    pub fn from_bytes(torrent_bytes: &[u8]) -> Result<Self> {
        let parsed: Value =
            serde_bencode::from_bytes(torrent_bytes).map_err(|e| TorrentEditError::Decode {
                reason: format!("Bencode parsing failed: {e}"),
            })?;

        let Value::Dict(mut root) = parsed else {
            return Err(TorrentEditError::Decode {
                reason: "Root element must be dictionary".to_string(),
            });
        };

        let info_span = BencodeScanner::locate_info(torrent_bytes)?;
        root.remove(INFO_KEY);

        let announce = take_text(&mut root, ANNOUNCE_KEY).unwrap_or_default();
        let announce_list = root
            .remove(ANNOUNCE_LIST_KEY)
            .map(tiers_from_value)
            .unwrap_or_default();
        let created_by = take_text(&mut root, CREATED_BY_KEY).unwrap_or_default();
        let comment = take_text(&mut root, COMMENT_KEY).unwrap_or_default();
        let creation_date = match root.remove(CREATION_DATE_KEY) {
            Some(Value::Int(timestamp)) => Some(timestamp),
            Some(_) => {
                debug!("Dropping non-integer creation date");
                None
            }
            None => None,
        };

        Ok(Self {
            announce,
            announce_list,
            created_by,
            comment,
            creation_date,
            info_bytes: torrent_bytes[info_span].to_vec(),
            extra: root.into_iter().collect(),
        })
    }

    /// Read and decode a metainfo file from disk
    ///
    /// The file is read fully and closed before decoding starts.
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Io` - If the file cannot be read
    /// - `TorrentEditError::Decode` - If the contents are not a valid metainfo file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading torrent: {}", path.display());
        let torrent_bytes = fs::read(path).map_err(|source| TorrentEditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&torrent_bytes)
    }

    /// Encode back to bencode
    ///
    /// Keys are written in sorted byte order. Empty tracker and authorship
    /// fields are left out; the info dictionary is copied as it was read.
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Encode` - If a value fails to serialize
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut entries: BTreeMap<&[u8], Cow<'_, [u8]>> = BTreeMap::new();

        if !self.announce.is_empty() {
            entries.insert(ANNOUNCE_KEY, encode_value(&self.announce)?.into());
        }
        if !self.announce_list.is_empty() {
            entries.insert(ANNOUNCE_LIST_KEY, encode_value(&self.announce_list)?.into());
        }
        if !self.comment.is_empty() {
            entries.insert(COMMENT_KEY, encode_value(&self.comment)?.into());
        }
        if !self.created_by.is_empty() {
            entries.insert(CREATED_BY_KEY, encode_value(&self.created_by)?.into());
        }
        if let Some(timestamp) = self.creation_date {
            entries.insert(CREATION_DATE_KEY, encode_value(&timestamp)?.into());
        }
        entries.insert(INFO_KEY, Cow::Borrowed(self.info_bytes.as_slice()));
        for (key, value) in &self.extra {
            entries.insert(key.as_slice(), encode_value(value)?.into());
        }

        let mut encoded = Vec::with_capacity(self.info_bytes.len() + 256);
        encoded.push(b'd');
        for (key, value) in entries {
            encoded.extend_from_slice(key.len().to_string().as_bytes());
            encoded.push(b':');
            encoded.extend_from_slice(key);
            encoded.extend_from_slice(&value);
        }
        encoded.push(b'e');

        Ok(encoded)
    }

    /// Encode and write to the path chosen by the output-path policy
    ///
    /// Returns the path actually written. Encoding happens before any directory
    /// or file is created, so an encode failure leaves nothing on disk.
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Path` - If the original path has no file name
    /// - `TorrentEditError::Io` - If a directory or the file cannot be created or written
    /// - `TorrentEditError::Encode` - If the metainfo fails to serialize
    pub fn save(&self, original_path: &Path, output_target: &Path) -> Result<PathBuf> {
        let output_path = resolve_output_path(output_target, original_path)?;
        let encoded = self.to_bytes()?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TorrentEditError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let io_error = |source: std::io::Error| TorrentEditError::Io {
            path: output_path.clone(),
            source,
        };
        let mut file = File::create(&output_path).map_err(io_error)?;
        file.write_all(&encoded)
            .and_then(|()| file.flush())
            .map_err(io_error)?;

        info!(
            path = %output_path.display(),
            bytes = encoded.len(),
            "Saved modified torrent"
        );
        Ok(output_path)
    }

    /// Every tracker URL in announce order, without duplicates.
    pub fn tracker_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        let candidates =
            std::iter::once(&self.announce).chain(self.announce_list.iter().flatten());
        for url in candidates {
            if !url.is_empty() && !urls.contains(url) {
                urls.push(url.clone());
            }
        }
        urls
    }

    /// Exact bencoded bytes of the info dictionary.
    pub fn info_bytes(&self) -> &[u8] {
        &self.info_bytes
    }

    /// Top-level value for a key outside the fields modelled above.
    pub fn extra_field(&self, key: &[u8]) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Decode the info dictionary
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the info dictionary is malformed
    pub fn info(&self) -> Result<Info> {
        Info::from_bytes(&self.info_bytes)
    }

    /// Content name declared by the info dictionary
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the info dictionary is malformed
    pub fn name(&self) -> Result<String> {
        Ok(self.info()?.display_name().to_string())
    }

    /// Total content size in bytes
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the info dictionary is malformed
    pub fn total_size(&self) -> Result<u64> {
        Ok(self.info()?.total_length())
    }

    /// SHA-1 of the info dictionary bytes as originally read.
    pub fn info_hash(&self) -> InfoHash {
        InfoHash::from_info_bytes(&self.info_bytes)
    }

    /// Trackerless magnet link for this torrent
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the info dictionary is malformed
    pub fn magnet_link(&self) -> Result<MagnetLink> {
        let info = self.info()?;
        Ok(MagnetLink::new(
            self.info_hash(),
            info.name_bytes(),
            info.total_length(),
        ))
    }
}

fn take_text(root: &mut HashMap<Vec<u8>, Value>, key: &[u8]) -> Option<String> {
    match root.remove(key)? {
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        _ => {
            debug!("Dropping non-string field {:?}", String::from_utf8_lossy(key));
            None
        }
    }
}

fn tiers_from_value(value: Value) -> Vec<Vec<String>> {
    let Value::List(tiers) = value else {
        debug!("Dropping malformed announce-list");
        return Vec::new();
    };

    tiers
        .into_iter()
        .filter_map(|tier| match tier {
            Value::List(urls) => Some(
                urls.into_iter()
                    .filter_map(|url| match url {
                        Value::Bytes(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        })
        .filter(|tier| !tier.is_empty())
        .collect()
}

fn encode_value<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_bencode::to_bytes(value).map_err(|e| TorrentEditError::Encode {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::torrent::test_fixtures;

    const TEST_TORRENT: &[u8] = b"d8:announce9:test:80804:infod6:lengthi1000e4:name8:test.txt12:piece lengthi32768e6:pieces20:12345678901234567890ee";

    #[test]
    fn test_parse_minimal_torrent() {
        let metainfo = MetaInfo::from_bytes(TEST_TORRENT).unwrap();

        assert_eq!(metainfo.announce, "test:8080");
        assert!(metainfo.announce_list.is_empty());
        assert_eq!(metainfo.name().unwrap(), "test.txt");
        assert_eq!(metainfo.total_size().unwrap(), 1000);
        assert_eq!(
            metainfo.info_hash().to_hex(),
            "11aea63f00a8ea5d18de733f4c4c753fa2af995c"
        );
    }

    #[test]
    fn test_parse_fixture_fields() {
        let metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();

        assert_eq!(metainfo.announce, test_fixtures::PRIMARY_TRACKER);
        assert_eq!(metainfo.announce_list.len(), 2);
        assert_eq!(metainfo.created_by, "mktorrent 1.1");
        assert_eq!(metainfo.comment, "original comment");
        assert_eq!(metainfo.creation_date, Some(1_700_000_000));
        assert!(metainfo.extra_field(b"url-list").is_some());
    }

    #[test]
    fn test_invalid_torrent_data() {
        let result = MetaInfo::from_bytes(b"invalid torrent data");
        assert!(matches!(result, Err(TorrentEditError::Decode { .. })));
    }

    #[test]
    fn test_root_must_be_dictionary() {
        let result = MetaInfo::from_bytes(b"l4:teste");
        assert!(result.unwrap_err().to_string().contains("Root element must be dictionary"));
    }

    #[test]
    fn test_missing_info_field() {
        let result = MetaInfo::from_bytes(b"d8:announce9:test:8080e");
        assert!(result.unwrap_err().to_string().contains("Missing 'info' field"));
    }

    #[test]
    fn test_malformed_info_fails_derivations_only() {
        let metainfo = MetaInfo::from_bytes(b"d8:announce9:test:80804:infoi42ee").unwrap();

        assert!(metainfo.name().is_err());
        assert!(metainfo.total_size().is_err());
        assert!(metainfo.magnet_link().is_err());
        assert_eq!(metainfo.info_hash(), InfoHash::from_info_bytes(b"i42e"));
    }

    #[test]
    fn test_encode_round_trip_unchanged() {
        let original = test_fixtures::single_file_torrent();
        let metainfo = MetaInfo::from_bytes(&original).unwrap();

        assert_eq!(metainfo.to_bytes().unwrap(), original);
    }

    #[test]
    fn test_encode_omits_empty_tracker_fields() {
        let mut metainfo = MetaInfo::from_bytes(TEST_TORRENT).unwrap();
        metainfo.announce.clear();

        let encoded = metainfo.to_bytes().unwrap();
        assert_eq!(
            encoded,
            b"d4:infod6:lengthi1000e4:name8:test.txt12:piece lengthi32768e6:pieces20:12345678901234567890ee"
        );
    }

    #[test]
    fn test_tracker_urls_deduplicated() {
        let metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
        let urls = metainfo.tracker_urls();

        assert_eq!(urls[0], test_fixtures::PRIMARY_TRACKER);
        assert_eq!(urls.len(), 3);
    }

    #[test]
    fn test_multi_file_total_size() {
        let metainfo = MetaInfo::from_bytes(&test_fixtures::multi_file_torrent()).unwrap();

        assert_eq!(metainfo.name().unwrap(), "test.dir");
        assert_eq!(metainfo.total_size().unwrap(), 800);
    }

    #[test]
    fn test_magnet_link_from_metainfo() {
        let metainfo = MetaInfo::from_bytes(TEST_TORRENT).unwrap();
        assert_eq!(
            metainfo.magnet_link().unwrap().to_string(),
            "magnet:?xt=urn:btih:11aea63f00a8ea5d18de733f4c4c753fa2af995c&dn=test.txt&xl=1000"
        );
    }

    #[test]
    fn test_non_utf8_name_keeps_derivations() {
        let mut data = b"d4:infod6:lengthi1000e4:name4:".to_vec();
        data.extend_from_slice(&[0xC4, 0xE3, 0xBA, 0xC3]);
        data.extend_from_slice(b"12:piece lengthi16384e6:pieces0:ee");
        let metainfo = MetaInfo::from_bytes(&data).unwrap();

        assert_eq!(metainfo.total_size().unwrap(), 1000);
        assert_eq!(metainfo.name().unwrap(), "\u{FFFD}\u{FFFD}\u{FFFD}");
        assert_eq!(
            metainfo.magnet_link().unwrap().to_string(),
            format!(
                "magnet:?xt=urn:btih:{}&dn=%C4%E3%BA%C3&xl=1000",
                metainfo.info_hash()
            )
        );
    }

    #[test]
    fn test_save_to_directory_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        let metainfo = MetaInfo::from_bytes(TEST_TORRENT).unwrap();

        let saved = metainfo
            .save(Path::new("/somewhere/a.torrent"), temp_dir.path())
            .unwrap();

        assert_eq!(saved, temp_dir.path().join("a.torrent"));
        assert_eq!(fs::read(&saved).unwrap(), TEST_TORRENT);
    }

    #[test]
    fn test_save_creates_nested_directories_with_encoded_bytes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
        metainfo.announce.clear();
        let target = temp_dir.path().join("a").join("b").join("out.torrent");

        let saved = metainfo.save(Path::new("in.torrent"), &target).unwrap();

        assert_eq!(saved, target);
        assert_eq!(fs::read(&saved).unwrap(), metainfo.to_bytes().unwrap());
    }
}
