//! Byte-span scanning over bencode data
//!
//! Values are decoded by `serde_bencode`; this module only measures where a
//! value starts and ends so the info dictionary can be kept byte-for-byte.

use std::ops::Range;

use crate::{Result, TorrentEditError};

/// Key of the info dictionary in the metainfo root.
pub const INFO_KEY: &[u8] = b"info";

/// Bencode span utilities for locating raw values in torrent data.
pub struct BencodeScanner;

impl BencodeScanner {
    /// Locate the raw bytes of the `info` value in a metainfo root dictionary
    ///
    /// Only top-level keys are matched, so an `info` key nested deeper or a
    /// byte string containing `4:info` is never mistaken for the real one.
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the root is not a dictionary, is truncated, or has no
    ///   `info` key
    pub fn locate_info(data: &[u8]) -> Result<Range<usize>> {
        if data.first() != Some(&b'd') {
            return Err(decode_error("Root element must be dictionary"));
        }

        let mut pos = 1; // Skip initial 'd'
        loop {
            match data.get(pos) {
                None => return Err(decode_error("Incomplete bencode dictionary")),
                Some(b'e') => break,
                Some(b'0'..=b'9') => {}
                Some(_) => return Err(decode_error("Dictionary key must be a byte string")),
            }

            let key = Self::string_content(data, pos)?;
            let value_start = key.end;
            let value_end = Self::find_value_end(data, value_start)?;

            if &data[key] == INFO_KEY {
                return Ok(value_start..value_end);
            }
            pos = value_end;
        }

        Err(decode_error("Missing 'info' field"))
    }

    /// Find the end position (exclusive) of the bencode value starting at `start`
    ///
    /// # Errors
    ///
    /// - `TorrentEditError::Decode` - If the value is truncated or contains an invalid byte
    pub fn find_value_end(data: &[u8], start: usize) -> Result<usize> {
        let mut pos = start;
        let mut depth = 0usize;

        loop {
            let Some(&byte) = data.get(pos) else {
                return Err(decode_error("Incomplete bencode value"));
            };

            match byte {
                b'd' | b'l' => {
                    depth += 1;
                    pos += 1;
                }
                b'e' if depth > 0 => {
                    depth -= 1;
                    pos += 1;
                }
                b'i' => {
                    // Integer: find 'e'
                    let terminator = data[pos..]
                        .iter()
                        .position(|&b| b == b'e')
                        .ok_or_else(|| decode_error("Unterminated integer"))?;
                    pos += terminator + 1;
                }
                b'0'..=b'9' => {
                    pos = Self::string_content(data, pos)?.end;
                }
                _ => return Err(decode_error("Invalid bencode character")),
            }

            if depth == 0 {
                return Ok(pos);
            }
        }
    }

    /// Range of the content of the byte string whose length prefix starts at `start`
    fn string_content(data: &[u8], start: usize) -> Result<Range<usize>> {
        let colon = data[start..]
            .iter()
            .position(|&b| b == b':')
            .map(|offset| start + offset)
            .ok_or_else(|| decode_error("Invalid string format"))?;

        let length: usize = std::str::from_utf8(&data[start..colon])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| decode_error("Invalid string length"))?;

        let content_start = colon + 1;
        let content_end = content_start
            .checked_add(length)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| decode_error("String length exceeds data"))?;

        Ok(content_start..content_end)
    }
}

fn decode_error(reason: &str) -> TorrentEditError {
    TorrentEditError::Decode {
        reason: reason.to_string(),
    }
}
