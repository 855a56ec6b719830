//! Sample torrent files for tests.
//!
//! Encoded with `serde_bencode`, so keys come out in canonical sorted order.

use std::collections::HashMap;

use serde_bencode::value::Value;

pub const PRIMARY_TRACKER: &str = "http://tracker.example.com/announce";
pub const BACKUP_TRACKER: &str = "udp://backup.example.org:6969/announce";
pub const THIRD_TRACKER: &str = "udp://tracker.example.net:1337/announce";
pub const WEB_SEED: &str = "http://seed.example.com/files/";

fn text(value: &str) -> Value {
    Value::Bytes(value.as_bytes().to_vec())
}

fn dict(entries: Vec<(&str, Value)>) -> Value {
    Value::Dict(
        entries
            .into_iter()
            .map(|(key, value)| (key.as_bytes().to_vec(), value))
            .collect::<HashMap<_, _>>(),
    )
}

/// Encodes a root dictionary from key/value pairs.
pub fn encode_root(entries: Vec<(&str, Value)>) -> Vec<u8> {
    serde_bencode::to_bytes(&dict(entries)).expect("fixture values always encode")
}

/// Single-file info dictionary named `example.iso`, 1 MiB long.
pub fn single_file_info() -> Value {
    dict(vec![
        ("length", Value::Int(1_048_576)),
        ("name", text("example.iso")),
        ("piece length", Value::Int(262_144)),
        ("pieces", Value::Bytes(vec![0xAB; 80])),
    ])
}

/// Multi-file info dictionary named `test.dir` holding 500 + 300 bytes.
pub fn multi_file_info() -> Value {
    let file = |length: i64, name: &str| {
        dict(vec![
            ("length", Value::Int(length)),
            ("path", Value::List(vec![text(name)])),
        ])
    };

    dict(vec![
        ("files", Value::List(vec![file(500, "file1"), file(300, "file2")])),
        ("name", text("test.dir")),
        ("piece length", Value::Int(32_768)),
        ("pieces", Value::Bytes(vec![0x11; 20])),
    ])
}

/// Single-file torrent with an announce URL, two tracker tiers, authorship
/// fields and a web seed.
pub fn single_file_torrent() -> Vec<u8> {
    encode_root(vec![
        ("announce", text(PRIMARY_TRACKER)),
        (
            "announce-list",
            Value::List(vec![
                Value::List(vec![text(PRIMARY_TRACKER)]),
                Value::List(vec![text(BACKUP_TRACKER), text(THIRD_TRACKER)]),
            ]),
        ),
        ("comment", text("original comment")),
        ("created by", text("mktorrent 1.1")),
        ("creation date", Value::Int(1_700_000_000)),
        ("info", single_file_info()),
        ("url-list", Value::List(vec![text(WEB_SEED)])),
    ])
}

/// Multi-file torrent with a single announce URL.
pub fn multi_file_torrent() -> Vec<u8> {
    encode_root(vec![
        ("announce", text(PRIMARY_TRACKER)),
        ("info", multi_file_info()),
    ])
}

/// Torrent carrying no tracker information at all.
pub fn trackerless_torrent() -> Vec<u8> {
    encode_root(vec![("info", single_file_info())])
}
