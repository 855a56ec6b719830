//! Tracker removal and authorship stamping.

use tracing::{debug, info};

use crate::config::EditConfig;
use crate::torrent::MetaInfo;

/// Clear every tracker announce field and stamp creator and comment
///
/// Total over any decoded metainfo, including one without trackers. Only
/// top-level fields change; the info dictionary and therefore the info hash
/// are left alone. Returns the tracker URLs that were removed.
pub fn strip_trackers(metainfo: &mut MetaInfo, config: &EditConfig) -> Vec<String> {
    let removed = metainfo.tracker_urls();

    if config.verbose {
        if removed.is_empty() {
            info!("Modifying torrent metadata (no trackers found)");
        } else {
            info!("Modifying torrent metadata, removing {} trackers:", removed.len());
            for tracker in &removed {
                info!(" - {tracker}");
            }
        }
    }

    metainfo.announce.clear();
    metainfo.announce_list.clear();
    metainfo.created_by.clone_from(&config.created_by);
    metainfo.comment.clone_from(&config.comment);

    debug!(
        created_by = %metainfo.created_by,
        comment = %metainfo.comment,
        "Stamped torrent metadata"
    );

    removed
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::torrent::test_fixtures;

    #[test]
    fn test_strip_clears_trackers() {
        let mut metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
        let removed = strip_trackers(&mut metainfo, &EditConfig::default());

        assert_eq!(
            removed,
            vec![
                test_fixtures::PRIMARY_TRACKER,
                test_fixtures::BACKUP_TRACKER,
                test_fixtures::THIRD_TRACKER,
            ]
        );
        assert!(metainfo.announce.is_empty());
        assert!(metainfo.announce_list.is_empty());
        assert!(metainfo.tracker_urls().is_empty());
    }

    #[test]
    fn test_strip_stamps_authorship() {
        let mut metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
        let config = EditConfig::default().with_stamp("tester", "no trackers here");
        strip_trackers(&mut metainfo, &config);

        assert_eq!(metainfo.created_by, "tester");
        assert_eq!(metainfo.comment, "no trackers here");
        assert_eq!(metainfo.creation_date, Some(1_700_000_000));
        assert!(metainfo.extra_field(b"url-list").is_some());
    }

    #[test]
    fn test_strip_trackerless_torrent() {
        let mut metainfo = MetaInfo::from_bytes(&test_fixtures::trackerless_torrent()).unwrap();
        let config = EditConfig::default().with_verbose(true);

        let removed = strip_trackers(&mut metainfo, &config);

        assert!(removed.is_empty());
        assert!(metainfo.announce.is_empty());
        assert_eq!(metainfo.created_by, config.created_by);
    }

    #[test]
    fn test_strip_keeps_info_hash() {
        let mut metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
        let before = metainfo.info_hash();

        strip_trackers(&mut metainfo, &EditConfig::default());

        assert_eq!(metainfo.info_hash(), before);
    }

    #[test]
    fn test_stripped_output_has_no_tracker_keys() {
        let mut metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
        strip_trackers(&mut metainfo, &EditConfig::default());

        let reloaded = MetaInfo::from_bytes(&metainfo.to_bytes().unwrap()).unwrap();
        assert!(reloaded.announce.is_empty());
        assert!(reloaded.announce_list.is_empty());
        assert_eq!(reloaded, metainfo);
    }

    fn tracker_url() -> impl Strategy<Value = String> {
        "(http|udp)://[a-z]{1,12}\\.example\\.(com|org)(:[0-9]{2,5})?/announce"
    }

    proptest! {
        #[test]
        fn prop_strip_always_clears_trackers(
            announce in proptest::option::of(tracker_url()),
            tiers in proptest::collection::vec(proptest::collection::vec(tracker_url(), 0..4), 0..4),
            created_by in "[ -~]{0,24}",
            comment in "[ -~]{0,48}",
        ) {
            let mut metainfo = MetaInfo::from_bytes(&test_fixtures::single_file_torrent()).unwrap();
            metainfo.announce = announce.unwrap_or_default();
            metainfo.announce_list = tiers;
            metainfo.created_by = created_by;
            metainfo.comment = comment;

            // Start from a freshly decoded value so the input went through encode/decode
            let mut metainfo = MetaInfo::from_bytes(&metainfo.to_bytes().unwrap()).unwrap();
            let hash_before = metainfo.info_hash();
            let info_before = metainfo.info_bytes().to_vec();

            strip_trackers(&mut metainfo, &EditConfig::default());
            let saved = MetaInfo::from_bytes(&metainfo.to_bytes().unwrap()).unwrap();

            prop_assert!(saved.announce.is_empty());
            prop_assert!(saved.announce_list.is_empty());
            prop_assert_eq!(saved.info_hash(), hash_before);
            prop_assert_eq!(saved.info_bytes(), info_before.as_slice());
            prop_assert_eq!(saved.created_by.as_str(), crate::config::DEFAULT_CREATED_BY);
            prop_assert_eq!(saved.comment.as_str(), crate::config::DEFAULT_COMMENT);
        }
    }
}
