use crate::utils::format_device_time;
use chrono::{NaiveDateTime, Utc};
use std::sync::atomic::{AtomicU32, Ordering};

/// Upper bound on matches returned by a single search request.
pub const SEARCH_MAX_RESULTS: u32 = 40;

/// Metadata descriptor selecting motion-triggered recordings.
pub const MOTION_METADATA: &str = "//recordType.meta.std-cgi.com/motion";

static SEARCH_SEQ: AtomicU32 = AtomicU32::new(0);

/// Returns a search id built from the current timestamp, unique within the process.
pub fn next_search_id() -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        SEARCH_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// Body of an `/ISAPI/ContentMgmt/search` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDescription {
    pub search_id: String,
    pub channel: u32,
    /// Device wall-clock time
    pub start: NaiveDateTime,
    /// Device wall-clock time
    pub end: NaiveDateTime,
    pub max_results: u32,
}

impl SearchDescription {
    /// Creates a motion recording search for a single channel with a fresh id.
    pub fn new(channel: u32, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            search_id: next_search_id(),
            channel,
            start,
            end,
            max_results: SEARCH_MAX_RESULTS,
        }
    }

    /// Recording track of the channel's main stream (`{channel}01`).
    pub fn track_id(&self) -> String {
        format!("{}01", self.channel)
    }

    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<CMSearchDescription>
  <searchID>{search_id}</searchID>
  <trackList>
    <trackID>{track_id}</trackID>
  </trackList>
  <timeSpanList>
    <timeSpan>
      <startTime>{start}</startTime>
      <endTime>{end}</endTime>
    </timeSpan>
  </timeSpanList>
  <maxResults>{max_results}</maxResults>
  <searchResultPostion>0</searchResultPostion>
  <metadataList>
    <metadataDescriptor>{metadata}</metadataDescriptor>
  </metadataList>
</CMSearchDescription>"#,
            search_id = self.search_id,
            track_id = self.track_id(),
            start = format_device_time(&self.start),
            end = format_device_time(&self.end),
            max_results = self.max_results,
            metadata = MOTION_METADATA,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isapi::parse_xml_response;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_search_body_fields() {
        let search = SearchDescription::new(3, at(8, 0), at(9, 30));
        let tree = parse_xml_response(&search.to_xml());
        let body = &tree["CMSearchDescription"];

        assert_eq!(body["searchID"], search.search_id.as_str());
        assert_eq!(body["trackList"]["trackID"], "301");
        assert_eq!(body["timeSpanList"]["timeSpan"]["startTime"], "20240601T080000Z");
        assert_eq!(body["timeSpanList"]["timeSpan"]["endTime"], "20240601T093000Z");
        assert_eq!(body["maxResults"], "40");
        assert_eq!(body["metadataList"]["metadataDescriptor"], MOTION_METADATA);
    }

    #[test]
    fn test_search_ids_are_unique() {
        let a = next_search_id();
        let b = next_search_id();
        assert_ne!(a, b);
    }
}
