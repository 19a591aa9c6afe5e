use chrono::NaiveDateTime;

/// Compact timestamp layout used in ISAPI search bodies and RTSP playback URLs.
///
/// The trailing `Z` is a literal: devices expect their own wall-clock time
/// here, not UTC.
pub const DEVICE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Formats a wall-clock time the way the device expects it.
///
/// ```
/// use chrono::NaiveDate;
/// use hikio::utils::format_device_time;
///
/// let t = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(7, 5, 0)
///     .unwrap();
/// assert_eq!(format_device_time(&t), "20240309T070500Z");
/// ```
pub fn format_device_time(time: &NaiveDateTime) -> String {
    time.format(DEVICE_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_pads_fields() {
        let t = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(format_device_time(&t), "20230102T030405Z");
    }

    #[test]
    fn test_format_keeps_wall_clock_fields() {
        let t = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        // no zone conversion happens despite the Z suffix
        assert_eq!(format_device_time(&t), "20241231T235959Z");
    }
}
