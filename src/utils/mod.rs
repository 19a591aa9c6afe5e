//! # Utility Functions
//!
//! Helpers shared by the device client:
//!
//! - Device datetime formatting for search bodies and playback URLs
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hikio::utils::format_device_time;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 1)
//!     .unwrap()
//!     .and_hms_opt(8, 0, 0)
//!     .unwrap();
//! assert_eq!(format_device_time(&start), "20240501T080000Z");
//! ```

/// Device datetime formatting
pub mod time;

pub use time::{format_device_time, DEVICE_TIME_FORMAT};
