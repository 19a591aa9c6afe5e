#![doc(html_root_url = "https://docs.rs/hikio/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::missing_crate_level_docs)]

//! # hikio - Hikvision ISAPI device client
//!
//! `hikio` talks to Hikvision cameras and NVRs over their ISAPI HTTP/XML
//! surface. It answers the devices' RFC 2617 digest challenges transparently,
//! turns XML replies into generic trees, and builds the RTSP URLs a video
//! player needs to show live or recorded footage.
//!
//! ## Features
//!
//! ### Digest Authentication
//! - Reactive digest handshake: credentials are only sent after a 401
//! - `auth`, `auth-int` and legacy (no qop) responses
//! - Tolerant challenge parsing for devices with loose header quoting
//! - At most one retry per request, so bad credentials never loop
//!
//! ### Device Operations
//! - Device info and system status
//! - JPEG snapshots
//! - Motion recording search
//! - Liveness probing that degrades to "offline" instead of failing
//!
//! ### URL Builders
//! - RTSP live stream URLs (main and sub stream)
//! - HTTP preview URLs
//! - RTSP playback URLs for recorded time ranges
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hikio = "0.1.0"
//! ```
//!
//! ### Device Client Example
//!
//! ```rust,no_run
//! use hikio::isapi::{IsapiClient, StreamType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IsapiClient::new("http://10.0.0.5", "admin", "pass")?;
//!
//!     // Digest challenge is handled behind the scenes
//!     let info = client.get_device_info().await?;
//!     println!("serial: {}", info["DeviceInfo"]["serialNumber"]);
//!
//!     // Grab a still from the first channel
//!     let jpeg = client.get_snapshot(101).await?;
//!     println!("snapshot: {} bytes", jpeg.len());
//!
//!     // Hand the stream URL to a player
//!     println!("{}", client.get_rtsp_url(1, StreamType::Main));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Fleet Probe Example
//!
//! ```rust,no_run
//! use hikio::config::Config;
//! use hikio::monitor::{probe_devices, MonitoredDevice};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let devices = MonitoredDevice::from_config(&config)?;
//!
//!     for report in probe_devices(&devices, config.probe_timeout()).await {
//!         println!("{}: online={}", report.name, report.status.online);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - `auth`: RFC 2617 digest authentication
//!   - Challenge parsing
//!   - Response hashing
//!   - Authorization header building
//!
//! - `isapi`: The device client
//!   - Request flow with the single digest retry
//!   - Device operations
//!   - URL builders and XML trees
//!
//! - `monitor`: Liveness probing across many devices with per-device timeouts
//!
//! - `config`: Device configuration from files and the environment
//!
//! - `error`: Error handling types and utilities
//!   - Custom error types for different failure scenarios
//!   - Result type alias for convenience
//!
//! - `utils`: Common helpers
//!   - Device datetime formatting
//!
/// HTTP digest authentication
pub mod auth;

/// Error types and utilities
pub mod error;

/// Hikvision ISAPI device client
pub mod isapi;

/// Multi-device liveness probing
pub mod monitor;

/// Common utilities and helper functions
pub mod utils;

/// Configuration module
pub mod config;

pub use error::{IsapiError, Result};

// Re-export the client for convenience
pub use isapi::{CameraStatus, IsapiClient, StreamType};
