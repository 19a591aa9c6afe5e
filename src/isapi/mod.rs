//! # Hikvision ISAPI Client
//!
//! Device operations over the ISAPI HTTP/XML surface with transparent digest
//! authentication, plus the URL builders a video player needs:
//!
//! - Device info and system status as generic trees
//! - JPEG snapshots
//! - Motion recording search
//! - Liveness probing that never fails
//! - RTSP live, HTTP preview and RTSP playback URLs
//!
//! ```rust,no_run
//! use hikio::isapi::{IsapiClient, StreamType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IsapiClient::new("http://10.0.0.5", "admin", "pass")?;
//!
//!     let info = client.get_device_info().await?;
//!     println!("model: {}", info["DeviceInfo"]["model"]);
//!
//!     let status = client.check_camera_status().await;
//!     println!("online: {}", status.online);
//!
//!     println!("{}", client.get_rtsp_url(1, StreamType::Main));
//!     Ok(())
//! }
//! ```

mod client;
mod search;
mod stream;
mod xml;

pub use client::{
    CameraStatus, IsapiClient, DEVICE_INFO_PATH, RTSP_PORT, SEARCH_PATH, SYSTEM_STATUS_PATH,
};
pub use search::{next_search_id, SearchDescription, MOTION_METADATA, SEARCH_MAX_RESULTS};
pub use stream::StreamType;
pub use xml::{parse_xml_response, XmlValue, ATTRIBUTES_KEY, TEXT_KEY};
