use crate::config::Config;
use crate::isapi::{CameraStatus, IsapiClient};
use crate::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

/// A named device to probe.
#[derive(Debug, Clone)]
pub struct MonitoredDevice {
    pub name: String,
    pub client: IsapiClient,
}

impl MonitoredDevice {
    pub fn new(name: &str, client: IsapiClient) -> Self {
        Self {
            name: name.to_string(),
            client,
        }
    }

    /// Builds a client for every configured device.
    pub fn from_config(config: &Config) -> Result<Vec<Self>> {
        config
            .devices
            .iter()
            .map(|device| Ok(Self::new(&device.name, IsapiClient::from_config(device)?)))
            .collect()
    }
}

/// Outcome of probing one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub name: String,
    pub status: CameraStatus,
    /// The probe was abandoned after the time limit
    pub timed_out: bool,
}

/// The liveness columns of a stored CCTV device record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusRecord {
    pub id: i64,
    pub name: String,
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_online: Option<DateTime<Utc>>,
}

impl DeviceStatusRecord {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            online: false,
            last_online: None,
        }
    }

    /// Writes a probe result. An offline result keeps the last time the device was seen.
    pub fn apply_status(&mut self, status: &CameraStatus) {
        self.online = status.online;
        if status.online {
            if let Some(seen) = status.last_online {
                self.last_online = Some(seen);
            }
        }
    }
}

/// Checks one device, giving up after `limit`. A timeout counts as offline.
pub async fn probe_device(name: &str, client: &IsapiClient, limit: Duration) -> ProbeReport {
    match timeout(limit, client.check_camera_status()).await {
        Ok(status) => ProbeReport {
            name: name.to_string(),
            status,
            timed_out: false,
        },
        Err(_) => {
            warn!("Status probe of {} timed out after {:?}", name, limit);
            ProbeReport {
                name: name.to_string(),
                status: CameraStatus::offline(),
                timed_out: true,
            }
        }
    }
}

/// Probes all devices concurrently. Reports come back in input order.
pub async fn probe_devices(devices: &[MonitoredDevice], limit: Duration) -> Vec<ProbeReport> {
    let reports = join_all(
        devices
            .iter()
            .map(|device| probe_device(&device.name, &device.client, limit)),
    )
    .await;

    let online = reports.iter().filter(|r| r.status.online).count();
    info!("Probed {} devices, {} online", reports.len(), online);
    reports
}

/// Probes the device behind `record` and writes the result into it.
///
/// # Returns
///
/// Whether the device answered as online
pub async fn refresh_record(
    client: &IsapiClient,
    record: &mut DeviceStatusRecord,
    limit: Duration,
) -> bool {
    let report = probe_device(&record.name, client, limit).await;
    record.apply_status(&report.status);
    record.online
}
