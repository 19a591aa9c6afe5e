use hikio::config::Config;
use hikio::isapi::StreamType;
use hikio::monitor::{probe_devices, MonitoredDevice};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Pick up HIKIO_* variables from a local .env file if present
    dotenv::dotenv().ok();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    if config.devices.is_empty() {
        println!("No devices configured. Set HIKIO_BASE_URL or create hikio.toml");
        return Ok(());
    }

    let devices = MonitoredDevice::from_config(&config)?;
    println!(
        "Probing {} devices (timeout {:?})",
        devices.len(),
        config.probe_timeout()
    );

    let reports = probe_devices(&devices, config.probe_timeout()).await;
    for (device, report) in devices.iter().zip(&reports) {
        println!("{}", serde_json::to_string(report)?);

        if !report.status.online {
            continue;
        }

        match device.client.get_device_info().await {
            Ok(info) => {
                let info = &info["DeviceInfo"];
                println!("  Model: {}", info["model"]);
                println!("  Serial: {}", info["serialNumber"]);
                println!("  Firmware: {}", info["firmwareVersion"]);
            }
            Err(e) => println!("  Device info failed: {}", e),
        }

        println!("  Live: {}", device.client.get_http_preview_url(1, StreamType::Main));
    }

    Ok(())
}
