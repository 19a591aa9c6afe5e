use crate::{IsapiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Files probed by [`Config::load`], first match wins.
pub const CONFIG_PATHS: [&str; 2] = ["./hikio.toml", "./config.toml"];

const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DEVICE_NAME: &str = "default";
const DEFAULT_USERNAME: &str = "admin";

/// Connection settings for one device.
///
/// The password is never serialized and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_device_name")]
    pub name: String,
    pub base_url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl DeviceConfig {
    pub fn new(name: &str, base_url: &str, username: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Reads `HIKIO_BASE_URL`, `HIKIO_USERNAME`, `HIKIO_PASSWORD` and
    /// `HIKIO_DEVICE_NAME`. Returns `None` unless the base URL is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`DeviceConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("HIKIO_BASE_URL").filter(|url| !url.trim().is_empty())?;

        Some(Self {
            name: lookup("HIKIO_DEVICE_NAME").unwrap_or_else(default_device_name),
            base_url,
            username: lookup("HIKIO_USERNAME").unwrap_or_else(default_username),
            password: lookup("HIKIO_PASSWORD").unwrap_or_default(),
        })
    }
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Top level configuration: the device fleet and how long a liveness probe may take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            devices: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the first file in [`CONFIG_PATHS`] that exists, then adds the
    /// device described by the environment, if any.
    pub fn load() -> Result<Self> {
        Self::load_from(&CONFIG_PATHS)
    }

    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        Self::load_from_with(paths, |key| env::var(key).ok())
    }

    /// Same as [`Config::load_from`] with a custom variable source.
    pub fn load_from_with<P, F>(paths: &[P], lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match paths.iter().find(|p| p.as_ref().exists()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(device) = DeviceConfig::from_lookup(lookup) {
            config.devices.push(device);
            config.validate()?;
        }

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the probe timeout is non-zero and that device names are
    /// unique and every device has a base URL.
    pub fn validate(&self) -> Result<()> {
        if self.probe_timeout_secs == 0 {
            return Err(IsapiError::Config("probe_timeout_secs must be positive".into()));
        }

        let mut names = HashSet::new();
        for device in &self.devices {
            if device.base_url.trim().is_empty() {
                return Err(IsapiError::Config(format!(
                    "device '{}' has no base_url",
                    device.name
                )));
            }
            if !names.insert(device.name.as_str()) {
                return Err(IsapiError::Config(format!(
                    "duplicate device name '{}'",
                    device.name
                )));
            }
        }

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn device(&self, name: &str) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.name == name)
    }
}

/// Creates a default config template file if it doesn't exist
pub fn create_default_config_template<P: AsRef<Path>>(path: P) -> Result<()> {
    if !path.as_ref().exists() {
        let template = r#"# hikio configuration
# This is a template. Replace the values with your actual devices.

# Seconds a liveness probe may take before the device counts as offline
probe_timeout_secs = 5

[[devices]]
name = "lobby-nvr"
base_url = "http://192.0.2.10"
username = "admin"
password = "change-me"
"#;
        std::fs::write(path, template)?;
    }
    Ok(())
}

fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_probe_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}
