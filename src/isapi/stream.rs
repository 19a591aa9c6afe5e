use crate::IsapiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which encoder output of a channel to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    /// Full resolution stream
    #[default]
    Main,
    /// Low bitrate sub stream
    Sub,
}

impl StreamType {
    /// Two digit suffix appended to the channel number in stream ids (`101`, `102`).
    pub fn suffix(self) -> &'static str {
        match self {
            StreamType::Main => "01",
            StreamType::Sub => "02",
        }
    }
}

impl FromStr for StreamType {
    type Err = IsapiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(StreamType::Main),
            "sub" => Ok(StreamType::Sub),
            _ => Err(IsapiError::UnknownStreamType(s.to_string())),
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamType::Main => "main",
            StreamType::Sub => "sub",
        })
    }
}
