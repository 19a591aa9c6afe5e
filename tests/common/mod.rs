#![allow(dead_code)]

use hikio::auth::parse_params;
use md5::{Digest, Md5};
use wiremock::{Match, Request};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "pass";

pub const LEGACY_CHALLENGE: &str = r#"Digest realm="x", nonce="y""#;
pub const QOP_CHALLENGE: &str =
    r#"Digest qop="auth", realm="IP Camera(D1234)", nonce="4e6a497a4d4451344d6a49364d7a63", stale="FALSE", opaque="op4que""#;

pub const DEVICE_INFO_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<DeviceInfo version="2.0" xmlns="http://www.hikvision.com/ver20/XMLSchema">
  <deviceName>Store 12 NVR</deviceName>
  <model>DS-7608NI-K2</model>
  <serialNumber>DS-7608NI-K20820190101CCRRD12345678WCVU</serialNumber>
  <firmwareVersion>V4.30.085</firmwareVersion>
</DeviceInfo>"#;

fn md5_hex(input: String) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Accepts a request only if its `Authorization` header is a correct digest
/// answer for the given credentials, the way a device would check it.
pub struct DigestVerifier {
    pub username: &'static str,
    pub password: &'static str,
}

impl DigestVerifier {
    pub fn new() -> Self {
        Self {
            username: USERNAME,
            password: PASSWORD,
        }
    }
}

impl Match for DigestVerifier {
    fn matches(&self, request: &Request) -> bool {
        let header = match request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        {
            Some(header) => header,
            None => return false,
        };
        let params = match header.strip_prefix("Digest ") {
            Some(rest) => parse_params(rest),
            None => return false,
        };

        let (realm, nonce, uri, response) = match (
            params.get("realm"),
            params.get("nonce"),
            params.get("uri"),
            params.get("response"),
        ) {
            (Some(r), Some(n), Some(u), Some(resp)) => (r, n, u, resp),
            _ => return false,
        };

        if params.get("username").map(String::as_str) != Some(self.username)
            || uri != request.url.path()
        {
            return false;
        }

        let ha1 = md5_hex(format!("{}:{}:{}", self.username, realm, self.password));
        let ha2 = md5_hex(format!("{}:{}", request.method.as_str(), uri));
        let expected = match params.get("qop") {
            Some(qop) => {
                let (nc, cnonce) = match (params.get("nc"), params.get("cnonce")) {
                    (Some(nc), Some(cnonce)) => (nc, cnonce),
                    _ => return false,
                };
                md5_hex(format!(
                    "{}:{}:{}:{}:{}:{}",
                    ha1, nonce, nc, cnonce, qop, ha2
                ))
            }
            None => md5_hex(format!("{}:{}:{}", ha1, nonce, ha2)),
        };

        *response == expected
    }
}

pub fn authorization_of(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
