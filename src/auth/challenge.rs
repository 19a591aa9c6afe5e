use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Scheme token a challenge must carry to be answered.
pub const DIGEST_SCHEME: &str = "Digest";

lazy_static! {
    // key="value" (with backslash escapes) or key=token, in any order.
    static ref CHALLENGE_PARAM: Regex =
        Regex::new(r#"([A-Za-z][A-Za-z0-9_-]*)\s*=\s*(?:"((?:[^"\\]|\\.)*)"|([^,\s]+))"#)
            .expect("challenge parameter pattern");
}

/// Quality of protection variants defined by RFC 2617.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qop {
    /// Authentication only
    Auth,
    /// Authentication with integrity protection of the request body
    AuthInt,
}

impl Qop {
    /// Parses a single qop token as sent by the server.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "auth" => Some(Qop::Auth),
            "auth-int" => Some(Qop::AuthInt),
            _ => None,
        }
    }

    /// Picks the variant to answer from a server-offered list such as `auth,auth-int`.
    /// Plain `auth` wins when offered; unknown tokens are ignored.
    pub fn select(offered: &str) -> Option<Self> {
        let options: Vec<Qop> = offered.split(',').filter_map(Qop::parse).collect();
        if options.contains(&Qop::Auth) {
            Some(Qop::Auth)
        } else if options.contains(&Qop::AuthInt) {
            Some(Qop::AuthInt)
        } else {
            None
        }
    }
}

impl fmt::Display for Qop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Qop::Auth => "auth",
            Qop::AuthInt => "auth-int",
        })
    }
}

/// A digest challenge taken from a `WWW-Authenticate` header.
///
/// Built fresh for every 401 and dropped once the retried request completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    /// Protection space, usually the device model or serial
    pub realm: String,
    /// Server-issued opaque token
    pub nonce: String,
    /// Selected quality of protection, None in legacy mode
    pub qop: Option<Qop>,
    /// Passed back to the server untouched
    pub opaque: Option<String>,
    /// Advertised hash algorithm; MD5 is used regardless
    pub algorithm: Option<String>,
    /// Server reports the previous nonce as expired
    pub stale: bool,
}

impl DigestChallenge {
    /// Parses a `WWW-Authenticate` header value.
    ///
    /// Returns `None` when the value does not carry the `Digest` scheme or when
    /// `realm` or `nonce` is missing, since such a challenge cannot be answered.
    pub fn parse(header: &str) -> Option<Self> {
        let start = header.find(DIGEST_SCHEME)? + DIGEST_SCHEME.len();
        let mut params = parse_params(&header[start..]);

        let realm = params.remove("realm")?;
        let nonce = params.remove("nonce")?;
        let qop = params.get("qop").and_then(|offered| Qop::select(offered));

        let challenge = Self {
            realm,
            nonce,
            qop,
            opaque: params.remove("opaque"),
            algorithm: params.remove("algorithm"),
            stale: params
                .get("stale")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        };

        debug!(
            "Parsed Digest challenge - realm: {}, qop: {:?}, stale: {}",
            challenge.realm, challenge.qop, challenge.stale
        );
        Some(challenge)
    }

    /// True if the advertised algorithm is absent or plain MD5.
    pub fn is_md5(&self) -> bool {
        self.algorithm
            .as_deref()
            .map(|a| a.eq_ignore_ascii_case("MD5"))
            .unwrap_or(true)
    }
}

/// Returns true if a `WWW-Authenticate` value offers the Digest scheme.
pub fn is_digest(header: &str) -> bool {
    header.contains(DIGEST_SCHEME)
}

/// Scans `key=value` / `key="value"` pairs. Keys are lowercased and the
/// first occurrence of a key wins.
pub fn parse_params(input: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for caps in CHALLENGE_PARAM.captures_iter(input) {
        let key = caps[1].to_ascii_lowercase();
        let value = match (caps.get(2), caps.get(3)) {
            (Some(quoted), _) => unescape(quoted.as_str()),
            (None, Some(plain)) => plain.as_str().to_string(),
            (None, None) => continue,
        };
        params.entry(key).or_insert(value);
    }

    params
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_hikvision_challenge() {
        let header = r#"Digest qop="auth", realm="IP Camera(C1234)", nonce="4e5468694e7a51784f4459364e6a5a6b", stale="FALSE""#;
        let challenge = DigestChallenge::parse(header).unwrap();

        assert_eq!(challenge.realm, "IP Camera(C1234)");
        assert_eq!(challenge.nonce, "4e5468694e7a51784f4459364e6a5a6b");
        assert_eq!(challenge.qop, Some(Qop::Auth));
        assert_eq!(challenge.opaque, None);
        assert!(!challenge.stale);
        assert!(challenge.is_md5());
    }

    #[test]
    fn test_parse_unquoted_and_reordered() {
        let header = "Digest nonce=abc123, algorithm=MD5, realm=device, opaque=xyz, stale=true";
        let challenge = DigestChallenge::parse(header).unwrap();

        assert_eq!(challenge.realm, "device");
        assert_eq!(challenge.nonce, "abc123");
        assert_eq!(challenge.qop, None);
        assert_eq!(challenge.opaque.as_deref(), Some("xyz"));
        assert_eq!(challenge.algorithm.as_deref(), Some("MD5"));
        assert!(challenge.stale);
    }

    #[test]
    fn test_parse_multiline_rfc_example() {
        let header = r#"Digest
                 realm="testrealm@host.com",
                 qop="auth,auth-int",
                 nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093",
                 opaque="5ccc069c403ebaf9f0171e9517f40e41""#;
        let challenge = DigestChallenge::parse(header).unwrap();

        assert_eq!(challenge.realm, "testrealm@host.com");
        assert_eq!(challenge.qop, Some(Qop::Auth));
        assert_eq!(
            challenge.opaque.as_deref(),
            Some("5ccc069c403ebaf9f0171e9517f40e41")
        );
    }

    #[test]
    fn test_parse_escaped_quotes() {
        let header = r#"Digest realm="say \"hi\"", nonce="n""#;
        let challenge = DigestChallenge::parse(header).unwrap();
        assert_eq!(challenge.realm, r#"say "hi""#);
    }

    #[test]
    fn test_parse_rejects_incomplete_or_foreign() {
        assert!(DigestChallenge::parse(r#"Basic realm="x""#).is_none());
        assert!(DigestChallenge::parse(r#"Digest realm="x""#).is_none());
        assert!(DigestChallenge::parse(r#"Digest nonce="y""#).is_none());
        assert!(DigestChallenge::parse("").is_none());
    }

    #[test]
    fn test_qop_selection() {
        assert_eq!(Qop::select("auth"), Some(Qop::Auth));
        assert_eq!(Qop::select("auth-int"), Some(Qop::AuthInt));
        assert_eq!(Qop::select("auth-int, auth"), Some(Qop::Auth));
        assert_eq!(Qop::select("AUTH"), Some(Qop::Auth));
        assert_eq!(Qop::select("token"), None);
        assert_eq!(Qop::AuthInt.to_string(), "auth-int");
    }

    #[test]
    fn test_non_md5_algorithm_flagged() {
        let challenge =
            DigestChallenge::parse(r#"Digest realm="r", nonce="n", algorithm=SHA-256"#).unwrap();
        assert!(!challenge.is_md5());
    }

    #[test]
    fn test_is_digest() {
        assert!(is_digest(r#"Digest realm="x", nonce="y""#));
        assert!(!is_digest(r#"Basic realm="x""#));
    }
}
