//! # HTTP Digest Authentication
//!
//! RFC 2617 digest support for device clients: parsing a `WWW-Authenticate`
//! challenge and answering it with an `Authorization` header.
//!
//! ```rust
//! use hikio::auth::{AuthorizationHeader, DigestChallenge, DigestContext};
//!
//! let challenge = DigestChallenge::parse(r#"Digest realm="x", nonce="y""#).unwrap();
//! let context = DigestContext::new("admin", "pass", "GET", "/ISAPI/System/deviceInfo");
//! let header = AuthorizationHeader::respond(&challenge, &context).to_string();
//! assert!(header.starts_with(r#"Digest username="admin", realm="x", nonce="y""#));
//! ```

mod challenge;
mod digest;

pub use challenge::{is_digest, parse_params, DigestChallenge, Qop, DIGEST_SCHEME};
pub use digest::{
    compute_response, generate_cnonce, ha1, ha2, md5_hex, AuthorizationHeader, DigestContext,
    NONCE_COUNT,
};
