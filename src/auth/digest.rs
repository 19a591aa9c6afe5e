use super::challenge::{DigestChallenge, Qop};
use md5::{Digest, Md5};
use rand::Rng;
use std::fmt;

/// Nonce count sent with every qop response. Each nonce is answered once.
pub const NONCE_COUNT: &str = "00000001";

/// Lowercase hex MD5 of `data`.
pub fn md5_hex(data: impl AsRef<[u8]>) -> String {
    let mut hasher = Md5::new();
    hasher.update(data.as_ref());
    format!("{:x}", hasher.finalize())
}

/// Fresh random client nonce, 16 bytes hex encoded.
pub fn generate_cnonce() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// `HA1 = MD5(username:realm:password)`
pub fn ha1(username: &str, realm: &str, password: &str) -> String {
    md5_hex(format!("{}:{}:{}", username, realm, password))
}

/// `HA2 = MD5(method:uri)` for every qop variant; the body is never hashed.
pub fn ha2(method: &str, uri: &str) -> String {
    md5_hex(format!("{}:{}", method, uri))
}

/// Final digest value.
///
/// Without qop this is the RFC 2069 form `MD5(HA1:nonce:HA2)`; with qop it is
/// `MD5(HA1:nonce:nc:cnonce:qop:HA2)` using [`NONCE_COUNT`].
pub fn compute_response(ha1: &str, nonce: &str, ha2: &str, qop: Option<Qop>, cnonce: &str) -> String {
    match qop {
        Some(qop) => md5_hex(format!(
            "{}:{}:{}:{}:{}:{}",
            ha1, nonce, NONCE_COUNT, cnonce, qop, ha2
        )),
        None => md5_hex(format!("{}:{}:{}", ha1, nonce, ha2)),
    }
}

/// The request being signed.
///
/// Only borrowed data; build one per attempt.
pub struct DigestContext<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub method: &'a str,
    /// Request path as sent on the wire, not the full URL
    pub uri: &'a str,
    /// Fixed client nonce, for tests; generated otherwise
    pub cnonce: Option<&'a str>,
}

impl<'a> DigestContext<'a> {
    pub fn new(username: &'a str, password: &'a str, method: &'a str, uri: &'a str) -> Self {
        Self {
            username,
            password,
            method,
            uri,
            cnonce: None,
        }
    }

    pub fn with_cnonce(mut self, cnonce: &'a str) -> Self {
        self.cnonce = Some(cnonce);
        self
    }
}

impl fmt::Debug for DigestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestContext")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("cnonce", &self.cnonce)
            .finish()
    }
}

/// Value of the `Authorization` header answering a [`DigestChallenge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    pub username: String,
    pub realm: String,
    pub nonce: String,
    pub uri: String,
    /// Present together with `cnonce` only when the server asked for qop
    pub qop: Option<Qop>,
    pub cnonce: Option<String>,
    pub response: String,
    pub opaque: Option<String>,
}

impl AuthorizationHeader {
    /// Computes the answer to `challenge` for the request in `context`.
    pub fn respond(challenge: &DigestChallenge, context: &DigestContext<'_>) -> Self {
        let qop = challenge.qop;
        let cnonce = qop.map(|_| {
            context
                .cnonce
                .map(str::to_owned)
                .unwrap_or_else(generate_cnonce)
        });

        let ha1 = ha1(context.username, &challenge.realm, context.password);
        let ha2 = ha2(context.method, context.uri);
        let response = compute_response(
            &ha1,
            &challenge.nonce,
            &ha2,
            qop,
            cnonce.as_deref().unwrap_or_default(),
        );

        Self {
            username: context.username.to_string(),
            realm: challenge.realm.clone(),
            nonce: challenge.nonce.clone(),
            uri: context.uri.to_string(),
            qop,
            cnonce,
            response,
            opaque: challenge.opaque.clone(),
        }
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"Digest username="{}", realm="{}", nonce="{}", uri="{}""#,
            quote(&self.username),
            quote(&self.realm),
            quote(&self.nonce),
            quote(&self.uri)
        )?;

        if let (Some(qop), Some(cnonce)) = (self.qop, &self.cnonce) {
            write!(
                f,
                r#", qop={}, nc={}, cnonce="{}""#,
                qop,
                NONCE_COUNT,
                quote(cnonce)
            )?;
        }

        write!(f, r#", response="{}""#, self.response)?;

        if let Some(ref opaque) = self.opaque {
            write!(f, r#", opaque="{}""#, quote(opaque))?;
        }

        Ok(())
    }
}

fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
