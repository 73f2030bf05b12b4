use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use lambda_http::http::HeaderMap;
use sha2::Sha256;
use thiserror::Error;

use crate::types::SlackCommand;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Requests older or newer than this many seconds are treated as replays.
const REPLAY_WINDOW_SECS: u64 = 60 * 5;
const VERSION: &str = "v0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signing secret is not configured")]
    MissingSecret,
    /// HMAC accepts keys of any length, so this does not occur with `Hmac<Sha256>`.
    #[error("signing secret is not a valid hmac key")]
    InvalidKey,
    #[error("missing header {0}")]
    MissingHeader(&'static str),
    #[error("request body is empty")]
    EmptyBody,
    #[error("timestamp {0:?} is not a unix time")]
    InvalidTimestamp(String),
    #[error("timestamp is {0}s away from now")]
    Expired(u64),
    #[error("signature is not of the form v0=<hex>")]
    Malformed,
    #[error("signature mismatch")]
    Mismatch,
}

/// Checks the Slack headers on a request against its raw body.
///
/// Borrows the body, so the caller can still parse it afterwards.
pub fn verify_request(headers: &HeaderMap, body: &[u8], secret: Option<&str>, now: i64) -> bool {
    let timestamp = header_value(headers, TIMESTAMP_HEADER);
    let signature = header_value(headers, SIGNATURE_HEADER);

    match (timestamp, signature) {
        (Some(timestamp), Some(signature)) => {
            verify_slack_signature(secret, body, timestamp, signature, now)
        }
        (None, _) => reject(SignatureError::MissingHeader(TIMESTAMP_HEADER)),
        (_, None) => reject(SignatureError::MissingHeader(SIGNATURE_HEADER)),
    }
}

/// Returns true only if `signature` is the v0 HMAC of `body` and `timestamp`
/// is within five minutes of `now`, in either direction.
pub fn verify_slack_signature(
    secret: Option<&str>,
    body: &[u8],
    timestamp: &str,
    signature: &str,
    now: i64,
) -> bool {
    match check_signature(secret, body, timestamp, signature, now) {
        Ok(()) => true,
        Err(e) => reject(e),
    }
}

pub fn check_signature(
    secret: Option<&str>,
    body: &[u8],
    timestamp: &str,
    signature: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingSecret)?;

    if body.is_empty() {
        return Err(SignatureError::EmptyBody);
    }

    let request_timestamp: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp(timestamp.to_string()))?;

    let skew = now.abs_diff(request_timestamp);
    if skew > REPLAY_WINDOW_SECS {
        return Err(SignatureError::Expired(skew));
    }

    let received = signature
        .strip_prefix("v0=")
        .and_then(|digest| hex::decode(digest).ok())
        .ok_or(SignatureError::Malformed)?;

    // verify_slice compares in constant time
    signing_mac(secret, timestamp, body)
        .map_err(|_| SignatureError::InvalidKey)?
        .verify_slice(&received)
        .map_err(|_| SignatureError::Mismatch)
}

/// `v0=<hex hmac>` for the given request parts.
#[cfg(test)]
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> Result<String, InvalidLength> {
    let result = signing_mac(secret, timestamp, body)?.finalize();
    Ok(format!("{}={}", VERSION, hex::encode(result.into_bytes())))
}

pub fn parse_slash_command(body: &[u8]) -> Result<SlackCommand, String> {
    let body = std::str::from_utf8(body).map_err(|e| format!("body is not utf-8: {}", e))?;
    serde_urlencoded::from_str(body).map_err(|e| format!("invalid form body: {}", e))
}

fn signing_mac(secret: &str, timestamp: &str, body: &[u8]) -> Result<HmacSha256, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Ok(mac)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn reject(reason: SignatureError) -> bool {
    tracing::warn!(%reason, "rejected slack signature");
    false
}
