//! Token/Code Generator.
//!
//! - URL tokens: OS CSPRNG bytes, URL-safe base64 without padding
//! - Resume codes: short, typed by humans, so the alphabet skips 0/O and 1/I
//! - Token digests: only `hash_token(token, secret)` is ever persisted

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

use crate::errors::QuizError;

pub const DEFAULT_URL_TOKEN_BYTES: usize = 32;
pub const DEFAULT_RESUME_CODE_LENGTH: usize = 8;
pub const RESUME_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub fn new_url_token(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn new_resume_code(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| RESUME_CODE_ALPHABET[rng.gen_range(0..RESUME_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Hex SHA-256 over `secret || token`. Same inputs always give the same digest.
pub fn hash_token(token: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// How long an issued resume token stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryChoice {
    OneDay,
    SevenDays,
    ThirtyDays,
    Permanent,
}

impl ExpiryChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryChoice::OneDay => "1d",
            ExpiryChoice::SevenDays => "7d",
            ExpiryChoice::ThirtyDays => "30d",
            ExpiryChoice::Permanent => "permanent",
        }
    }

    /// `None` means the token never expires.
    pub fn duration(self) -> Option<Duration> {
        match self {
            ExpiryChoice::OneDay => Some(Duration::days(1)),
            ExpiryChoice::SevenDays => Some(Duration::days(7)),
            ExpiryChoice::ThirtyDays => Some(Duration::days(30)),
            ExpiryChoice::Permanent => None,
        }
    }

    pub fn expires_at(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|d| now + d)
    }
}

impl fmt::Display for ExpiryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryChoice {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(ExpiryChoice::OneDay),
            "7d" => Ok(ExpiryChoice::SevenDays),
            "30d" => Ok(ExpiryChoice::ThirtyDays),
            "permanent" => Ok(ExpiryChoice::Permanent),
            other => Err(QuizError::InvalidParameter(format!(
                "Unsupported expiry choice: {other:?}"
            ))),
        }
    }
}

pub fn expiry_from_choice(choice: &str) -> Result<Option<Duration>, QuizError> {
    Ok(choice.parse::<ExpiryChoice>()?.duration())
}

pub fn expires_at(choice: &str, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, QuizError> {
    Ok(choice.parse::<ExpiryChoice>()?.expires_at(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hash_token_stable_with_secret() {
        assert_eq!(hash_token("abc", "k"), hash_token("abc", "k"));
        assert_ne!(hash_token("abc", "k"), hash_token("abc", "k2"));
        assert_ne!(hash_token("abc", "k"), hash_token("abd", "k"));
    }

    #[test]
    fn test_hash_token_is_hex_sha256() {
        let digest = hash_token("abc", "k");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        // Equivalent to sha256("kabc")
        assert_eq!(digest, hex::encode(Sha256::digest(b"kabc")));
    }

    #[test]
    fn test_url_token_is_url_safe() {
        let token = new_url_token(DEFAULT_URL_TOKEN_BYTES);
        assert_eq!(token.len(), 43); // 32 bytes → 43 chars unpadded
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(token, new_url_token(DEFAULT_URL_TOKEN_BYTES));
    }

    #[test]
    fn test_resume_code_uses_unambiguous_alphabet() {
        let code = new_resume_code(DEFAULT_RESUME_CODE_LENGTH);
        assert_eq!(code.len(), 8);
        assert!(code.bytes().all(|b| RESUME_CODE_ALPHABET.contains(&b)));
        for confusable in ['0', 'O', '1', 'I'] {
            assert!(!RESUME_CODE_ALPHABET.contains(&(confusable as u8)));
        }
    }

    #[test]
    fn test_expiry_from_choice() {
        assert_eq!(expiry_from_choice("1d").unwrap(), Some(Duration::days(1)));
        assert_eq!(expiry_from_choice("7d").unwrap(), Some(Duration::days(7)));
        assert_eq!(expiry_from_choice("30d").unwrap(), Some(Duration::days(30)));
        assert_eq!(expiry_from_choice("permanent").unwrap(), None);
    }

    #[test]
    fn test_unknown_expiry_rejected() {
        for bad in ["2d", "", "Permanent", "forever"] {
            assert!(matches!(
                expiry_from_choice(bad),
                Err(QuizError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_expires_at_adds_duration() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let at = expires_at("7d", now).unwrap().unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap());
        assert_eq!(expires_at("permanent", now).unwrap(), None);
    }
}
