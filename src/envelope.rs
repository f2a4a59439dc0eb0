use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Subtracted from the provider-declared lifetime so the envelope never
/// outlives the token it wraps.
const EXPIRY_SAFETY_MARGIN_SECS: u64 = 10;

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The token pair received from the provider, as packed into an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: String,
    /// Absolute expiry, unix seconds. Issue time + provider lifetime
    /// minus the safety margin.
    exp: u64,
}

impl TokenRecord {
    pub(crate) fn new(
        access_token: String,
        token_type: String,
        refresh_token: String,
        expires_in: u64,
    ) -> Self {
        Self {
            access_token,
            token_type,
            refresh_token,
            exp: unix_now() + expires_in.saturating_sub(EXPIRY_SAFETY_MARGIN_SECS),
        }
    }

    /// Build a record from a provider token-response body.
    pub(crate) fn from_response(json: &serde_json::Value) -> Result<Self, Error> {
        let access_token = json["access_token"].as_str().ok_or(Error::MissingField {
            field: "access_token",
        })?;
        let token_type = json["token_type"].as_str().ok_or(Error::MissingField {
            field: "token_type",
        })?;
        let refresh_token = json["refresh_token"].as_str().ok_or(Error::MissingField {
            field: "refresh_token",
        })?;
        let expires_in = json["expires_in"].as_u64().ok_or(Error::MissingField {
            field: "expires_in",
        })?;

        Ok(Self::new(
            access_token.to_string(),
            token_type.to_string(),
            refresh_token.to_string(),
            expires_in,
        ))
    }

    pub fn expires_at(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.exp)
    }
}

/// The signed, opaque token bundle handed to callers in place of raw
/// credentials. Treat it as a blob: store and transmit verbatim, never
/// parse its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEnvelope(String);

impl TokenEnvelope {
    /// Sign a record into an envelope with the client secret.
    pub(crate) fn seal(record: &TokenRecord, secret: &str) -> Result<Self, Error> {
        let token = encode(
            &Header::new(Algorithm::HS256),
            record,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(Error::InvalidToken)?;
        Ok(Self(token))
    }

    /// Verify the envelope and recover the record. Rejects bad
    /// signatures, malformed payloads, and expired envelopes.
    pub(crate) fn open(&self, secret: &str) -> Result<TokenRecord, Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<TokenRecord>(
            &self.0,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(Error::InvalidToken)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for TokenEnvelope {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TokenEnvelope {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TokenEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
