//! Static API key authentication.
//!
//! Every discovery request must present the configured API key in the
//! [`API_KEY_HEADER`] header, either raw or in the `Bearer <key>` form. The
//! gate is a pure, request-scoped predicate: it holds no mutable state, keeps
//! no sessions and can be cloned freely across request tasks.
//!
//! # Comparison
//!
//! The configured secret is reduced to its SHA-256 digest when the gate is
//! built, and every presented key is hashed the same way before the two
//! digests are compared with [`subtle::ConstantTimeEq`]. Comparing fixed-size
//! digests keeps both the content and the length of the secret out of the
//! timing profile.
//!
//! # Example
//!
//! ```rust
//! use scim_gateway::auth::{ApiKeyAuthenticator, AuthConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let gate = ApiKeyAuthenticator::new(&AuthConfig::new("s3cret")?);
//!
//! assert!(gate.authenticate(Some("Bearer s3cret")).is_ok());
//! assert!(gate.authenticate(Some("guess")).is_err());
//! assert!(gate.authenticate(None).is_err());
//! # Ok(())
//! # }
//! ```

use crate::error::{BuildError, BuildResult};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use std::fmt;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-KEY";

const BEARER_SCHEME: &str = "bearer";

/// Authentication configuration holding the expected API key.
///
/// The secret is redacted from `Debug` output.
#[derive(Clone)]
pub struct AuthConfig {
    api_key: String,
}

impl AuthConfig {
    /// Create an authentication configuration.
    ///
    /// Surrounding whitespace is stripped, the same way it is stripped from
    /// presented keys. A secret that is empty after that is rejected as a
    /// startup misconfiguration.
    pub fn new(api_key: impl Into<String>) -> BuildResult<Self> {
        let api_key = api_key.into();
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(BuildError::EmptyApiKey);
        }
        Ok(Self {
            api_key: api_key.to_string(),
        })
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Proof that a request presented the configured API key.
///
/// Only [`ApiKeyAuthenticator::authenticate`] can construct one.
#[derive(Debug, Clone)]
pub struct Principal {
    credential_hash: String,
    validated_at: DateTime<Utc>,
}

impl Principal {
    /// SHA-256 of the presented key, hex encoded, for audit purposes.
    pub fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    /// Short prefix of the credential hash suitable for log lines.
    pub fn fingerprint(&self) -> &str {
        &self.credential_hash[..12]
    }

    /// Get validation timestamp
    pub fn validated_at(&self) -> DateTime<Utc> {
        self.validated_at
    }
}

/// Authentication errors
///
/// Messages never include the expected or the presented key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("missing API key in X-API-KEY header")]
    MissingCredential,
    #[error("invalid API key")]
    InvalidCredential,
}

/// Constant-time API key gate.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    expected_digest: Vec<u8>,
}

impl ApiKeyAuthenticator {
    /// Build the gate from its configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            expected_digest: Sha256::digest(config.api_key.as_bytes()).to_vec(),
        }
    }

    /// Authenticate the raw header value of a request, if any.
    pub fn authenticate(&self, header_value: Option<&str>) -> Result<Principal, AuthenticationError> {
        let key = header_value
            .map(extract_key)
            .filter(|key| !key.is_empty())
            .ok_or(AuthenticationError::MissingCredential)?;

        let presented = Sha256::digest(key.as_bytes());
        if bool::from(presented.as_slice().ct_eq(self.expected_digest.as_slice())) {
            Ok(Principal {
                credential_hash: format!("{:x}", presented),
                validated_at: Utc::now(),
            })
        } else {
            Err(AuthenticationError::InvalidCredential)
        }
    }
}

impl fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthenticator").finish_non_exhaustive()
    }
}

/// Strip surrounding whitespace and an optional, case-insensitive `Bearer` scheme.
///
/// A bare `Bearer` yields an empty key: HTTP stacks drop the trailing space of
/// `Bearer `, so both forms mean "no credential".
fn extract_key(header_value: &str) -> &str {
    let value = header_value.trim();
    if value.eq_ignore_ascii_case(BEARER_SCHEME) {
        return "";
    }
    match value.split_once(char::is_whitespace) {
        Some((scheme, key)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => key.trim(),
        _ => value,
    }
}
