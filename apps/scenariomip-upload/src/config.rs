//! # Configuration
//!
//! Credentials and the target instance come from the environment, optionally
//! seeded from a `.env` file in the working directory:
//! - `ZENODO_TOKEN` — personal access token (required)
//! - `ZENODO_DOMAIN` — instance base URL (default: `https://zenodo.org`)
//!
//! The token is checked before anything else runs.

use crate::error::UploadError;
use scenariomip_core::primitives::DEFAULT_ZENODO_DOMAIN;
use std::fmt;

/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "ZENODO_TOKEN";

/// Environment variable overriding the Zenodo instance.
pub const DOMAIN_VAR: &str = "ZENODO_DOMAIN";

/// Resolved configuration for the deposition client.
#[derive(Clone)]
pub struct UploadConfig {
    pub token: String,
    pub zenodo_domain: String,
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadConfig")
            .field("token", &"<redacted>")
            .field("zenodo_domain", &self.zenodo_domain)
            .finish()
    }
}

impl UploadConfig {
    /// Load `.env` (if present), then read the process environment.
    pub fn from_env() -> Result<Self, UploadError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UploadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                UploadError::Config(format!(
                    "Please copy the `.env.sample` file to `.env` and ensure you have set your {TOKEN_VAR}."
                ))
            })?;

        let zenodo_domain = lookup(DOMAIN_VAR)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ZENODO_DOMAIN.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token,
            zenodo_domain,
        })
    }
}
