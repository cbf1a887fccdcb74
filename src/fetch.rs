//! Installer artifact fetching.
//!
//! A blocking HTTP client for downloading the pinned runtime installer,
//! with optional SHA-256 verification of the payload. Redirects are
//! followed by the client; there is no resume or retry — a failed
//! transfer is fatal to the pipeline.

use anyhow::{anyhow, bail};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

/// Outcome of fetching and verifying the installer artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Payload written to disk and verified against the pinned digest.
    Verified,
    /// Payload written to disk; no digest was configured to check.
    ///
    /// This is the accepted-risk path: the artifact is trusted purely on
    /// its pinned URL.
    Unverified,
    /// Transfer or verification failed; nothing usable on disk.
    Failed { message: String },
}

impl DownloadOutcome {
    /// Whether the artifact is on disk and usable.
    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Fetches the runtime installer over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new fetcher with a default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("pystrap/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the payload at `url` into memory.
    pub fn fetch_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.bytes()?.to_vec())
    }

    /// Download `url` to `dest`, verifying against `expected_sha256` when
    /// one is configured.
    ///
    /// On verification failure nothing is left at `dest`.
    pub fn download_to(
        &self,
        url: &str,
        dest: &Path,
        expected_sha256: Option<&str>,
    ) -> DownloadOutcome {
        let bytes = match self.fetch_bytes(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                return DownloadOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        if let Some(expected) = expected_sha256 {
            if let Err(e) = verify_sha256(&bytes, expected) {
                return DownloadOutcome::Failed {
                    message: e.to_string(),
                };
            }
        }

        if let Err(e) = std::fs::write(dest, &bytes) {
            return DownloadOutcome::Failed {
                message: format!("writing {}: {}", dest.display(), e),
            };
        }

        match expected_sha256 {
            Some(_) => DownloadOutcome::Verified,
            None => DownloadOutcome::Unverified,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare a payload's SHA-256 digest against an expected lowercase hex
/// digest.
pub fn verify_sha256(bytes: &[u8], expected: &str) -> anyhow::Result<()> {
    let digest = hex::encode(Sha256::digest(bytes));
    if digest.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(anyhow!(
            "checksum mismatch: expected {}, got {}",
            expected,
            digest
        ))
    }
}
