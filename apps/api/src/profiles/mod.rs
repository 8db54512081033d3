//! Profile source — mock credit profiles loaded once at startup.
//!
//! The store is read-only after load and shared behind an `Arc`.

pub mod handlers;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::profile::CreditProfile;

#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: Vec<CreditProfile>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<CreditProfile>) -> Self {
        Self { profiles }
    }

    /// Reads a JSON array of profiles from `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read profiles file '{}'", path.display()))?;

        let profiles: Vec<CreditProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("Profiles file '{}' is not valid JSON", path.display()))?;

        info!("Loaded {} credit profiles from {}", profiles.len(), path.display());
        Ok(Self::new(profiles))
    }

    pub fn all(&self) -> &[CreditProfile] {
        &self.profiles
    }

    pub fn find(&self, id: &str) -> Option<&CreditProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }
}
