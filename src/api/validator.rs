use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::api::client::{HubClient, HubEndpoints};
use crate::commands::configure::{RcFilePersister, Validate};
use crate::rc_file::RcConfig;

/// Checks the credentials stored in the rc file against the hub.
pub struct HubValidator {
    pub endpoints: HubEndpoints,
    pub home_dir: fn() -> Option<PathBuf>,
}

impl HubValidator {
    /// Reads back the file written by `persister`.
    pub fn for_persister(endpoints: HubEndpoints, persister: &RcFilePersister) -> Self {
        Self {
            endpoints,
            home_dir: persister.home_dir,
        }
    }
}

impl Validate for HubValidator {
    async fn validate(&self) -> Result<()> {
        let config = RcConfig::load_default(self.home_dir)
            .context("Failed to read the saved configuration")?;

        let client =
            HubClient::connect(&self.endpoints, &config.client_id, &config.client_secret).await?;
        client.authenticate(&config.id).await?;

        info!("Successfully authenticated!");
        Ok(())
    }
}
