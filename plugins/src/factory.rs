use std::sync::Arc;

use anyhow::{anyhow, Result};

use dhubdump_core::api::{ApiConfig, DatahubClient};

use crate::datahub::DatahubHttpClient;

/// Used when neither the command line nor the config names a client.
pub const DEFAULT_CLIENT_ID: &str = "dhubdump";

pub fn build_client(cfg: &ApiConfig) -> Result<Arc<dyn DatahubClient>> {
    Ok(Arc::new(build_http_client(cfg)?))
}

pub fn build_http_client(cfg: &ApiConfig) -> Result<DatahubHttpClient> {
    let secret = cfg
        .secret
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow!("no client secret configured"))?;
    let client_id = cfg
        .client_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_CLIENT_ID);

    tracing::debug!(
        target: "dhubdump.client",
        base_url = %cfg.base_url,
        client_id = %client_id,
        timeout_ms = cfg.timeout_ms,
        verbose = cfg.verbose,
        "building datahub client"
    );
    let client = DatahubHttpClient::new(&cfg.base_url, client_id, secret, cfg.timeout_ms)?;
    Ok(client.with_verbose(cfg.verbose))
}
