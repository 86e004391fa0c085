use std::sync::Arc;

use anyhow::Result;

use browseract_core::api::{AppConfig, BrowserActNode, TaskApiClient, Transport, CREDENTIAL_NAME};

use crate::transport::HttpTransport;

pub fn build_transport(cfg: &AppConfig) -> Result<Arc<dyn Transport>> {
    if !cfg.api.has_api_key() {
        anyhow::bail!(
            "credential '{}' has no API key; set api.api_key or BROWSERACT_API_KEY",
            CREDENTIAL_NAME
        );
    }
    Ok(Arc::new(HttpTransport::new(
        cfg.api.base_url.clone(),
        cfg.api.api_key.clone(),
        cfg.api.request_timeout_ms,
    )?))
}

pub fn build_client(cfg: &AppConfig) -> Result<TaskApiClient> {
    let transport = build_transport(cfg)?;
    Ok(TaskApiClient::with_channel_key(
        transport,
        cfg.api.channel_key.clone(),
    ))
}

pub fn build_node(cfg: &AppConfig) -> Result<BrowserActNode> {
    let client = build_client(cfg)?;
    Ok(BrowserActNode::new(client, cfg.poll.policy())
        .with_default_timeout(cfg.poll.default_timeout_secs))
}
