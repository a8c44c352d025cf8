use crate::config::environment::AppConfig;
use crate::config::upstream::UpstreamConfig;
use reqwest::Client as HttpClient;

#[derive(Debug, Clone)]
pub struct InfraClients {
    pub http: HttpClient,
}

/// Upstream client shared by every request; the timeout bounds each call.
pub fn init_infra(config: &AppConfig) -> Result<InfraClients, String> {
    let http = HttpClient::builder()
        .timeout(UpstreamConfig::from_app(config).timeout)
        .build()
        .map_err(|e| format!("http client init failed: {e}"))?;
    Ok(InfraClients { http })
}
