use crate::config::upstream::UpstreamConfig;
use crate::service::metrics_service;
use axum::http::HeaderMap;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {message}")]
    Transport {
        status: Option<u16>,
        network: bool,
        timeout: bool,
        message: String,
    },

    #[error("upstream response missing {0}")]
    Shape(String),
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Shape(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timeout: true, .. })
    }

    /// True when no HTTP response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport { network: true, .. })
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Transport {
            status: e.status().map(|s| s.as_u16()),
            network: e.is_timeout() || e.is_connect() || e.is_request(),
            timeout: e.is_timeout(),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

/// One-call transport to the upstream platform. Never retries.
#[derive(Debug, Clone)]
pub struct LeetCodeGateway {
    http: Client,
    base_url: String,
    graphql_url: String,
}

impl LeetCodeGateway {
    pub fn new(http: Client, upstream: &UpstreamConfig) -> Self {
        Self {
            http,
            base_url: upstream.base_url.clone(),
            graphql_url: upstream.graphql_url.clone(),
        }
    }

    /// POSTs a GraphQL document and returns its `data` object.
    pub async fn graphql(
        &self,
        headers: HeaderMap,
        request: &GraphqlRequest,
    ) -> Result<Value, UpstreamError> {
        let url = self.graphql_url.clone();
        let resp = self.send(Method::POST, url, headers, Some(request)).await?;
        match resp.body.get("data") {
            Some(data) if data.is_object() => Ok(data.clone()),
            _ => {
                let reason = resp
                    .body
                    .get("errors")
                    .and_then(Value::as_array)
                    .and_then(|errs| errs.first())
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("no data object");
                Err(UpstreamError::Shape(format!("graphql data ({reason})")))
            }
        }
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        headers: HeaderMap,
        body: &B,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.rest_url(path);
        self.send(Method::POST, url, headers, Some(body)).await
    }

    pub async fn get_json(
        &self,
        path: &str,
        headers: HeaderMap,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.rest_url(path);
        self.send::<()>(Method::GET, url, headers, None).await
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<&B>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        metrics_service::inc_upstream_requests();
        debug!(method = %method, url = %url, "upstream request");

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = async {
            let response = request.send().await.map_err(UpstreamError::from_reqwest)?;
            let status = response.status();
            debug!(method = %method, url = %url, status = status.as_u16(), "upstream response");
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(UpstreamError::Transport {
                    status: Some(status.as_u16()),
                    network: false,
                    timeout: false,
                    message: format!("status {}: {}", status.as_u16(), trim_body(&text)),
                });
            }
            let body = response
                .json::<Value>()
                .await
                .map_err(UpstreamError::from_reqwest)?;
            Ok(UpstreamResponse {
                status: status.as_u16(),
                body,
            })
        }
        .await;

        if let Err(e) = &result {
            metrics_service::inc_upstream_failures();
            error!(
                method = %method,
                url = %url,
                upstream_status = ?e.status(),
                network = e.is_network(),
                error = %e,
                "upstream call failed"
            );
        }
        result
    }
}

fn trim_body(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() > 200 {
        let head: String = trimmed.chars().take(200).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_reports_status_and_network_flag() {
        let rejected = UpstreamError::Transport {
            status: Some(403),
            network: false,
            timeout: false,
            message: "status 403: forbidden".to_string(),
        };
        assert_eq!(rejected.status(), Some(403));
        assert!(!rejected.is_network());

        let refused = UpstreamError::Transport {
            status: None,
            network: true,
            timeout: false,
            message: "connection refused".to_string(),
        };
        assert_eq!(refused.status(), None);
        assert!(refused.is_network());
        assert!(!refused.is_timeout());

        let shape = UpstreamError::Shape("data".to_string());
        assert_eq!(shape.status(), None);
        assert!(!shape.is_network());
    }
}
