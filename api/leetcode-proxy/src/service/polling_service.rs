//! Status checks for upstream judge jobs.
//!
//! A job moves `PENDING -> STARTED -> <terminal>` on the upstream judge; any
//! `state` other than `PENDING` or `STARTED` is terminal (`SUCCESS`, error
//! codes, or no `state` at all). The proxy keeps no job table, so every call
//! here is a fresh query keyed by the upstream identifier.

use crate::config::upstream::UpstreamConfig;
use crate::service::gateway_service::{LeetCodeGateway, UpstreamError};
use crate::service::header_service::with_referer;
use crate::service::metrics_service;
use crate::service::submission_service::JobKind;
use axum::http::HeaderMap;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Started,
    Terminal(String),
}

impl JobState {
    pub fn from_payload(payload: &Value) -> Self {
        match payload.get("state").and_then(Value::as_str) {
            Some("PENDING") => Self::Pending,
            Some("STARTED") => Self::Started,
            Some(other) => Self::Terminal(other.to_string()),
            None => Self::Terminal(String::new()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Started => "STARTED",
            Self::Terminal(s) => s,
        }
    }
}

/// One observed status of an upstream job, payload kept verbatim.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub job_id: String,
    pub kind: JobKind,
    pub state: JobState,
    pub payload: Value,
}

#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub status: JobStatus,
    pub attempts: u32,
}

impl PollOutcome {
    pub fn completed(&self) -> bool {
        self.status.state.is_terminal()
    }
}

#[derive(Debug, Clone, Error)]
#[error("polling job {job_id} failed on attempt {attempt}: {source}")]
pub struct PollError {
    pub job_id: String,
    pub attempt: u32,
    #[source]
    pub source: UpstreamError,
}

/// Issues exactly one status query for `job_id`.
pub async fn check_status(
    gateway: &LeetCodeGateway,
    upstream: &UpstreamConfig,
    kind: JobKind,
    job_id: &str,
    headers: HeaderMap,
) -> Result<JobStatus, UpstreamError> {
    let path = format!("/submissions/detail/{job_id}/check/");
    let headers = with_referer(headers, &upstream.submission_detail_url(job_id));

    metrics_service::inc_status_checks();
    let resp = gateway.get_json(&path, headers).await?;
    if !resp.body.is_object() {
        return Err(UpstreamError::Shape("status object".to_string()));
    }

    let state = JobState::from_payload(&resp.body);
    debug!(job_id = %job_id, kind = kind.as_str(), state = state.as_str(), "job status checked");
    Ok(JobStatus {
        job_id: job_id.to_string(),
        kind,
        state,
        payload: resp.body,
    })
}

/// Checks `job_id` until it reaches a terminal state or the attempt budget
/// runs out; polls are strictly sequential and the interval starts after
/// each response. Exhaustion returns the last observed status, while any
/// failed check aborts the loop.
pub async fn poll_to_completion(
    gateway: &LeetCodeGateway,
    upstream: &UpstreamConfig,
    policy: PollPolicy,
    kind: JobKind,
    job_id: &str,
    headers: HeaderMap,
) -> Result<PollOutcome, PollError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let status = check_status(gateway, upstream, kind, job_id, headers.clone())
            .await
            .map_err(|source| {
                warn!(job_id = %job_id, attempt, error = %source, "status poll failed");
                PollError {
                    job_id: job_id.to_string(),
                    attempt,
                    source,
                }
            })?;

        if status.state.is_terminal() {
            info!(job_id = %job_id, attempt, state = status.state.as_str(), "job reached terminal state");
            return Ok(PollOutcome {
                status,
                attempts: attempt,
            });
        }

        if attempt >= max_attempts {
            metrics_service::inc_polls_exhausted();
            warn!(job_id = %job_id, attempt, state = status.state.as_str(), "poll budget exhausted");
            return Ok(PollOutcome {
                status,
                attempts: attempt,
            });
        }

        sleep(policy.interval).await;
    }
}
