use crate::config::upstream::UpstreamConfig;
use crate::service::gateway_service::{LeetCodeGateway, UpstreamError};
use crate::service::header_service::with_referer;
use crate::service::metrics_service;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobKind {
    Run,
    Submit,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "RUN",
            Self::Submit => "SUBMIT",
        }
    }

    pub fn upstream_path(&self, title_slug: &str) -> String {
        match self {
            Self::Run => format!("/problems/{title_slug}/interpret_solution/"),
            Self::Submit => format!("/problems/{title_slug}/submit/"),
        }
    }

    fn id_field(&self) -> &'static str {
        match self {
            Self::Run => "interpret_id",
            Self::Submit => "submission_id",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolutionPayload {
    pub lang: String,
    pub question_id: String,
    pub typed_code: String,
    pub data_input: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    lang: &'a str,
    question_id: &'a str,
    typed_code: &'a str,
}

#[derive(Debug, Serialize)]
struct InterpretBody<'a> {
    lang: &'a str,
    question_id: &'a str,
    typed_code: &'a str,
    data_input: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTicket {
    pub interpret_id: String,
    pub test_case: String,
    pub status_code: u16,
}

#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    #[error("failed to start {kind} job: {source}")]
    Upstream {
        kind: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("no {0} returned from upstream")]
    MissingIdentifier(&'static str),
}

/// Starts a graded submission and returns the upstream `submission_id`.
pub async fn submit_solution(
    gateway: &LeetCodeGateway,
    upstream: &UpstreamConfig,
    title_slug: &str,
    payload: &SolutionPayload,
    headers: HeaderMap,
) -> Result<String, SubmissionError> {
    let kind = JobKind::Submit;
    info!(title_slug = %title_slug, lang = %payload.lang, "submitting solution");

    let body = SubmitBody {
        lang: &payload.lang,
        question_id: &payload.question_id,
        typed_code: &payload.typed_code,
    };
    let headers = with_referer(headers, &upstream.problem_url(title_slug));
    let resp = gateway
        .post_json(&kind.upstream_path(title_slug), headers, &body)
        .await
        .map_err(|source| SubmissionError::Upstream {
            kind: kind.as_str(),
            source,
        })?;

    let submission_id = extract_id(&resp.body, kind.id_field()).ok_or_else(|| {
        error!(title_slug = %title_slug, "submit response carried no submission_id");
        SubmissionError::MissingIdentifier(kind.id_field())
    })?;

    metrics_service::inc_jobs_submitted();
    info!(title_slug = %title_slug, job_id = %submission_id, status = resp.status, "submission accepted upstream");
    Ok(submission_id)
}

/// Starts a sandboxed run against sample input.
pub async fn run_code(
    gateway: &LeetCodeGateway,
    upstream: &UpstreamConfig,
    title_slug: &str,
    payload: &SolutionPayload,
    headers: HeaderMap,
) -> Result<RunTicket, SubmissionError> {
    let kind = JobKind::Run;
    info!(title_slug = %title_slug, lang = %payload.lang, "running code");

    let body = InterpretBody {
        lang: &payload.lang,
        question_id: &payload.question_id,
        typed_code: &payload.typed_code,
        data_input: payload.data_input.as_deref().unwrap_or_default(),
    };
    let headers = with_referer(headers, &upstream.problem_url(title_slug));
    let resp = gateway
        .post_json(&kind.upstream_path(title_slug), headers, &body)
        .await
        .map_err(|source| SubmissionError::Upstream {
            kind: kind.as_str(),
            source,
        })?;

    let interpret_id = extract_id(&resp.body, kind.id_field()).ok_or_else(|| {
        error!(title_slug = %title_slug, "run response carried no interpret_id");
        SubmissionError::MissingIdentifier(kind.id_field())
    })?;
    let test_case = resp
        .body
        .get("test_case")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    metrics_service::inc_runs_started();
    info!(title_slug = %title_slug, job_id = %interpret_id, status = resp.status, "run accepted upstream");
    Ok(RunTicket {
        interpret_id,
        test_case,
        status_code: resp.status,
    })
}

/// Upstream identifiers arrive as strings or bare integers.
pub fn extract_id(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
