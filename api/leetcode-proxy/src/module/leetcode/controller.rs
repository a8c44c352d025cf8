use super::crud;
use super::error::AppError;
use super::schema::{
    HealthResponse, MessageResponse, ProxySubmitRequest, QuestionListQuery, SubmitQuery,
    SubmitSolutionRequest,
};
use crate::app::AppState;
use crate::service::header_service::Credentials;
use crate::service::metrics_service;
use crate::service::validation_service::{
    validate_proxy_submission, validate_question_query, validate_submission, validate_title_slug,
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

pub const SUBMISSION_ID_HEADER: &str = "x-submission-id";

fn reject(state: &AppState, err: AppError, context: &str) -> Response {
    if err.status.is_server_error() {
        error!(error_code = err.code, reason = %err.message, "{context}");
    } else {
        info!(error_code = err.code, reason = %err.message, "{context}");
    }
    err.render(state.config.is_production()).into_response()
}

fn invalid_json(rejection: JsonRejection) -> AppError {
    AppError::bad_request("INVALID_JSON_BODY", rejection.body_text())
}

fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::bad_request("INVALID_QUERY", rejection.body_text())
}

fn with_submission_id(mut resp: Response, submission_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(submission_id) {
        resp.headers_mut().insert(SUBMISSION_ID_HEADER, value);
    }
    resp
}

pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: "Welcome to LeetCode API Server".to_string(),
        instructions: None,
    })
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        env: state.config.rust_env.clone(),
        metrics: metrics_service::snapshot(),
    })
}

pub async fn fallback(State(state): State<AppState>) -> Response {
    reject(
        &state,
        AppError::not_found("ROUTE_NOT_FOUND", "Resource not found"),
        "unknown route",
    )
}

pub async fn daily_challenge(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let creds = Credentials::from_headers(&headers);
    match crud::daily_challenge(&state, &creds).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => reject(&state, err, "daily challenge fetch failed"),
    }
}

async fn problem_response(state: &AppState, title_slug: &str, headers: &HeaderMap) -> Response {
    let creds = Credentials::from_headers(headers);
    let view = crud::problem_detail(state, title_slug, &creds).await;
    (StatusCode::OK, Json(view)).into_response()
}

pub async fn get_problem(
    State(state): State<AppState>,
    Path(title_slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    problem_response(&state, &title_slug, &headers).await
}

/// The submit endpoints own these paths for POST; a GET on them is still a
/// problem lookup by slug.
pub async fn get_problem_named_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    problem_response(&state, "submit", &headers).await
}

pub async fn get_problem_named_submit_as_proxy(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    problem_response(&state, "submit-as-proxy", &headers).await
}

pub async fn submit_problem(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<SubmitQuery>, QueryRejection>,
    body: Result<Json<SubmitSolutionRequest>, JsonRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rej) => return reject(&state, invalid_query(rej), "problem submit rejected"),
    };
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return reject(&state, invalid_json(rej), "problem submit rejected"),
    };
    let prepared = validate_title_slug(query.title_slug.as_ref())
        .and_then(|slug| validate_submission(&req).map(|payload| (slug, payload)));
    let (title_slug, payload) = match prepared {
        Ok(v) => v,
        Err(err) => return reject(&state, err, "problem submit rejected"),
    };

    let creds = Credentials::from_headers(&headers);
    match crud::submit_and_wait(&state, &title_slug, &payload, &creds).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => reject(&state, err, "problem submit failed"),
    }
}

pub async fn submit_as_proxy(
    State(state): State<AppState>,
    body: Result<Json<ProxySubmitRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return reject(&state, invalid_json(rej), "proxy submit rejected"),
    };
    let (title_slug, payload, creds) = match validate_proxy_submission(&req) {
        Ok(v) => v,
        Err(err) => return reject(&state, err, "proxy submit rejected"),
    };

    match crud::submit_and_wait(&state, &title_slug, &payload, &creds).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => reject(&state, err, "proxy submit failed"),
    }
}

pub async fn list_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<QuestionListQuery>, QueryRejection>,
) -> Response {
    let filter = match query
        .map_err(invalid_query)
        .and_then(|Query(q)| validate_question_query(&q))
    {
        Ok(f) => f,
        Err(err) => return reject(&state, err, "question listing rejected"),
    };

    let creds = Credentials::from_headers(&headers);
    let page = crud::list_questions(&state, &filter, &creds).await;
    (StatusCode::OK, Json(page)).into_response()
}

pub async fn run_code(
    State(state): State<AppState>,
    Path(title_slug): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SubmitSolutionRequest>, JsonRejection>,
) -> Response {
    let payload = match body
        .map_err(invalid_json)
        .and_then(|Json(req)| validate_submission(&req))
    {
        Ok(p) => p,
        Err(err) => return reject(&state, err, "run code rejected"),
    };

    let creds = Credentials::from_headers(&headers);
    match crud::run_code(&state, &title_slug, &payload, &creds).await {
        Ok(ticket) => (StatusCode::OK, Json(ticket)).into_response(),
        Err(err) => reject(&state, err, "run code failed"),
    }
}

pub async fn submit_solution(
    State(state): State<AppState>,
    Path(title_slug): Path<String>,
    headers: HeaderMap,
    body: Result<Json<SubmitSolutionRequest>, JsonRejection>,
) -> Response {
    let payload = match body
        .map_err(invalid_json)
        .and_then(|Json(req)| validate_submission(&req))
    {
        Ok(p) => p,
        Err(err) => return reject(&state, err, "solution submit rejected"),
    };

    let creds = Credentials::from_headers(&headers);
    match crud::submit_only(&state, &title_slug, &payload, &creds).await {
        Ok(ticket) => {
            let id = ticket.submission_id.clone();
            with_submission_id((StatusCode::OK, Json(ticket)).into_response(), &id)
        }
        Err(err) => reject(&state, err, "solution submit failed"),
    }
}

pub async fn check_submission(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let creds = Credentials::from_headers(&headers);
    match crud::check_submission(&state, &submission_id, &creds).await {
        Ok(view) => {
            with_submission_id((StatusCode::OK, Json(view)).into_response(), &submission_id)
        }
        Err(err) => reject(&state, err, "submission check failed"),
    }
}

pub async fn check_run(
    State(state): State<AppState>,
    Path(interpret_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let creds = Credentials::from_headers(&headers);
    match crud::check_run(&state, &interpret_id, &creds).await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => reject(&state, err, "run check failed"),
    }
}

pub async fn latest_submission(State(state): State<AppState>) -> Response {
    reject(
        &state,
        AppError::not_found(
            "NOT_IMPLEMENTED",
            "Latest submission lookup is not supported; use the submission_id returned by submit",
        ),
        "latest submission requested",
    )
}

pub async fn auth_check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let creds = Credentials::from_headers(&headers);
    let auth = crud::check_auth(&state, &creds).await;
    (StatusCode::OK, Json(auth)).into_response()
}

pub async fn fetch_cookies() -> impl IntoResponse {
    Json(MessageResponse {
        message: "This endpoint is for documentation purposes only. In the browser version, this would help fetch cookies from LeetCode.".to_string(),
        instructions: Some(
            "To authenticate with LeetCode, you need to provide your LeetCode cookies in the request headers.".to_string(),
        ),
    })
}
