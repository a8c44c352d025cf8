use super::error::AppError;
use super::model::{
    DAILY_CHALLENGE_QUERY, QUESTION_DETAIL_QUERY, QUESTION_LIST_OPERATION, QUESTION_LIST_QUERY,
    USER_STATUS_QUERY,
};
use super::schema::{
    AuthCheckResponse, DailyChallengeView, ProblemDetailView, QuestionFilter,
    QuestionListResponse, SubmissionStatusView, SubmitTicketResponse,
};
use crate::app::AppState;
use crate::service::gateway_service::GraphqlRequest;
use crate::service::header_service::{outbound_headers, Credentials};
use crate::service::metrics_service;
use crate::service::mock_service;
use crate::service::normalize_service;
use crate::service::polling_service::{self, JobState};
use crate::service::submission_service::{self, JobKind, RunTicket, SolutionPayload};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

fn headers_for(state: &AppState, creds: &Credentials) -> axum::http::HeaderMap {
    outbound_headers(creds, &state.upstream.default_credentials)
}

pub async fn daily_challenge(
    state: &AppState,
    creds: &Credentials,
) -> Result<DailyChallengeView, AppError> {
    let request = GraphqlRequest {
        query: DAILY_CHALLENGE_QUERY,
        variables: None,
        operation_name: None,
    };
    let data = state
        .gateway
        .graphql(headers_for(state, creds), &request)
        .await?;
    let view = normalize_service::daily_challenge(&data, &state.upstream.base_url)?;
    info!(title_slug = %view.title_slug, date = ?view.date, "daily challenge fetched");
    Ok(view)
}

/// Falls back to the offline problem on any upstream failure.
pub async fn problem_detail(
    state: &AppState,
    title_slug: &str,
    creds: &Credentials,
) -> ProblemDetailView {
    let request = GraphqlRequest {
        query: QUESTION_DETAIL_QUERY,
        variables: Some(json!({ "titleSlug": title_slug })),
        operation_name: None,
    };
    let problem_url = state.upstream.problem_url(title_slug);

    let fetched = match state
        .gateway
        .graphql(headers_for(state, creds), &request)
        .await
    {
        Ok(data) => normalize_service::problem_detail(&data, problem_url.clone()),
        Err(e) => Err(e),
    };

    match fetched {
        Ok(view) => {
            info!(title_slug = %title_slug, "problem fetched");
            view
        }
        Err(e) => {
            metrics_service::inc_mock_fallbacks();
            warn!(title_slug = %title_slug, error = %e, "serving mock problem");
            mock_service::mock_problem(title_slug, problem_url)
        }
    }
}

/// Falls back to the offline question list on any upstream failure.
pub async fn list_questions(
    state: &AppState,
    filter: &QuestionFilter,
    creds: &Credentials,
) -> QuestionListResponse {
    let mut filters = Map::new();
    if let Some(difficulty) = filter.difficulty {
        filters.insert("difficulty".to_string(), json!(difficulty.as_str()));
    }
    let mut variables = json!({
        "categorySlug": filter.category,
        "skip": filter.skip,
        "limit": filter.limit,
        "filters": Value::Object(filters),
    });
    if let (Some(search), Some(vars)) = (&filter.search, variables.as_object_mut()) {
        vars.insert("searchKeyword".to_string(), json!(search));
    }

    let request = GraphqlRequest {
        query: QUESTION_LIST_QUERY,
        variables: Some(variables),
        operation_name: Some(QUESTION_LIST_OPERATION),
    };

    let fetched = match state
        .gateway
        .graphql(headers_for(state, creds), &request)
        .await
    {
        Ok(data) => normalize_service::question_page(&data, filter.skip, filter.limit),
        Err(e) => Err(e),
    };

    match fetched {
        Ok(page) => {
            info!(count = page.questions.len(), total = page.total, "questions fetched");
            page
        }
        Err(e) => {
            metrics_service::inc_mock_fallbacks();
            warn!(skip = filter.skip, limit = filter.limit, error = %e, "serving mock questions");
            mock_service::mock_questions(filter.skip, filter.limit)
        }
    }
}

/// Never fails; problems are reported inside the response.
pub async fn check_auth(state: &AppState, creds: &Credentials) -> AuthCheckResponse {
    let request = GraphqlRequest {
        query: USER_STATUS_QUERY,
        variables: None,
        operation_name: None,
    };

    let result = match state.gateway.graphql(headers_for(state, creds), &request).await {
        Ok(data) => normalize_service::auth_status(&data)
            .map_err(|_| "Invalid response from LeetCode API".to_string()),
        Err(e) => Err(format!("Failed to check authentication: {e}")),
    };

    match result {
        Ok(auth) => {
            info!(signed_in = auth.is_signed_in, "authentication status checked");
            auth
        }
        Err(error) => {
            warn!(reason = %error, "authentication check failed");
            AuthCheckResponse {
                is_signed_in: false,
                username: None,
                user_id: None,
                error: Some(error),
            }
        }
    }
}

/// Submits and polls until the judge reaches a terminal state or the poll
/// budget is spent, returning the last observed verdict either way.
pub async fn submit_and_wait(
    state: &AppState,
    title_slug: &str,
    payload: &SolutionPayload,
    creds: &Credentials,
) -> Result<SubmissionStatusView, AppError> {
    let headers = headers_for(state, creds);
    let submission_id = submission_service::submit_solution(
        &state.gateway,
        &state.upstream,
        title_slug,
        payload,
        headers.clone(),
    )
    .await?;

    let outcome = polling_service::poll_to_completion(
        &state.gateway,
        &state.upstream,
        state.upstream.poll,
        JobKind::Submit,
        &submission_id,
        headers,
    )
    .await?;

    info!(
        job_id = %submission_id,
        attempts = outcome.attempts,
        completed = outcome.completed(),
        state = outcome.status.state.as_str(),
        "submission settled"
    );
    Ok(normalize_service::submission_status(&outcome.status)?)
}

pub async fn submit_only(
    state: &AppState,
    title_slug: &str,
    payload: &SolutionPayload,
    creds: &Credentials,
) -> Result<SubmitTicketResponse, AppError> {
    let submission_id = submission_service::submit_solution(
        &state.gateway,
        &state.upstream,
        title_slug,
        payload,
        headers_for(state, creds),
    )
    .await?;

    Ok(SubmitTicketResponse {
        submission_id,
        state: JobState::Pending.as_str().to_string(),
    })
}

pub async fn run_code(
    state: &AppState,
    title_slug: &str,
    payload: &SolutionPayload,
    creds: &Credentials,
) -> Result<RunTicket, AppError> {
    Ok(submission_service::run_code(
        &state.gateway,
        &state.upstream,
        title_slug,
        payload,
        headers_for(state, creds),
    )
    .await?)
}

pub async fn check_submission(
    state: &AppState,
    submission_id: &str,
    creds: &Credentials,
) -> Result<SubmissionStatusView, AppError> {
    let status = polling_service::check_status(
        &state.gateway,
        &state.upstream,
        JobKind::Submit,
        submission_id,
        headers_for(state, creds),
    )
    .await?;
    Ok(normalize_service::submission_status(&status)?)
}

pub async fn check_run(
    state: &AppState,
    interpret_id: &str,
    creds: &Credentials,
) -> Result<Value, AppError> {
    let status = polling_service::check_status(
        &state.gateway,
        &state.upstream,
        JobKind::Run,
        interpret_id,
        headers_for(state, creds),
    )
    .await?;
    Ok(normalize_service::run_status(status))
}
