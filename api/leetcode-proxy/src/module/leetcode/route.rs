use super::controller;
use crate::app::AppState;
use axum::Router;
use axum::routing::{get, post};

fn leetcode_routes() -> Router<AppState> {
    Router::new()
        .route("/daily", get(controller::daily_challenge))
        .route(
            "/problems/submit",
            get(controller::get_problem_named_submit).post(controller::submit_problem),
        )
        .route(
            "/problems/submit-as-proxy",
            get(controller::get_problem_named_submit_as_proxy).post(controller::submit_as_proxy),
        )
        .route("/problems/:title_slug", get(controller::get_problem))
        .route("/questions", get(controller::list_questions))
        .route("/run-code/:title_slug", post(controller::run_code))
        .route("/run-code/check/:interpret_id", get(controller::check_run))
        .route("/submit/:title_slug", post(controller::submit_solution))
        .route("/submissions/latest", get(controller::latest_submission))
        .route(
            "/submissions/:submission_id/check",
            get(controller::check_submission),
        )
        .route("/auth-check", get(controller::auth_check))
        .route("/fetch-cookies", get(controller::fetch_cookies))
}

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(controller::root))
        .route("/health", get(controller::health))
        .nest("/api/leetcode", leetcode_routes())
        .fallback(controller::fallback)
        .with_state(state)
}
