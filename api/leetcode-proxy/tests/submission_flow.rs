mod common;

use axum::body::Body;
use common::{app, app_with, get, post_json, send, test_config};
use http::{Request, StatusCode};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn solution() -> serde_json::Value {
    json!({
        "lang": "python3",
        "question_id": "1",
        "typed_code": "class Solution: pass"
    })
}

async fn mount_submit(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn submit_and_wait_returns_terminal_verdict() {
    let server = MockServer::start().await;
    mount_submit(&server, json!({"submission_id": 555})).await;

    Mock::given(method("GET"))
        .and(path("/submissions/detail/555/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "PENDING"})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/555/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "status_code": 10,
            "status_msg": "Accepted",
            "run_success": true,
            "total_correct": 63,
            "total_testcases": 63,
            "status_runtime": "0 ms"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "SUCCESS");
    assert_eq!(body["status_msg"], "Accepted");
    assert_eq!(body["submission_id"], "555");
    assert_eq!(body["total_correct"], 63);
}

#[tokio::test]
async fn submit_body_carries_exactly_the_solution_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .and(body_json(json!({
            "lang": "cpp",
            "question_id": "1",
            "typed_code": "int main() {}"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"submission_id": "77"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, headers, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/submit/two-sum",
        &json!({"question_id": "1", "typed_code": "int main() {}"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission_id"], "77");
    assert_eq!(body["state"], "PENDING");
    assert_eq!(headers.get("x-submission-id").unwrap(), "77");
}

#[tokio::test]
async fn polling_stops_after_attempt_budget_with_last_pending_status() {
    let server = MockServer::start().await;
    mount_submit(&server, json!({"submission_id": 9})).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/9/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "PENDING"})))
        .expect(3)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "PENDING");
    assert_eq!(body["submission_id"], "9");
}

#[tokio::test]
async fn polling_stops_on_first_terminal_state() {
    let server = MockServer::start().await;
    mount_submit(&server, json!({"submission_id": 10})).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/10/check/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"state": "SUCCESS", "status_msg": "Wrong Answer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.poll_max_attempts = 10;
    let (status, _, body) = post_json(
        app_with(config),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_msg"], "Wrong Answer");
}

#[tokio::test]
async fn polling_walks_pending_and_started_before_terminal() {
    let server = MockServer::start().await;
    mount_submit(&server, json!({"submission_id": 12})).await;
    for state in ["PENDING", "STARTED"] {
        Mock::given(method("GET"))
            .and(path("/submissions/detail/12/check/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": state})))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/submissions/detail/12/check/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"state": "SUCCESS", "status_msg": "Accepted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.poll_max_attempts = 10;
    let (status, _, body) = post_json(
        app_with(config),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "SUCCESS");
    assert_eq!(body["status_msg"], "Accepted");
    assert_eq!(body["submission_id"], "12");
}

#[tokio::test]
async fn slow_upstream_submit_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"submission_id": 13}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.upstream_timeout_seconds = 1;
    let (status, _, body) = post_json(
        app_with(config),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error_code"], "UPSTREAM_TIMEOUT");
}

#[tokio::test]
async fn poll_transport_failure_aborts_with_bad_gateway() {
    let server = MockServer::start().await;
    mount_submit(&server, json!({"submission_id": 11})).await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/11/check/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "POLL_FAILED");
}

#[tokio::test]
async fn missing_submission_id_is_a_hard_failure() {
    let server = MockServer::start().await;
    mount_submit(&server, json!({"detail": "ok"})).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "SUCCESS"})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/problems/submit?titleSlug=two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "MISSING_JOB_ID");
    assert!(body.get("questionId").is_none());
}

#[tokio::test]
async fn production_masks_upstream_failure_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("csrf verification failed"))
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.rust_env = "production".to_string();
    let (status, _, body) = post_json(
        app_with(config),
        "/api/leetcode/submit/two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "SUBMISSION_FAILED");
    assert_eq!(body["reason"], "An internal server error occurred");
}

#[tokio::test]
async fn request_cookie_csrf_is_forwarded_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .and(header("x-csrftoken", "tok123"))
        .and(header("cookie", "LEETCODE_SESSION=s; csrftoken=tok123"))
        .and(header("referer", format!("{}/problems/two-sum/", server.uri()).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"submission_id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/leetcode/submit/two-sum")
        .header("content-type", "application/json")
        .header("cookie", "LEETCODE_SESSION=s; csrftoken=tok123")
        .body(Body::from(solution().to_string()))
        .unwrap();
    let (status, _, _) = send(app(&server.uri()), request).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn proxy_submit_uses_body_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .and(header("cookie", "csrftoken=fromBody"))
        .and(header("x-csrftoken", "fromBody"))
        .and(header("user-agent", "custom-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"submission_id": 42})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/42/check/"))
        .and(header("x-csrftoken", "fromBody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "SUCCESS"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/problems/submit-as-proxy",
        &json!({
            "titleSlug": "two-sum",
            "questionId": "1",
            "code": "class Solution {};",
            "cookie": "csrftoken=fromBody",
            "userAgent": "custom-agent"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission_id"], "42");
}

#[tokio::test]
async fn run_code_returns_ticket_and_check_passes_result_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/interpret_solution/"))
        .and(body_json(json!({
            "lang": "python3",
            "question_id": "1",
            "typed_code": "class Solution: pass",
            "data_input": "[2,7,11,15]\n9"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "interpret_id": "runcode_1",
            "test_case": "[2,7,11,15]\n9"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/runcode_1/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "code_answer": ["[0,1]"],
            "correct_answer": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut body = solution();
    body["data_input"] = json!("[2,7,11,15]\n9");
    let (status, _, ticket) =
        post_json(app(&server.uri()), "/api/leetcode/run-code/two-sum", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ticket["interpret_id"], "runcode_1");
    assert_eq!(ticket["test_case"], "[2,7,11,15]\n9");
    assert_eq!(ticket["status_code"], 200);

    let (status, _, result) = get(
        app(&server.uri()),
        "/api/leetcode/run-code/check/runcode_1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        result,
        json!({"state": "SUCCESS", "code_answer": ["[0,1]"], "correct_answer": true})
    );
}

#[tokio::test]
async fn run_code_without_interpret_id_is_a_hard_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/interpret_solution/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test_case": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/run-code/two-sum",
        &solution(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "MISSING_JOB_ID");
}

#[tokio::test]
async fn check_submission_sets_header_and_fills_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/321/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "STARTED"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, headers, body) =
        get(app(&server.uri()), "/api/leetcode/submissions/321/check").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-submission-id").unwrap(), "321");
    assert_eq!(body["state"], "STARTED");
    assert_eq!(body["submission_id"], "321");
}

#[tokio::test]
async fn submission_validation_happens_before_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/submit/two-sum",
        &json!({"question_id": "1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_TYPED_CODE");

    let (status, _, body) = post_json(
        app(&server.uri()),
        "/api/leetcode/problems/submit",
        &solution(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_TITLE_SLUG");

    let request = Request::builder()
        .method("POST")
        .uri("/api/leetcode/run-code/two-sum")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(app(&server.uri()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_JSON_BODY");
}
