use crate::service::metrics_service::MetricsSnapshot;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "EASY" => Some(Self::Easy),
            "MEDIUM" => Some(Self::Medium),
            "HARD" => Some(Self::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTag {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub lang: String,
    pub lang_slug: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallengeView {
    pub question_link: String,
    pub date: Option<String>,
    pub question_id: String,
    pub question_frontend_id: String,
    pub question_title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub is_paid_only: bool,
    pub question: Option<String>,
    pub example_testcases: Option<String>,
    pub topic_tags: Vec<TopicTag>,
    pub hints: Vec<String>,
    pub likes: Option<i64>,
    pub dislikes: Option<i64>,
    pub code_snippets: Vec<CodeSnippet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetailView {
    pub question_id: String,
    pub question_frontend_id: String,
    pub question_title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub is_paid_only: bool,
    pub question: Option<String>,
    pub example_testcases: Option<String>,
    pub sample_test_case: Option<String>,
    pub meta_data: Option<String>,
    pub code_snippets: Vec<CodeSnippet>,
    pub topic_tags: Vec<TopicTag>,
    pub hints: Vec<String>,
    pub likes: Option<i64>,
    pub dislikes: Option<i64>,
    pub question_link: String,
    pub enable_run_code: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListItem {
    pub question_id: String,
    pub question_frontend_id: String,
    pub title: String,
    pub title_slug: String,
    pub difficulty: String,
    pub status: Option<String>,
    pub is_paid_only: bool,
    pub topic_tags: Vec<TopicTag>,
    pub ac_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListResponse {
    pub questions: Vec<QuestionListItem>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionFilter {
    pub category: String,
    pub skip: u64,
    pub limit: u64,
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCheckResponse {
    pub is_signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitSolutionRequest {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub lang: Option<String>,
    #[serde(default, alias = "questionId", deserialize_with = "opt_string_or_number")]
    pub question_id: Option<String>,
    #[serde(default, alias = "typedCode", deserialize_with = "opt_string_or_number")]
    pub typed_code: Option<String>,
    #[serde(default, alias = "dataInput", deserialize_with = "opt_string_or_number")]
    pub data_input: Option<String>,
}

/// Proxy-submit body: the solution plus the caller's credentials inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySubmitRequest {
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub referer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuery {
    pub title_slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTicketResponse {
    pub submission_id: String,
    pub state: String,
}

/// Judge verdict for a graded submission, upstream field names kept.
///
/// Only `submission_id` is interpreted; every other field is passed through
/// with whatever JSON type upstream sent. Unlisted fields land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStatusView {
    pub submission_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_msg: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_lang: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_success: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_runtime: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_memory: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_runtime: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_percentile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_percentile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_correct: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_testcases: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_testcase: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile_error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_finish_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub env: String,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
