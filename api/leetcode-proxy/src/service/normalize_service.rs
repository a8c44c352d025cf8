use crate::module::leetcode::model::{
    RawDailyChallenge, RawProblemsetPage, RawQuestion, RawQuestionListItem, RawUserStatus,
};
use crate::module::leetcode::schema::{
    AuthCheckResponse, DailyChallengeView, ProblemDetailView, QuestionListItem,
    QuestionListResponse, SubmissionStatusView,
};
use crate::service::gateway_service::UpstreamError;
use crate::service::polling_service::JobStatus;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn daily_challenge(data: &Value, base_url: &str) -> Result<DailyChallengeView, UpstreamError> {
    let raw: RawDailyChallenge = field(data, "activeDailyCodingChallengeQuestion")?;
    let question = raw
        .question
        .ok_or_else(|| UpstreamError::Shape("daily challenge question".to_string()))?;
    let link = raw.link.unwrap_or_default();

    Ok(DailyChallengeView {
        question_link: format!("{}{}", base_url.trim_end_matches('/'), link),
        date: raw.date,
        question_id: question.question_id.unwrap_or_default(),
        question_frontend_id: question.question_frontend_id.unwrap_or_default(),
        question_title: question.title.unwrap_or_default(),
        title_slug: question.title_slug.unwrap_or_default(),
        difficulty: question.difficulty.unwrap_or_default(),
        is_paid_only: question.is_paid_only.unwrap_or(false),
        question: question.content,
        example_testcases: question.example_testcases,
        topic_tags: question.topic_tags.unwrap_or_default(),
        hints: question.hints.unwrap_or_default(),
        likes: question.likes,
        dislikes: question.dislikes,
        code_snippets: question.code_snippets.unwrap_or_default(),
    })
}

/// `question_link` is always rebuilt from the requested slug.
pub fn problem_detail(
    data: &Value,
    problem_url: String,
) -> Result<ProblemDetailView, UpstreamError> {
    let question: RawQuestion = field(data, "question")?;

    Ok(ProblemDetailView {
        question_id: question.question_id.unwrap_or_default(),
        question_frontend_id: question.question_frontend_id.unwrap_or_default(),
        question_title: question.title.unwrap_or_default(),
        title_slug: question.title_slug.unwrap_or_default(),
        difficulty: question.difficulty.unwrap_or_default(),
        is_paid_only: question.is_paid_only.unwrap_or(false),
        question: question.content,
        example_testcases: question.example_testcases,
        sample_test_case: question.sample_test_case,
        meta_data: question.meta_data,
        code_snippets: question.code_snippets.unwrap_or_default(),
        topic_tags: question.topic_tags.unwrap_or_default(),
        hints: question.hints.unwrap_or_default(),
        likes: question.likes,
        dislikes: question.dislikes,
        question_link: problem_url,
        enable_run_code: question.enable_run_code.unwrap_or(false),
    })
}

pub fn question_page(
    data: &Value,
    skip: u64,
    limit: u64,
) -> Result<QuestionListResponse, UpstreamError> {
    let page: RawProblemsetPage = field(data, "problemsetQuestionListV2")?;
    let raw_items = page
        .questions
        .ok_or_else(|| UpstreamError::Shape("problemset questions".to_string()))?;

    let questions: Vec<QuestionListItem> = raw_items.into_iter().map(question_item).collect();
    let total = match page.total_length {
        Some(total) if total > 0 => total,
        _ => questions.len() as u64,
    };

    Ok(QuestionListResponse {
        questions,
        total,
        page: page_number(skip, limit),
        page_size: limit,
    })
}

pub fn question_item(raw: RawQuestionListItem) -> QuestionListItem {
    QuestionListItem {
        question_id: scalar_to_string(&raw.id),
        question_frontend_id: raw
            .question_frontend_id
            .as_ref()
            .map(scalar_to_string)
            .unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        title_slug: raw.title_slug.unwrap_or_default(),
        difficulty: raw.difficulty.unwrap_or_default(),
        status: raw.status,
        is_paid_only: raw.paid_only.unwrap_or(false),
        topic_tags: raw.topic_tags.unwrap_or_default(),
        ac_rate: raw.ac_rate,
    }
}

pub fn auth_status(data: &Value) -> Result<AuthCheckResponse, UpstreamError> {
    let status: RawUserStatus = field(data, "userStatus")?;
    Ok(AuthCheckResponse {
        is_signed_in: status.is_signed_in.unwrap_or(false),
        username: status.username,
        user_id: status.user_id.filter(|id| !id.is_null()),
        error: None,
    })
}

/// Graded verdict; the job identifier fills `submission_id` when upstream
/// leaves it out.
pub fn submission_status(status: &JobStatus) -> Result<SubmissionStatusView, UpstreamError> {
    let mut payload = status.payload.clone();
    if let Some(obj) = payload.as_object_mut() {
        let id = match obj.get("submission_id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => status.job_id.clone(),
        };
        obj.insert("submission_id".to_string(), Value::String(id));
    }

    serde_json::from_value(payload)
        .map_err(|e| UpstreamError::Shape(format!("submission status fields ({e})")))
}

/// Run results are returned as upstream reported them.
pub fn run_status(status: JobStatus) -> Value {
    status.payload
}

pub fn page_number(skip: u64, limit: u64) -> u64 {
    skip / limit.max(1) + 1
}

fn field<T: DeserializeOwned>(data: &Value, name: &str) -> Result<T, UpstreamError> {
    match data.get(name) {
        Some(value) if !value.is_null() => serde_json::from_value(value.clone())
            .map_err(|e| UpstreamError::Shape(format!("{name} ({e})"))),
        _ => Err(UpstreamError::Shape(name.to_string())),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
