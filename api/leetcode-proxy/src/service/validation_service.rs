use crate::module::leetcode::error::AppError;
use crate::module::leetcode::schema::{
    Difficulty, ProxySubmitRequest, QuestionFilter, QuestionListQuery, SubmitSolutionRequest,
};
use crate::service::header_service::Credentials;
use crate::service::submission_service::SolutionPayload;

pub const DEFAULT_LANG: &str = "cpp";
pub const DEFAULT_CATEGORY: &str = "all-code-essentials";
pub const DEFAULT_PAGE_SIZE: u64 = 100;
pub const MAX_PAGE_SIZE: u64 = 500;

fn required(value: Option<&String>, code: &'static str, name: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::bad_request(code, format!("{name} is required"))),
    }
}

fn lang_or_default(lang: Option<&String>) -> String {
    match lang.map(|l| l.trim()) {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => DEFAULT_LANG.to_string(),
    }
}

pub fn validate_title_slug(slug: Option<&String>) -> Result<String, AppError> {
    required(slug, "INVALID_TITLE_SLUG", "titleSlug")
}

/// `typed_code` keeps its whitespace; only emptiness is rejected.
pub fn validate_submission(req: &SubmitSolutionRequest) -> Result<SolutionPayload, AppError> {
    let question_id = required(req.question_id.as_ref(), "INVALID_QUESTION_ID", "question_id")?;
    let typed_code = match req.typed_code.as_deref() {
        Some(code) if !code.trim().is_empty() => code.to_string(),
        _ => {
            return Err(AppError::bad_request(
                "INVALID_TYPED_CODE",
                "typed_code is required",
            ));
        }
    };

    Ok(SolutionPayload {
        lang: lang_or_default(req.lang.as_ref()),
        question_id,
        typed_code,
        data_input: req.data_input.clone(),
    })
}

/// Returns the slug, the solution and the credentials carried in the body.
pub fn validate_proxy_submission(
    req: &ProxySubmitRequest,
) -> Result<(String, SolutionPayload, Credentials), AppError> {
    let title_slug = validate_title_slug(req.title_slug.as_ref())?;
    let question_id = required(req.question_id.as_ref(), "INVALID_QUESTION_ID", "questionId")?;
    let typed_code = match req.code.as_deref() {
        Some(code) if !code.trim().is_empty() => code.to_string(),
        _ => return Err(AppError::bad_request("INVALID_CODE", "code is required")),
    };

    let non_empty = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    };
    let credentials = Credentials {
        cookie: non_empty(&req.cookie),
        csrf_token: non_empty(&req.csrf_token),
        user_agent: non_empty(&req.user_agent),
        origin: non_empty(&req.origin),
        referer: non_empty(&req.referer),
    };

    Ok((
        title_slug,
        SolutionPayload {
            lang: lang_or_default(req.lang.as_ref()),
            question_id,
            typed_code,
            data_input: None,
        },
        credentials,
    ))
}

fn parse_number(raw: Option<&String>, default: u64, name: &str) -> Result<u64, AppError> {
    match raw.map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v.parse::<u64>().map_err(|_| {
            AppError::bad_request("INVALID_PAGINATION", format!("{name} must be a positive integer"))
        }),
    }
}

pub fn validate_question_query(query: &QuestionListQuery) -> Result<QuestionFilter, AppError> {
    let page = parse_number(query.page.as_ref(), 1, "page")?;
    if page < 1 {
        return Err(AppError::bad_request(
            "INVALID_PAGINATION",
            "page must be at least 1",
        ));
    }

    let page_size = parse_number(query.page_size.as_ref(), DEFAULT_PAGE_SIZE, "pageSize")?;
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(AppError::bad_request(
            "INVALID_PAGINATION",
            format!("pageSize must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }

    let difficulty = match query.difficulty.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(Difficulty::parse(raw).ok_or_else(|| {
            AppError::bad_request(
                "INVALID_DIFFICULTY",
                "difficulty must be one of EASY, MEDIUM, HARD",
            )
        })?),
    };

    let category = match query.category.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    };
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);

    Ok(QuestionFilter {
        category,
        skip: (page - 1).saturating_mul(page_size),
        limit: page_size,
        difficulty,
        search,
    })
}
