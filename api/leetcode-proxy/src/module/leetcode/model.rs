use crate::module::leetcode::schema::{CodeSnippet, TopicTag};
use serde::Deserialize;
use serde_json::Value;

pub const DAILY_CHALLENGE_QUERY: &str = r#"
query questionOfToday {
  activeDailyCodingChallengeQuestion {
    date
    userStatus
    link
    question {
      questionId
      questionFrontendId
      title
      titleSlug
      content
      difficulty
      topicTags { name slug }
      codeSnippets { lang langSlug code }
      hints
      exampleTestcases
      sampleTestCase
      metaData
      enableRunCode
      isPaidOnly
      likes
      dislikes
    }
  }
}
"#;

pub const QUESTION_DETAIL_QUERY: &str = r#"
query getQuestionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    questionFrontendId
    title
    titleSlug
    content
    difficulty
    topicTags { name slug }
    codeSnippets { lang langSlug code }
    hints
    exampleTestcases
    sampleTestCase
    metaData
    enableRunCode
    isPaidOnly
    likes
    dislikes
  }
}
"#;

pub const QUESTION_LIST_OPERATION: &str = "problemsetQuestionListV2";

pub const QUESTION_LIST_QUERY: &str = r#"
query problemsetQuestionListV2($filters: QuestionFilterInput, $limit: Int, $searchKeyword: String, $skip: Int, $sortBy: QuestionSortByInput, $categorySlug: String) {
  problemsetQuestionListV2(
    filters: $filters
    limit: $limit
    searchKeyword: $searchKeyword
    skip: $skip
    sortBy: $sortBy
    categorySlug: $categorySlug
  ) {
    questions {
      id
      titleSlug
      title
      questionFrontendId
      paidOnly
      difficulty
      topicTags { name slug }
      status
      acRate
    }
    totalLength
    finishedLength
    hasMore
  }
}
"#;

pub const USER_STATUS_QUERY: &str = r#"
query getUserProfile {
  userStatus {
    userId
    username
    isSignedIn
  }
}
"#;

/// `question` object shared by the daily and detail queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawQuestion {
    pub question_id: Option<String>,
    pub question_frontend_id: Option<String>,
    pub title: Option<String>,
    pub title_slug: Option<String>,
    pub content: Option<String>,
    pub difficulty: Option<String>,
    pub topic_tags: Option<Vec<TopicTag>>,
    pub code_snippets: Option<Vec<CodeSnippet>>,
    pub hints: Option<Vec<String>>,
    pub example_testcases: Option<String>,
    pub sample_test_case: Option<String>,
    pub meta_data: Option<String>,
    pub enable_run_code: Option<bool>,
    pub is_paid_only: Option<bool>,
    pub likes: Option<i64>,
    pub dislikes: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDailyChallenge {
    pub date: Option<String>,
    pub user_status: Option<String>,
    pub link: Option<String>,
    pub question: Option<RawQuestion>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawQuestionListItem {
    pub id: Value,
    pub title_slug: Option<String>,
    pub title: Option<String>,
    pub question_frontend_id: Option<Value>,
    pub paid_only: Option<bool>,
    pub difficulty: Option<String>,
    pub topic_tags: Option<Vec<TopicTag>>,
    pub status: Option<String>,
    pub ac_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProblemsetPage {
    pub questions: Option<Vec<RawQuestionListItem>>,
    pub total_length: Option<u64>,
    pub finished_length: Option<u64>,
    pub has_more: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUserStatus {
    pub user_id: Option<Value>,
    pub username: Option<String>,
    pub is_signed_in: Option<bool>,
}
