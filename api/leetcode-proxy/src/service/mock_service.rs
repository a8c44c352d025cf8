//! Offline stand-ins served when problem or question reads fail upstream.
//!
//! Never used on the submit, run or status paths.

use crate::module::leetcode::schema::{
    CodeSnippet, ProblemDetailView, QuestionListItem, QuestionListResponse, TopicTag,
};
use crate::service::normalize_service::page_number;

pub const MOCK_QUESTION_TOTAL: u64 = 100;

fn tag(name: &str, slug: &str) -> TopicTag {
    TopicTag {
        name: name.to_string(),
        slug: slug.to_string(),
    }
}

fn snippet(lang: &str, lang_slug: &str, code: &str) -> CodeSnippet {
    CodeSnippet {
        lang: lang.to_string(),
        lang_slug: lang_slug.to_string(),
        code: code.to_string(),
    }
}

pub fn mock_problem(title_slug: &str, problem_url: String) -> ProblemDetailView {
    match title_slug {
        "two-sum" => two_sum(problem_url),
        _ => not_found(title_slug, problem_url),
    }
}

fn two_sum(problem_url: String) -> ProblemDetailView {
    ProblemDetailView {
        question_id: "1".to_string(),
        question_frontend_id: "1".to_string(),
        question_title: "Two Sum".to_string(),
        title_slug: "two-sum".to_string(),
        difficulty: "EASY".to_string(),
        is_paid_only: false,
        question: Some(
            "<p>Given an array of integers <code>nums</code> and an integer <code>target</code>, \
             return <em>indices of the two numbers such that they add up to <code>target</code></em>.</p>"
                .to_string(),
        ),
        example_testcases: Some("[2,7,11,15]\n9".to_string()),
        sample_test_case: Some("[2,7,11,15]\n9".to_string()),
        meta_data: Some("{}".to_string()),
        code_snippets: vec![
            snippet(
                "C++",
                "cpp",
                "class Solution {\npublic:\n    vector<int> twoSum(vector<int>& nums, int target) {\n        \n    }\n};",
            ),
            snippet(
                "Java",
                "java",
                "class Solution {\n    public int[] twoSum(int[] nums, int target) {\n        \n    }\n}",
            ),
            snippet(
                "Python",
                "python",
                "class Solution(object):\n    def twoSum(self, nums, target):\n        \"\"\"\n        :type nums: List[int]\n        :type target: int\n        :rtype: List[int]\n        \"\"\"\n        ",
            ),
            snippet(
                "JavaScript",
                "javascript",
                "/**\n * @param {number[]} nums\n * @param {number} target\n * @return {number[]}\n */\nvar twoSum = function(nums, target) {\n    \n};",
            ),
        ],
        topic_tags: vec![tag("Array", "array"), tag("Hash Table", "hash-table")],
        hints: vec![
            "A really brute force way would be to search for all possible pairs of numbers but that would be too slow.".to_string(),
            "Try to use the fact that the complement of a number can be found in O(1) time using a hash table.".to_string(),
        ],
        likes: Some(35000),
        dislikes: Some(1100),
        question_link: problem_url,
        enable_run_code: true,
    }
}

fn not_found(title_slug: &str, problem_url: String) -> ProblemDetailView {
    ProblemDetailView {
        question_id: "404".to_string(),
        question_frontend_id: "404".to_string(),
        question_title: "Problem Not Found".to_string(),
        title_slug: title_slug.to_string(),
        difficulty: "MEDIUM".to_string(),
        is_paid_only: false,
        question: Some("<p>This problem is not available or could not be found.</p>".to_string()),
        example_testcases: Some(String::new()),
        sample_test_case: Some(String::new()),
        meta_data: Some("{}".to_string()),
        code_snippets: vec![
            snippet("C++", "cpp", "// Problem not found\n"),
            snippet("JavaScript", "javascript", "// Problem not found\n"),
        ],
        topic_tags: Vec::new(),
        hints: Vec::new(),
        likes: Some(0),
        dislikes: Some(0),
        question_link: problem_url,
        enable_run_code: false,
    }
}

fn mock_question(id: u64) -> QuestionListItem {
    let (title, slug, difficulty, tags) = match id {
        1 => (
            "Two Sum".to_string(),
            "two-sum".to_string(),
            "EASY",
            vec![tag("Array", "array"), tag("Hash Table", "hash-table")],
        ),
        2 => (
            "Add Two Numbers".to_string(),
            "add-two-numbers".to_string(),
            "MEDIUM",
            vec![
                tag("Linked List", "linked-list"),
                tag("Math", "math"),
                tag("Recursion", "recursion"),
            ],
        ),
        3 => (
            "Longest Substring Without Repeating Characters".to_string(),
            "longest-substring-without-repeating-characters".to_string(),
            "MEDIUM",
            vec![
                tag("Hash Table", "hash-table"),
                tag("String", "string"),
                tag("Sliding Window", "sliding-window"),
            ],
        ),
        i => (
            format!("Mock Problem {i}"),
            format!("mock-problem-{i}"),
            if i % 3 == 0 {
                "HARD"
            } else if i % 2 == 0 {
                "MEDIUM"
            } else {
                "EASY"
            },
            vec![
                tag("Array", "array"),
                tag("Dynamic Programming", "dynamic-programming"),
            ],
        ),
    };

    QuestionListItem {
        question_id: id.to_string(),
        question_frontend_id: id.to_string(),
        title,
        title_slug: slug,
        difficulty: difficulty.to_string(),
        status: None,
        is_paid_only: id > 3 && id % 10 == 0,
        topic_tags: tags,
        ac_rate: Some(mock_ac_rate(id)),
    }
}

fn mock_ac_rate(id: u64) -> f64 {
    match id {
        1 => 0.4781,
        2 => 0.3581,
        3 => 0.3281,
        i => 0.15 + ((i * 37) % 70) as f64 / 100.0,
    }
}

/// `[skip, skip + limit)` of the fixed 100-item list.
pub fn mock_questions(skip: u64, limit: u64) -> QuestionListResponse {
    let start = skip.min(MOCK_QUESTION_TOTAL);
    let end = skip.saturating_add(limit).min(MOCK_QUESTION_TOTAL);

    QuestionListResponse {
        questions: (start..end).map(|idx| mock_question(idx + 1)).collect(),
        total: MOCK_QUESTION_TOTAL,
        page: page_number(skip, limit),
        page_size: limit,
    }
}
