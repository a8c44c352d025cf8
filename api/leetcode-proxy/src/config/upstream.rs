use crate::config::environment::AppConfig;
use crate::service::header_service::Credentials;
use crate::service::polling_service::PollPolicy;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub graphql_url: String,
    pub default_credentials: Credentials,
    pub timeout: Duration,
    pub poll: PollPolicy,
}

impl UpstreamConfig {
    pub fn from_app(app: &AppConfig) -> Self {
        Self {
            base_url: app.leetcode_base_url.trim_end_matches('/').to_string(),
            graphql_url: app.leetcode_graphql_url.clone(),
            default_credentials: Credentials {
                cookie: app.leetcode_cookie.clone(),
                csrf_token: app.leetcode_csrf_token.clone(),
                user_agent: app.leetcode_user_agent.clone(),
                origin: app.leetcode_origin.clone(),
                referer: app.leetcode_referer.clone(),
            },
            timeout: Duration::from_secs(app.upstream_timeout_seconds.max(1)),
            poll: PollPolicy {
                interval: Duration::from_millis(app.poll_interval_ms),
                max_attempts: app.poll_max_attempts.max(1),
            },
        }
    }

    pub fn problem_url(&self, title_slug: &str) -> String {
        format!("{}/problems/{title_slug}/", self.base_url)
    }

    pub fn submission_detail_url(&self, job_id: &str) -> String {
        format!("{}/submissions/detail/{job_id}/", self.base_url)
    }
}
