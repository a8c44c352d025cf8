use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

static UPSTREAM_REQUESTS: AtomicU64 = AtomicU64::new(0);
static UPSTREAM_FAILURES: AtomicU64 = AtomicU64::new(0);
static JOBS_SUBMITTED: AtomicU64 = AtomicU64::new(0);
static RUNS_STARTED: AtomicU64 = AtomicU64::new(0);
static STATUS_CHECKS: AtomicU64 = AtomicU64::new(0);
static POLLS_EXHAUSTED: AtomicU64 = AtomicU64::new(0);
static MOCK_FALLBACKS: AtomicU64 = AtomicU64::new(0);

static LAST_ERROR_TS: AtomicI64 = AtomicI64::new(0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub upstream_requests: u64,
    pub upstream_failures: u64,
    pub jobs_submitted: u64,
    pub runs_started: u64,
    pub status_checks: u64,
    pub polls_exhausted: u64,
    pub mock_fallbacks: u64,
    pub last_error_ts: i64,
}

pub fn inc_upstream_requests() {
    UPSTREAM_REQUESTS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_upstream_failures() {
    UPSTREAM_FAILURES.fetch_add(1, Ordering::Relaxed);
    set_last_error_ts(chrono::Utc::now().timestamp());
}

pub fn inc_jobs_submitted() {
    JOBS_SUBMITTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_runs_started() {
    RUNS_STARTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_status_checks() {
    STATUS_CHECKS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_polls_exhausted() {
    POLLS_EXHAUSTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_mock_fallbacks() {
    MOCK_FALLBACKS.fetch_add(1, Ordering::Relaxed);
}

pub fn set_last_error_ts(ts: i64) {
    LAST_ERROR_TS.store(ts, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        upstream_requests: UPSTREAM_REQUESTS.load(Ordering::Relaxed),
        upstream_failures: UPSTREAM_FAILURES.load(Ordering::Relaxed),
        jobs_submitted: JOBS_SUBMITTED.load(Ordering::Relaxed),
        runs_started: RUNS_STARTED.load(Ordering::Relaxed),
        status_checks: STATUS_CHECKS.load(Ordering::Relaxed),
        polls_exhausted: POLLS_EXHAUSTED.load(Ordering::Relaxed),
        mock_fallbacks: MOCK_FALLBACKS.load(Ordering::Relaxed),
        last_error_ts: LAST_ERROR_TS.load(Ordering::Relaxed),
    }
}
