use crate::config::environment::AppConfig;
use crate::config::upstream::UpstreamConfig;
use crate::infra::InfraClients;
use crate::module::leetcode::controller::SUBMISSION_ID_HEADER;
use crate::module::leetcode::route::register_routes;
use crate::service::gateway_service::LeetCodeGateway;
use crate::service::header_service::CSRF_HEADER;
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub upstream: Arc<UpstreamConfig>,
    pub gateway: Arc<LeetCodeGateway>,
}

impl AppState {
    pub fn new(config: AppConfig, infra: InfraClients) -> Self {
        let upstream = UpstreamConfig::from_app(&config);
        let gateway = LeetCodeGateway::new(infra.http, &upstream);
        Self {
            config,
            upstream: Arc::new(upstream),
            gateway: Arc::new(gateway),
        }
    }
}

fn allowed_origins(config: &AppConfig) -> AllowOrigin {
    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return AllowOrigin::from(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid cors origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(CSRF_HEADER),
        ])
        .expose_headers([HeaderName::from_static(SUBMISSION_ID_HEADER)]);

    register_routes(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
