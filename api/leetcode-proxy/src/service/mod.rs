pub mod gateway_service;
pub mod header_service;
pub mod metrics_service;
pub mod mock_service;
pub mod normalize_service;
pub mod polling_service;
pub mod submission_service;
pub mod validation_service;
