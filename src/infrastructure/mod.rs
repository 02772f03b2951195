// Infrastructure layer - External dependencies and adapters
pub mod chart_payload;
pub mod config;
pub mod http_repository;
