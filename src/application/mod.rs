// Application layer - use cases over the domain
pub mod chart_assembler;
pub mod chart_service;
pub mod leaderboard_service;
pub mod metrics_repository;
pub mod ranking;
