// Domain layer - pure types and transforms, no I/O
pub mod aligned;
pub mod alignment;
pub mod chart;
pub mod dao;
pub mod platform;
pub mod selection;
pub mod snapshot;
pub mod tile;
pub mod view;
