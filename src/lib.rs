// Growth metrics engine - alignment, view transforms, selection and ranking
pub mod application;
pub mod domain;
pub mod infrastructure;
