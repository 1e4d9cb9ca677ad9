pub mod auth;
pub mod observability;
pub mod persistence;
pub mod text_processing;
