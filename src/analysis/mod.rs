pub mod role_filter;
pub mod scoring;
