//! Data models: service response, normalized record, and configuration.

pub mod config;
pub mod record;
pub mod response;
