//! Data models for reports and configuration.

pub mod config;
pub mod report;
