pub mod audits;
pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod telemetry;
