//! Reconciles Seattle short-term-rental unit licenses with the business
//! licenses (tax certificates) that hold them and writes a combined report.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sources;
pub mod telemetry;
pub mod workflows;
