//! Career posting pipeline for the recruiting platform.
//!
//! The crate covers the submission path end to end: recursive sanitization of
//! inbound payloads, plan-derived posting quotas, the multi-step posting
//! wizard, and assembly of the canonical career record.

pub mod careers;
pub mod config;
pub mod error;
pub mod telemetry;
