//! Shared utilities for SurveyPro.
//!
//! Logger setup and time helpers used by the client library and binary.

pub mod logger;
pub mod time;
