//! Data transfer objects for the SurveyPro HTTP API.

pub mod http;
