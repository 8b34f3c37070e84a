//! SurveyPro client library.
//!
//! Survey authoring, public survey taking, export jobs, rooms and admin
//! listings over the SurveyPro HTTP API, plus the `surveypro` command line.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ClientConfig;
pub use ui::{Cli, CliError, run};
