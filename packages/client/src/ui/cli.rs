//! Command line definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use surveypro_shared::time::parse_date;

use crate::domain::ExportFormat;

/// SurveyPro command line client
#[derive(Debug, Parser)]
#[command(name = "surveypro", version, about, long_about = None)]
pub struct Cli {
    /// API base URL (overrides `api.base_url`)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Use this bearer token for the run instead of the stored session
    #[arg(long, global = true, env = "SURVEYPRO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in, sign out, show the current user
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Create and manage your surveys
    #[command(subcommand)]
    Survey(SurveyCommand),

    /// Answer a published survey
    Take(TakeArgs),

    /// Export survey responses and wait for the file
    Export(ExportArgs),

    /// Show the status of an export job once
    ExportStatus {
        job_id: String,
    },

    /// Collaboration rooms
    #[command(subcommand)]
    Room(RoomCommand),

    /// Admin listings
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Open the Google sign-in page and store the issued token
    Login,
    /// Forget the stored token and user
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Debug, Subcommand)]
pub enum SurveyCommand {
    /// Create a survey from a JSON or TOML definition file
    Create {
        file: PathBuf,
    },
    List,
    Show {
        id: String,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// JSON or TOML file with the survey settings
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    Clone {
        id: String,
    },
    Archive {
        id: String,
    },
    Delete {
        id: String,
    },
    /// Publish and print the share token
    Publish {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct TakeArgs {
    pub share_token: String,

    /// Answers file (JSON or TOML) instead of interactive prompts
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Respondent email, for surveys that collect it
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    pub form_id: String,

    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,

    /// First submission date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Last submission date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Directory to save the file in (overrides `export.download_dir`)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Start the job and print its id without waiting
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    List,
    Show {
        id: String,
    },
    Create {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        public: bool,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        public: Option<bool>,
        #[arg(long)]
        locked: Option<bool>,
    },
    Delete {
        id: String,
    },
    AddMember {
        id: String,
        email: String,
    },
    RemoveMember {
        id: String,
        user_id: String,
    },
    /// Issue a new share link; the old one stops working
    ShareLink {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    Users {
        /// Flip the active flag of these users in the listing (local only)
        #[arg(long)]
        toggle: Vec<String>,
    },
    Surveys {
        /// Flip these surveys between active and archived in the listing (local only)
        #[arg(long)]
        toggle: Vec<String>,
    },
}
