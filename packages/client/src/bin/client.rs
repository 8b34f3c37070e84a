//! SurveyPro command line client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin surveypro -- survey list
//! ```

use clap::Parser;
use surveypro_client::Cli;
use surveypro_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    if let Err(e) = surveypro_client::run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
