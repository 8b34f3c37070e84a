//! UI 層
//!
//! コマンドライン引数の解析、端末での入力、結果の表示を担当します。

pub mod cli;
pub mod error;
mod input;
mod prompt;
mod render;
mod runner;
mod signal;

pub use cli::Cli;
pub use error::CliError;
pub use runner::run;
