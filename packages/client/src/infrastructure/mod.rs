//! Infrastructure 層
//!
//! HTTP API クライアント、Repository の実装、セッションの保存先。

pub mod api_client;
pub mod dto;
pub mod repository;
pub mod session;

pub use api_client::ApiClient;
