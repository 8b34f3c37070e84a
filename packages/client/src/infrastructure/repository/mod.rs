//! Repository 実装
//!
//! ドメイン層が定義する Repository trait の具体的な実装。

pub mod http;
