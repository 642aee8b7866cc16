//! # Todo API 共有ユーティリティ
//!
//! ドメイン層・インフラ層・API サーバーのすべてから参照される共通型を提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は API サーバーの責務）
//! - tower / tracing-subscriber への依存は `observability` feature の背後に置く

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, MessageResponse};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
