//! # HTTP リクエストハンドラ
//!
//! ハンドラは薄く保ち、ロジックはユースケースに委譲する。
//!
//! - `auth`: サインアップ / ログイン
//! - `todo`: Todo の CRUD（認証ゲートの内側）
//! - `health`: ヘルスチェック

pub mod auth;
pub mod health;
pub mod todo;

pub use auth::{AuthHandlerState, login, signup};
pub use health::{ReadinessState, health_check, readiness_check};
pub use todo::{TodoState, create_todo, delete_todo, get_todo, list_todos, update_todo};
