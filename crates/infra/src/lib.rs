//! # Todo インフラ層
//!
//! 外部システム（PostgreSQL）との接続と、署名・ハッシュなどの
//! 暗号処理を担当する。
//!
//! ## 依存関係
//!
//! ```text
//! todo-api → todo-infra → todo-domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - Argon2id によるパスワードハッシュ
//! - [`repository`] - ユーザー / Todo リポジトリ
//! - [`token`] - JWT によるベアラートークンの発行と検証
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::{db, repository::PostgresTodoRepository};
//!
//! let pool = db::create_pool("postgres://localhost/todos", Duration::from_secs(5)).await?;
//! db::run_migrations(&pool).await?;
//! let todos = PostgresTodoRepository::new(pool.clone());
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
pub use token::{InvalidToken, JwtTokenCodec, TokenCodec};
