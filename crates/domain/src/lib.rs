//! # Todo ドメイン層
//!
//! ユーザーと Todo のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-api → todo-infra → todo-domain
//! ```
//!
//! ドメイン層は DB や HTTP に一切依存しない。永続化やトークン署名は
//! インフラ層が担い、このクレートの型を受け渡しに使う。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ（テストで固定時刻を注入する）
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - 平文パスワードとパスワードハッシュ
//! - [`todo`] - Todo エンティティ
//! - [`user`] - ユーザーエンティティ
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::{
//!     DomainError,
//!     todo::{Todo, TodoId},
//!     user::UserId,
//! };
//!
//! let owner = UserId::new();
//! let todo = Todo::new(
//!     TodoId::new(),
//!     owner.clone(),
//!     "buy milk".to_string(),
//!     "2%".to_string(),
//!     chrono::Utc::now(),
//! );
//! assert!(todo.is_owned_by(&owner));
//!
//! let parsed = TodoId::parse_str(&todo.id().to_string()).unwrap();
//! assert_eq!(&parsed, todo.id());
//! assert!(matches!(TodoId::parse_str("7"), Err(DomainError::Validation(_))));
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod password;
pub mod todo;
pub mod user;

pub use error::DomainError;
