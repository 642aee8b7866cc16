//! # リポジトリ実装
//!
//! - [`UserRepository`]: ユーザー（認証情報）の検索と登録
//! - [`TodoRepository`]: Todo の CRUD。すべての操作は所有者 ID でスコープする
//!
//! SQL はすべてパラメータバインドで発行し、文字列連結で組み立てない。

pub mod todo_repository;
pub mod user_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
