//! # ユースケース層
//!
//! - [`AuthUseCase`]: サインアップとログイン（トークン発行）
//! - [`TodoUseCase`]: 認証済みユーザーの Todo 操作
//!
//! ハンドラはトレイト経由で呼び出し、テストではスタブに差し替える。
//! 具体的な実装は [`AuthUseCaseImpl`] / [`TodoUseCaseImpl`]。

pub mod auth;
pub mod todo;

use async_trait::async_trait;
pub use auth::AuthUseCaseImpl;
pub use todo::TodoUseCaseImpl;
use todo_domain::{todo::Todo, user::UserId};

use crate::error::ApiError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// メールアドレスとパスワードを検証し、トークンを発行する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(String)`: 発行したトークン
    /// - `Err(ApiError::InvalidCredentials)`: 未登録のメールアドレス、またはパスワード不一致
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// ユーザーを登録し、新しいユーザーのトークンを発行する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(String)`: 発行したトークン
    /// - `Err(ApiError::EmailTaken)`: メールアドレスが登録済み
    async fn signup(&self, email: &str, password: &str) -> Result<String, ApiError>;
}

/// Todo ユースケーストレイト
///
/// すべての操作は `user_id`（認証済みユーザー）の Todo に限定される。
/// `id` はパスパラメータの文字列をそのまま受け取る。
#[async_trait]
pub trait TodoUseCase: Send + Sync {
    async fn create(
        &self,
        user_id: &UserId,
        title: String,
        description: String,
    ) -> Result<Todo, ApiError>;

    /// 作成日時順の一覧
    async fn list(&self, user_id: &UserId) -> Result<Vec<Todo>, ApiError>;

    /// 存在しない・他ユーザー所有・ID 形式不正はすべて `NotFound`
    async fn get(&self, user_id: &UserId, id: &str) -> Result<Todo, ApiError>;

    /// 該当がなくても成功を返す
    async fn update(
        &self,
        user_id: &UserId,
        id: &str,
        title: String,
        description: String,
    ) -> Result<(), ApiError>;

    /// 該当がなくても成功を返す
    async fn delete(&self, user_id: &UserId, id: &str) -> Result<(), ApiError>;
}
