//! # 認証ユースケース
//!
//! ## タイミング攻撃対策
//!
//! ログイン時にメールアドレスが未登録でも、ダミーハッシュで Argon2id の検証を
//! 実行する。登録済みで不一致の場合と処理時間が揃い、メッセージも同一になる。
//!
//! ## ハッシュ処理の実行スレッド
//!
//! Argon2id（m=64MiB）のハッシュ化と検証は `spawn_blocking` で実行し、
//! 非同期ワーカーを占有しない。

use std::sync::Arc;

use async_trait::async_trait;
use todo_domain::{
    clock::Clock,
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::{Email, User, UserId},
};
use todo_infra::{PasswordHasher, TokenCodec, repository::UserRepository};

use super::AuthUseCase;
use crate::error::ApiError;

/// 未登録ユーザー用のダミーハッシュ（Argon2id, m=65536, t=1, p=1）
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_codec:     Arc<dyn TokenCodec>,
    clock:           Arc<dyn Clock>,
}

impl AuthUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_codec,
            clock,
        }
    }

    async fn hash_password(&self, password: PlainPassword) -> Result<PasswordHash, ApiError> {
        let hasher = self.password_hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ApiError::Internal(format!("パスワードのハッシュ化が中断されました: {e}")))??;
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult, ApiError> {
        let hasher = self.password_hasher.clone();
        let result = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ApiError::Internal(format!("パスワードの検証が中断されました: {e}")))??;
        Ok(result)
    }

    /// 処理時間を揃えるためだけの検証（結果は捨てる）
    async fn dummy_verification(&self, password: PlainPassword) {
        let _ = self
            .verify_password(password, PasswordHash::new(DUMMY_HASH))
            .await;
    }

    fn issue_token(&self, user_id: &UserId) -> Result<String, ApiError> {
        Ok(self.token_codec.issue(user_id)?)
    }
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let email = Email::new(email);
        let password = PlainPassword::new(password);

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            self.dummy_verification(password).await;
            tracing::info!("ログイン失敗: 未登録のメールアドレス");
            return Err(ApiError::InvalidCredentials);
        };

        let result = self
            .verify_password(password, user.password_hash().clone())
            .await?;
        if !result.is_match() {
            tracing::info!(user_id = %user.id(), "ログイン失敗: パスワード不一致");
            return Err(ApiError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id(), "ログイン成功");
        self.issue_token(user.id())
    }

    async fn signup(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let email = Email::new(email);

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        let password_hash = self.hash_password(PlainPassword::new(password)).await?;
        let user = User::new(UserId::new(), email, password_hash, self.clock.now());

        // 事前チェック後の同時登録は一意制約で検出される
        match self.user_repository.insert(&user).await {
            Ok(()) => {}
            Err(e) if e.as_conflict().is_some() => return Err(ApiError::EmailTaken),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id(), "ユーザーを登録しました");
        self.issue_token(user.id())
    }
}
