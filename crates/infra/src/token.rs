//! # ベアラートークン
//!
//! ユーザー ID を署名付き・期限付きの JWT（HS256）にエンコードし、
//! 提示されたトークンを検証する。サーバー側にセッションは持たない。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `sub` | ユーザー ID（UUID 文字列） |
//! | `iat` | 発行時刻（UNIX 秒） |
//! | `exp` | 有効期限 = `iat` + 3600 |
//! | `jti` | トークンごとに新しい UUID |
//!
//! 検証失敗の理由（形式不正・署名不一致・期限切れ）は呼び出し元に区別させず、
//! すべて [`InvalidToken`] にまとめる。期限判定は注入された [`Clock`] の時刻で
//! 行い、猶予（leeway）は設けない。

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_domain::{clock::Clock, user::UserId};
use uuid::Uuid;

use crate::error::InfraError;

/// トークンの有効期間
pub const TOKEN_TTL: Duration = Duration::hours(1);

/// トークン検証失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("トークンが無効です")]
pub struct InvalidToken;

/// トークンの発行と検証を担当するトレイト
pub trait TokenCodec: Send + Sync {
    /// ユーザー ID を埋め込んだトークンを発行する
    ///
    /// 呼び出すたびに異なるトークンを返す。
    fn issue(&self, user_id: &UserId) -> Result<String, InfraError>;

    /// トークンを検証し、埋め込まれたユーザー ID を返す
    fn verify(&self, token: &str) -> Result<UserId, InvalidToken>;
}

/// JWT のクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// HS256 JWT 実装
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
    clock:        Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 期限は Clock で判定する
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: &UserId) -> Result<String, InfraError> {
        let issued_at = self.clock.now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + TOKEN_TTL).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| InfraError::unexpected(format!("トークンの署名に失敗: {e}")))
    }

    fn verify(&self, token: &str) -> Result<UserId, InvalidToken> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "トークンの検証に失敗");
            InvalidToken
        })?;

        let claims = data.claims;
        if self.clock.now().timestamp() >= claims.exp {
            tracing::debug!(exp = claims.exp, "トークンの有効期限切れ");
            return Err(InvalidToken);
        }

        UserId::parse_str(&claims.sub).map_err(|_| InvalidToken)
    }
}
