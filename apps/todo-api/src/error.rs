//! # API エラー定義
//!
//! ハンドラ境界で発生するエラーと、HTTP レスポンスへの変換を定義する。
//! レスポンスボディは常に `{"message": "..."}`。
//!
//! | エラー | ステータス | message |
//! |-------|-----------|---------|
//! | `Unauthorized` | 401 | `Unauthorized` |
//! | `InvalidCredentials` | 401 | `Incorrect email or password` |
//! | `BadRequest` | 400 | 引数の文字列（JSON ボディの不備） |
//! | `EmailTaken` | 400 | `Email address already taken` |
//! | `NotFound` | 404 | 引数の文字列 |
//! | `Database` / `Internal` | 500 | `Internal server error` |
//!
//! 500 系の原因はログにのみ出力し、レスポンスには含めない。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";
pub const EMAIL_TAKEN_MESSAGE: &str = "Email address already taken";
pub const TODO_NOT_FOUND_MESSAGE: &str = "Todo not found";

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// トークンがない、または無効
    #[error("認証されていません")]
    Unauthorized,

    /// メールアドレスまたはパスワードの不一致
    #[error("メールアドレスまたはパスワードが正しくありません")]
    InvalidCredentials,

    /// リクエストボディを JSON として読めない
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// メールアドレスが登録済み
    #[error("メールアドレスは登録済みです")]
    EmailTaken,

    /// リソースが存在しない、または所有者が異なる
    #[error("見つかりません: {0}")]
    NotFound(String),

    /// ストア（DB）またはインフラ処理の失敗
    #[error("インフラエラー: {0}")]
    Database(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn todo_not_found() -> Self {
        Self::NotFound(TODO_NOT_FOUND_MESSAGE.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorResponse::unauthorized()),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(INVALID_CREDENTIALS_MESSAGE),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            ApiError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(EMAIL_TAKEN_MESSAGE),
            ),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorResponse::new(message)),
            ApiError::Database(e) => {
                tracing::error!(
                    error.kind = "infra",
                    error.message = %e,
                    span_trace = %e.span_trace(),
                    "インフラエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error.kind = "internal", error.message = %msg, "内部エラー");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
