//! # 認証ゲート
//!
//! `Authorization: Bearer <token>` を検証し、認証済みユーザーをリクエストの
//! extensions に格納するミドルウェア。
//!
//! 保護するルートごとに明示的に適用する:
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/api/todos", get(list_todos))
//!     .route_layer(from_fn_with_state(auth_state, require_auth))
//! ```
//!
//! ヘッダーがない、スキームが Bearer でない、トークンが空、検証に失敗した、
//! のいずれの場合も 401 を返し、ハンドラは実行されない。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use todo_domain::user::UserId;
use todo_infra::TokenCodec;

use crate::error::ApiError;

/// 認証ゲートの状態
#[derive(Clone)]
pub struct AuthState {
    pub token_codec: Arc<dyn TokenCodec>,
}

/// 認証済みユーザー
///
/// ハンドラは `Extension<AuthenticatedUser>` で受け取る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Authorization ヘッダー値からベアラートークンを取り出す
///
/// スキームは大文字小文字を区別しない。
fn extract_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 認証ゲートミドルウェア
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer);

    let Some(token) = token else {
        tracing::debug!("ベアラートークンがありません");
        return ApiError::Unauthorized.into_response();
    };

    let user_id = match state.token_codec.verify(token) {
        Ok(user_id) => user_id,
        Err(_) => return ApiError::Unauthorized.into_response(),
    };

    tracing::Span::current().record("user_id", tracing::field::display(&user_id));
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    next.run(request).await
}
