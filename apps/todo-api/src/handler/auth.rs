//! # 認証ハンドラ
//!
//! - `POST /api/login` - 200 `{token}`
//! - `POST /api/signup` - 201 `{token}`

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::ApiJson, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthHandlerState {
    pub usecase: Arc<dyn AuthUseCase>,
}

/// ログイン / サインアップリクエスト
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email:    String,
    pub password: String,
}

/// トークンレスポンス
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AuthHandlerState>>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.usecase.login(&req.email, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/signup
pub async fn signup(
    State(state): State<Arc<AuthHandlerState>>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.usecase.signup(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
