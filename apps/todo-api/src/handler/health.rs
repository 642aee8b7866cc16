//! # ヘルスチェックハンドラ
//!
//! - `GET /health` - プロセスの稼働確認（常に 200）
//! - `GET /health/ready` - DB 疎通確認（`SELECT 1`）。失敗時は 503

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use todo_infra::db;
use todo_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Readiness Check 用の状態
pub struct ReadinessState {
    pub pool: PgPool,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// GET /health/ready
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(&state.pool).await;

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);
    let response = ReadinessResponse::from_checks(checks);

    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };
    (http_status, Json(response))
}

/// DB への疎通を確認する（タイムアウト: 5 秒）
async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(READINESS_TIMEOUT, db::ping(pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness Check: データベースに接続できません");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("Readiness Check: データベースの応答がタイムアウトしました");
            CheckStatus::Error
        }
    }
}
