//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成、マイグレーションの適用、疎通確認を行う。
//!
//! ## 設定値
//!
//! - `max_connections(10)`: 最大接続数
//! - `acquire_timeout(5秒)`: プールからの接続取得タイムアウト
//! - `statement_timeout`: 接続ごとに PostgreSQL のセッション変数として設定する。
//!   応答しないクエリはこの時間で打ち切られ、リクエストは 500 になる
//!
//! ```rust,ignore
//! use std::time::Duration;
//!
//! let pool = todo_infra::db::create_pool(
//!     "postgres://localhost:5432/todos",
//!     Duration::from_secs(5),
//! )
//! .await?;
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const POSTGRES_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// 接続オプションを組み立てる
///
/// `statement_timeout` はミリ秒単位で接続開始時に渡す。
/// スキームが `postgres://` / `postgresql://` 以外の URL は設定エラーになる。
pub fn connect_options(
    database_url: &str,
    statement_timeout: Duration,
) -> Result<PgConnectOptions, sqlx::Error> {
    if !POSTGRES_SCHEMES
        .iter()
        .any(|scheme| database_url.starts_with(scheme))
    {
        return Err(sqlx::Error::Configuration(
            "DATABASE_URL は postgres:// または postgresql:// で始まる必要があります".into(),
        ));
    }
    let timeout = format!("{}ms", statement_timeout.as_millis());
    Ok(PgConnectOptions::from_str(database_url)?.options([("statement_timeout", timeout)]))
}

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、リポジトリ間で共有する。
pub async fn create_pool(
    database_url: &str,
    statement_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(database_url, statement_timeout)?;
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}

/// マイグレーションを適用する
///
/// 適用済みのものはスキップされる。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// データベースへの疎通を確認する（`SELECT 1`）
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
