//! # Todo API サーバー
//!
//! ## 環境変数
//!
//! `config` モジュールを参照。`.env` ファイルがあれば読み込む。
//! ログ出力は `LOG_FORMAT`（`json` / `pretty`）と `RUST_LOG` で制御する。
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://localhost:5432/todos JWT_SECRET=... cargo run -p todo-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use todo_api::{
    app_builder::{AppDependencies, build_app},
    config::AppConfig,
};
use todo_domain::clock::{Clock, SystemClock};
use todo_infra::{
    Argon2PasswordHasher,
    JwtTokenCodec,
    db,
    repository::{PostgresTodoRepository, PostgresUserRepository},
};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("todo-api"));
    let _tracing_guard = tracing::info_span!("app", service = "todo-api").entered();

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET が未設定のため開発用のデフォルト値を使用します");
    }

    let pool = db::create_pool(&config.database_url, config.statement_timeout)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let deps = AppDependencies::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresTodoRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenCodec::new(&config.jwt_secret, clock.clone())),
        clock,
        pool,
    );
    let app = build_app(deps);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "サーバーが起動しました");

    axum::serve(listener, app).await?;

    Ok(())
}
