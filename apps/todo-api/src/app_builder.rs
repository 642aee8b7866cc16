//! # ルーター構築
//!
//! 依存コンポーネントを受け取り、ルーティングとミドルウェアを組み立てる。
//! `main` と結合テストの両方から使う。
//!
//! ## レイヤー構成（外側から）
//!
//! 1. `SetRequestIdLayer`: UUID v7 の Request ID を付与（クライアント提供値を優先）
//! 2. `TraceLayer`: request_id を含むリクエストスパンを開始
//! 3. `CanonicalLogLineLayer`: リクエスト完了時に 1 行サマリを出力
//! 4. `PropagateRequestIdLayer`: レスポンスに `X-Request-Id` をコピー
//! 5. `CorsLayer`: 全オリジン許可、`Content-Type` / `Authorization` ヘッダー許可
//!
//! 認証ゲートは `/api/todos` 配下のルートにのみ適用する。

use std::sync::Arc;

use axum::{
    Router,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    middleware::from_fn_with_state,
    routing::{get, post},
};
use sqlx::PgPool;
use todo_domain::clock::Clock;
use todo_infra::{
    PasswordHasher,
    TokenCodec,
    repository::{TodoRepository, UserRepository},
};
use todo_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        AuthHandlerState,
        ReadinessState,
        TodoState,
        create_todo,
        delete_todo,
        get_todo,
        health_check,
        list_todos,
        login,
        readiness_check,
        signup,
        update_todo,
    },
    middleware::{AuthState, require_auth},
    usecase::{AuthUseCase, AuthUseCaseImpl, TodoUseCase, TodoUseCaseImpl},
};

/// ルーターが必要とする依存コンポーネント
pub struct AppDependencies {
    pub auth_usecase: Arc<dyn AuthUseCase>,
    pub todo_usecase: Arc<dyn TodoUseCase>,
    pub token_codec:  Arc<dyn TokenCodec>,
    pub pool:         PgPool,
}

impl AppDependencies {
    /// リポジトリ等からユースケースを組み立てる
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        todo_repository: Arc<dyn TodoRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        pool: PgPool,
    ) -> Self {
        let auth_usecase = AuthUseCaseImpl::new(
            user_repository,
            password_hasher,
            token_codec.clone(),
            clock.clone(),
        );
        let todo_usecase = TodoUseCaseImpl::new(todo_repository, clock);

        Self {
            auth_usecase: Arc::new(auth_usecase),
            todo_usecase: Arc::new(todo_usecase),
            token_codec,
            pool,
        }
    }
}

/// CORS 設定
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// アプリケーションのルーターを構築する
pub fn build_app(deps: AppDependencies) -> Router {
    let readiness_state = Arc::new(ReadinessState { pool: deps.pool });
    let auth_handler_state = Arc::new(AuthHandlerState {
        usecase: deps.auth_usecase,
    });
    let todo_state = Arc::new(TodoState {
        usecase: deps.todo_usecase,
    });
    let auth_state = AuthState {
        token_codec: deps.token_codec,
    };

    let todo_routes = Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route_layer(from_fn_with_state(auth_state, require_auth))
        .with_state(todo_state);

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/login", post(login))
        .route("/api/signup", post(signup))
        .with_state(auth_handler_state)
        .merge(todo_routes)
        .layer(cors_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
