//! # Todo ハンドラ
//!
//! すべて認証ゲートの内側で動き、`Extension<AuthenticatedUser>` で
//! 呼び出し元ユーザーを受け取る。
//!
//! - `POST /api/todos` - 201 Todo
//! - `GET /api/todos` - 200 Todo の配列
//! - `GET /api/todos/{id}` - 200 Todo / 404
//! - `PUT /api/todos/{id}` - 200 `{"message": "Todo updated"}`
//! - `DELETE /api/todos/{id}` - 200 `{"message": "Todo deleted"}`

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_domain::todo::Todo;
use todo_shared::MessageResponse;
use uuid::Uuid;

use crate::{
    error::ApiError,
    extract::ApiJson,
    middleware::AuthenticatedUser,
    usecase::TodoUseCase,
};

pub const TODO_UPDATED_MESSAGE: &str = "Todo updated";
pub const TODO_DELETED_MESSAGE: &str = "Todo deleted";

/// Todo ハンドラの共有状態
pub struct TodoState {
    pub usecase: Arc<dyn TodoUseCase>,
}

/// 作成 / 更新リクエスト
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub title:       String,
    pub description: String,
}

/// Todo レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id:          Uuid,
    pub user_id:     Uuid,
    pub title:       String,
    pub description: String,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id:          *todo.id().as_uuid(),
            user_id:     *todo.user_id().as_uuid(),
            created_at:  todo.created_at(),
            updated_at:  todo.updated_at(),
            title:       todo.title().to_string(),
            description: todo.description().to_string(),
        }
    }
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<TodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state
        .usecase
        .create(&user.user_id, req.title, req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// GET /api/todos
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.usecase.list(&user.user_id).await?;
    let body: Vec<TodoResponse> = todos.into_iter().map(TodoResponse::from).collect();
    Ok(Json(body))
}

/// GET /api/todos/{id}
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = state.usecase.get(&user.user_id, &id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

/// PUT /api/todos/{id}
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .update(&user.user_id, &id, req.title, req.description)
        .await?;
    Ok(Json(MessageResponse::new(TODO_UPDATED_MESSAGE)))
}

/// DELETE /api/todos/{id}
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.usecase.delete(&user.user_id, &id).await?;
    Ok(Json(MessageResponse::new(TODO_DELETED_MESSAGE)))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use todo_domain::{todo::TodoId, user::UserId};
    use todo_infra::InfraError;
    use tower::ServiceExt;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    /// 呼び出しを記録し、`todo` を返すスタブ
    struct StubTodoUseCase {
        todo:  Option<Todo>,
        fail:  bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubTodoUseCase {
        fn returning(todo: Option<Todo>) -> Self {
            Self {
                todo,
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                todo:  None,
                fail:  true,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                return Err(InfraError::from(sqlx::Error::PoolTimedOut).into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TodoUseCase for StubTodoUseCase {
        async fn create(
            &self,
            user_id: &UserId,
            title: String,
            description: String,
        ) -> Result<Todo, ApiError> {
            self.record(format!("create:{title}"))?;
            Ok(Todo::new(
                TodoId::new(),
                user_id.clone(),
                title,
                description,
                fixed_time(),
            ))
        }

        async fn list(&self, _user_id: &UserId) -> Result<Vec<Todo>, ApiError> {
            self.record("list".to_string())?;
            Ok(self.todo.clone().into_iter().collect())
        }

        async fn get(&self, _user_id: &UserId, id: &str) -> Result<Todo, ApiError> {
            self.record(format!("get:{id}"))?;
            self.todo.clone().ok_or_else(ApiError::todo_not_found)
        }

        async fn update(
            &self,
            _user_id: &UserId,
            id: &str,
            title: String,
            _description: String,
        ) -> Result<(), ApiError> {
            self.record(format!("update:{id}:{title}"))
        }

        async fn delete(&self, _user_id: &UserId, id: &str) -> Result<(), ApiError> {
            self.record(format!("delete:{id}"))
        }
    }

    /// 認証ゲートの代わりに固定ユーザーを extensions に入れる
    fn create_test_app(usecase: Arc<StubTodoUseCase>, user_id: UserId) -> Router {
        let state = Arc::new(TodoState { usecase });
        Router::new()
            .route("/api/todos", get(list_todos).post(create_todo))
            .route(
                "/api/todos/{id}",
                get(get_todo).put(update_todo).delete(delete_todo),
            )
            .with_state(state)
            .layer(Extension(AuthenticatedUser { user_id }))
    }

    fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn into_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_todo_201でcamel_caseのtodoを返す() {
        // Given
        let user_id = UserId::new();
        let sut = create_test_app(Arc::new(StubTodoUseCase::returning(None)), user_id.clone());

        // When
        let response = sut
            .oneshot(request(
                Method::POST,
                "/api/todos",
                Some(serde_json::json!({ "title": "buy milk", "description": "2%" })),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = into_json(response).await;
        assert_eq!(json["title"], "buy milk");
        assert_eq!(json["description"], "2%");
        assert_eq!(json["userId"], user_id.to_string());
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert_eq!(json["updatedAt"], "2023-11-14T22:13:20Z");
        assert!(json["id"].is_string());
    }

    #[tokio::test]
    async fn test_list_todos_配列を返す() {
        let user_id = UserId::new();
        let todo = Todo::new(
            TodoId::new(),
            user_id.clone(),
            "t".to_string(),
            "d".to_string(),
            fixed_time(),
        );
        let sut = create_test_app(
            Arc::new(StubTodoUseCase::returning(Some(todo.clone()))),
            user_id,
        );

        let response = sut
            .oneshot(request(Method::GET, "/api/todos", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = into_json(response).await;
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["id"], todo.id().to_string());
    }

    #[tokio::test]
    async fn test_get_todo_見つからない場合は404() {
        let sut = create_test_app(Arc::new(StubTodoUseCase::returning(None)), UserId::new());

        let response = sut
            .oneshot(request(Method::GET, "/api/todos/7", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            into_json(response).await,
            serde_json::json!({ "message": "Todo not found" })
        );
    }

    #[tokio::test]
    async fn test_update_todo_確認メッセージを返す() {
        // Given
        let usecase = Arc::new(StubTodoUseCase::returning(None));
        let sut = create_test_app(usecase.clone(), UserId::new());

        // When
        let response = sut
            .oneshot(request(
                Method::PUT,
                "/api/todos/abc",
                Some(serde_json::json!({ "title": "t2", "description": "d2" })),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            into_json(response).await,
            serde_json::json!({ "message": "Todo updated" })
        );
        assert_eq!(*usecase.calls.lock().unwrap(), vec!["update:abc:t2"]);
    }

    #[tokio::test]
    async fn test_delete_todo_確認メッセージを返す() {
        let usecase = Arc::new(StubTodoUseCase::returning(None));
        let sut = create_test_app(usecase.clone(), UserId::new());

        let response = sut
            .oneshot(request(Method::DELETE, "/api/todos/abc", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            into_json(response).await,
            serde_json::json!({ "message": "Todo deleted" })
        );
        assert_eq!(*usecase.calls.lock().unwrap(), vec!["delete:abc"]);
    }

    #[tokio::test]
    async fn test_壊れたjsonボディは400でユースケースを呼ばない() {
        // Given
        let usecase = Arc::new(StubTodoUseCase::returning(None));
        let sut = create_test_app(usecase.clone(), UserId::new());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/todos")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title": "t""#))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(into_json(response).await["message"].is_string());
        assert!(usecase.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ストアの失敗は500() {
        let sut = create_test_app(Arc::new(StubTodoUseCase::failing()), UserId::new());

        let response = sut
            .oneshot(request(Method::GET, "/api/todos", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            into_json(response).await,
            serde_json::json!({ "message": "Internal server error" })
        );
    }
}
