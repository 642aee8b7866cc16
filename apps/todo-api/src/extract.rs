//! # リクエスト抽出
//!
//! axum の `Json` は失敗時にプレーンテキストを返すため、
//! [`ApiJson`] で包んで `{"message": "..."}` 形式の 400 に揃える。

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON リクエストボディ
///
/// Content-Type の不一致、構文エラー、フィールドの欠落や型違いは
/// すべて [`ApiError::BadRequest`] になる。
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, StatusCode},
        routing::post,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    async fn echo(ApiJson(payload): ApiJson<Payload>) -> String {
        payload.name
    }

    fn create_test_app() -> Router {
        Router::new().route("/echo", post(echo))
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> axum::response::Response {
        let mut builder = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/echo");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        create_test_app()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_正しいjsonはそのまま取り出せる() {
        let response = send(Some("application/json"), r#"{"name":"milk"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"milk");
    }

    #[rstest]
    #[case::フィールド欠落(Some("application/json"), "{}")]
    #[case::構文エラー(Some("application/json"), "{")]
    #[case::型違い(Some("application/json"), r#"{"name":1}"#)]
    #[case::content_typeなし(None, r#"{"name":"milk"}"#)]
    #[tokio::test]
    async fn test_読めないボディはmessage付きの400(
        #[case] content_type: Option<&str>,
        #[case] body: &'static str,
    ) {
        // When
        let response = send(content_type, body).await;

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["message"].as_str().unwrap();
        assert!(!message.is_empty());
        assert_eq!(json.as_object().map(|o| o.len()), Some(1));
    }
}
