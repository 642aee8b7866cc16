//! # エラーレスポンス
//!
//! クライアントに返すエラーボディと、成功時の確認メッセージを定義する。
//!
//! ## 形式
//!
//! ```json
//! { "message": "Todo not found" }
//! ```
//!
//! 機械可読なエラーコードは公開せず、短い人間可読メッセージのみを返す。
//! ステータスコードの決定は API サーバー側の責務。

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべての失敗レスポンスはこの形式で返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 401 Unauthorized
    pub fn unauthorized() -> Self {
        Self::new("Unauthorized")
    }

    /// 500 Internal Server Error
    ///
    /// message は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// 確認メッセージレスポンス
///
/// 更新・削除のように返すべきリソースがない操作の成功時に使用する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
