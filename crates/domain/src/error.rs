//! # ドメイン層エラー定義
//!
//! ドメイン固有の例外状態を表現するエラー型。
//!
//! パスパラメータの ID が UUID として解釈できない場合は `Validation` になる。
//! API 層はこれを存在しない ID と同じく 404 として扱う。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がドメインの形式に合わない場合に使用する（例: UUID でない ID）。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
