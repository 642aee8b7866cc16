//! # Todo API
//!
//! サインアップ / ログインと、ユーザーごとの Todo 管理を提供する HTTP API。
//!
//! ## リクエストの流れ
//!
//! ```text
//! request → (保護ルートのみ) 認証ゲート → handler → usecase → repository → JSON
//! ```
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーターとミドルウェアの組み立て
//! - `config`: 環境変数からの設定読み込み
//! - `error`: API エラーと HTTP レスポンスへの変換
//! - `extract`: `{message}` 形式で失敗する JSON 抽出
//! - `handler`: HTTP ハンドラ
//! - `middleware`: 認証ゲート
//! - `usecase`: ビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod usecase;
