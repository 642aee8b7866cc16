//! # サーバー設定
//!
//! 環境変数から設定を読み込む。起動時に一度だけ構築し、接続プールと
//! トークン署名に渡す。ハンドラは環境変数を直接読まない。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `APP_HOST` | `0.0.0.0` | バインドアドレス |
//! | `APP_PORT` | `3000` | ポート番号 |
//! | `DATABASE_URL` | `postgres://localhost:5432/todos` | PostgreSQL 接続 URL |
//! | `JWT_SECRET` | `secret` | トークン署名鍵（デフォルト値は開発用） |
//! | `DB_STATEMENT_TIMEOUT_SECS` | `5` | SQL 文のタイムアウト（秒、1 以上） |

use std::{env, num::NonZeroU64, time::Duration};

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/todos";
pub const DEFAULT_JWT_SECRET: &str = "secret";
pub const DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 5;

/// 設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} の値が不正です: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:              String,
    /// ポート番号
    pub port:              u16,
    /// データベース接続 URL
    pub database_url:      String,
    /// トークン署名鍵
    pub jwt_secret:        String,
    /// SQL 文のタイムアウト
    pub statement_timeout: Duration,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 値が空文字列の変数は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match get("APP_PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                name:  "APP_PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };
        // PostgreSQL では statement_timeout = 0 がタイムアウトなしを意味する
        let timeout_secs = match get("DB_STATEMENT_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<NonZeroU64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name:  "DB_STATEMENT_TIMEOUT_SECS",
                    value: v,
                })?
                .get(),
            None => DEFAULT_STATEMENT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: get("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            statement_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 署名鍵が開発用のデフォルト値のままかどうか
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
