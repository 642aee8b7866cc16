//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use todo_domain::{
    password::PasswordHash,
    todo::{Todo, TodoId},
    user::{Email, User, UserId},
};
use todo_infra::repository::{PostgresUserRepository, UserRepository};

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn create_test_user(email: &str) -> User {
    User::new(
        UserId::new(),
        Email::new(email),
        PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$c2FsdA$aGFzaA"),
        test_now(),
    )
}

/// `offset_secs` 秒ずらした作成時刻で Todo を作る
pub fn create_test_todo(owner: &UserId, title: &str, offset_secs: i64) -> Todo {
    Todo::new(
        TodoId::new(),
        owner.clone(),
        title.to_string(),
        format!("{title} の説明"),
        test_now() + Duration::seconds(offset_secs),
    )
}

/// ユーザーを登録して返す（Todo の外部キー用）
pub async fn setup_user(pool: &PgPool, email: &str) -> User {
    let user = create_test_user(email);
    PostgresUserRepository::new(pool.clone())
        .insert(&user)
        .await
        .unwrap();
    user
}
