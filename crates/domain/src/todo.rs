//! # Todo
//!
//! ユーザーが所有する Todo エンティティ。
//!
//! ## 不変条件
//!
//! - `user_id` は既存ユーザーを参照する（DB の外部キーで保証）
//! - `created_at <= updated_at`
//! - 更新で変わるのは `title` / `description` / `updated_at` のみ

use chrono::{DateTime, Utc};

use crate::user::UserId;

define_uuid_id! {
    /// Todo ID（UUID v7）
    pub struct TodoId;
}

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:          TodoId,
    user_id:     UserId,
    title:       String,
    description: String,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Todo {
    /// 新規 Todo を作成する
    ///
    /// 作成時刻と更新時刻は同じ値になる。
    pub fn new(
        id: TodoId,
        user_id: UserId,
        title: String,
        description: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// DB の行から復元する
    pub fn from_db(
        id: TodoId,
        user_id: UserId,
        title: String,
        description: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            description,
            created_at,
            updated_at,
        }
    }

    /// タイトルと説明を差し替えた Todo を返す
    ///
    /// 時計が作成時刻より過去を返しても `updated_at` は `created_at` を下回らない。
    pub fn with_content(self, title: String, description: String, now: DateTime<Utc>) -> Self {
        let updated_at = now.max(self.created_at);
        Self {
            title,
            description,
            updated_at,
            ..self
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
