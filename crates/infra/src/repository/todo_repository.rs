//! # TodoRepository
//!
//! `todos` テーブルへのアクセスを担当する。
//!
//! 読み取り・更新・削除はすべて `id` と `user_id` の両方を WHERE 句に含める。
//! 他ユーザーの Todo は「存在しない」のと区別できない。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use todo_domain::{
    todo::{Todo, TodoId},
    user::UserId,
};
use uuid::Uuid;

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Todo を挿入する
    async fn insert(&self, todo: &Todo) -> Result<(), InfraError>;

    /// ユーザーの全 Todo を作成日時順で取得する
    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, InfraError>;

    /// ID と所有者で Todo を検索する
    async fn find_by_id(&self, id: &TodoId, user_id: &UserId)
    -> Result<Option<Todo>, InfraError>;

    /// タイトルと説明を更新する
    ///
    /// `updated_at` は `created_at` を下回らない。
    /// 該当行があれば `true` を返す。
    async fn update_content(
        &self,
        id: &TodoId,
        user_id: &UserId,
        title: &str,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, InfraError>;

    /// Todo を削除する
    ///
    /// 該当行があれば `true` を返す。
    async fn delete(&self, id: &TodoId, user_id: &UserId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct TodoRow {
    id:          Uuid,
    user_id:     Uuid,
    title:       String,
    description: String,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(
            TodoId::from_uuid(row.id),
            UserId::from_uuid(row.user_id),
            row.title,
            row.description,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(todo_id = %todo.id(), user_id = %todo.user_id()))]
    async fn insert(&self, todo: &Todo) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, user_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(todo.id().as_uuid())
        .bind(todo.user_id().as_uuid())
        .bind(todo.title())
        .bind(todo.description())
        .bind(todo.created_at())
        .bind(todo.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, %user_id))]
    async fn find_by_id(
        &self,
        id: &TodoId,
        user_id: &UserId,
    ) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, %user_id))]
    async fn update_content(
        &self,
        id: &TodoId,
        user_id: &UserId,
        title: &str,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $3, description = $4, updated_at = GREATEST($5, created_at)
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(title)
        .bind(description)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, %user_id))]
    async fn delete(&self, id: &TodoId, user_id: &UserId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
