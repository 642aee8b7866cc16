//! # Todo ユースケース
//!
//! 取得・更新・削除はリポジトリに所有者 ID を渡し、SQL の WHERE 句で
//! スコープする。更新と削除は該当件数に関係なく成功を返す。

use std::sync::Arc;

use async_trait::async_trait;
use todo_domain::{
    clock::Clock,
    todo::{Todo, TodoId},
    user::UserId,
};
use todo_infra::repository::TodoRepository;

use super::TodoUseCase;
use crate::error::ApiError;

pub struct TodoUseCaseImpl {
    todo_repository: Arc<dyn TodoRepository>,
    clock:           Arc<dyn Clock>,
}

impl TodoUseCaseImpl {
    pub fn new(todo_repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            todo_repository,
            clock,
        }
    }
}

#[async_trait]
impl TodoUseCase for TodoUseCaseImpl {
    async fn create(
        &self,
        user_id: &UserId,
        title: String,
        description: String,
    ) -> Result<Todo, ApiError> {
        let todo = Todo::new(
            TodoId::new(),
            user_id.clone(),
            title,
            description,
            self.clock.now(),
        );
        self.todo_repository.insert(&todo).await?;

        tracing::debug!(todo_id = %todo.id(), "Todo を作成しました");
        Ok(todo)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Todo>, ApiError> {
        Ok(self.todo_repository.find_all_by_user(user_id).await?)
    }

    async fn get(&self, user_id: &UserId, id: &str) -> Result<Todo, ApiError> {
        let Ok(todo_id) = TodoId::parse_str(id) else {
            return Err(ApiError::todo_not_found());
        };

        self.todo_repository
            .find_by_id(&todo_id, user_id)
            .await?
            .ok_or_else(ApiError::todo_not_found)
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: &str,
        title: String,
        description: String,
    ) -> Result<(), ApiError> {
        let Ok(todo_id) = TodoId::parse_str(id) else {
            tracing::debug!(id, "UUID でない ID のため更新対象なし");
            return Ok(());
        };

        let matched = self
            .todo_repository
            .update_content(&todo_id, user_id, &title, &description, self.clock.now())
            .await?;
        tracing::debug!(%todo_id, matched, "Todo を更新しました");
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, id: &str) -> Result<(), ApiError> {
        let Ok(todo_id) = TodoId::parse_str(id) else {
            tracing::debug!(id, "UUID でない ID のため削除対象なし");
            return Ok(());
        };

        let matched = self.todo_repository.delete(&todo_id, user_id).await?;
        tracing::debug!(%todo_id, matched, "Todo を削除しました");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use todo_domain::clock::FixedClock;
    use todo_infra::mock::MockTodoRepository;

    use super::*;

    fn base_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn sut_at(repo: &MockTodoRepository, now: DateTime<Utc>) -> TodoUseCaseImpl {
        TodoUseCaseImpl::new(Arc::new(repo.clone()), Arc::new(FixedClock::new(now)))
    }

    #[tokio::test]
    async fn test_作成したtodoは所有者と作成時刻を持つ() {
        // Given
        let repo = MockTodoRepository::new();
        let sut = sut_at(&repo, base_time());
        let owner = UserId::new();

        // When
        let todo = sut
            .create(&owner, "buy milk".to_string(), "2%".to_string())
            .await
            .unwrap();

        // Then
        assert!(todo.is_owned_by(&owner));
        assert_eq!(todo.title(), "buy milk");
        assert_eq!(todo.description(), "2%");
        assert_eq!(todo.created_at(), base_time());
        assert_eq!(todo.updated_at(), base_time());
        assert_eq!(repo.todos(), vec![todo]);
    }

    #[tokio::test]
    async fn test_作成したtodoをidで取得できる() {
        let repo = MockTodoRepository::new();
        let sut = sut_at(&repo, base_time());
        let owner = UserId::new();
        let created = sut
            .create(&owner, "t".to_string(), "d".to_string())
            .await
            .unwrap();

        let found = sut.get(&owner, &created.id().to_string()).await.unwrap();

        assert_eq!(found, created);
        assert!(found.created_at() <= found.updated_at());
    }

    #[tokio::test]
    async fn test_他ユーザーのtodoはnot_found() {
        // Given
        let repo = MockTodoRepository::new();
        let sut = sut_at(&repo, base_time());
        let alice = UserId::new();
        let bob = UserId::new();
        let todo = sut
            .create(&alice, "secret".to_string(), String::new())
            .await
            .unwrap();

        // When
        let result = sut.get(&bob, &todo.id().to_string()).await;

        // Then
        assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg == "Todo not found"));
    }

    #[rstest]
    #[case::数値("7")]
    #[case::空文字列("")]
    #[case::存在しないuuid("0190a8c0-0000-7000-8000-000000000000")]
    #[tokio::test]
    async fn test_該当しないidはnot_found(#[case] id: &str) {
        let repo = MockTodoRepository::new();
        let sut = sut_at(&repo, base_time());

        let result = sut.get(&UserId::new(), id).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_一覧は自分のtodoのみを作成日時順で返す() {
        // Given
        let repo = MockTodoRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();
        let second = sut_at(&repo, base_time() + Duration::seconds(10))
            .create(&alice, "second".to_string(), String::new())
            .await
            .unwrap();
        let first = sut_at(&repo, base_time())
            .create(&alice, "first".to_string(), String::new())
            .await
            .unwrap();
        sut_at(&repo, base_time())
            .create(&bob, "bob".to_string(), String::new())
            .await
            .unwrap();

        // When
        let todos = sut_at(&repo, base_time()).list(&alice).await.unwrap();

        // Then
        assert_eq!(todos, vec![first, second]);
    }

    #[tokio::test]
    async fn test_更新はタイトルと説明と更新日時のみを変える() {
        // Given
        let repo = MockTodoRepository::new();
        let owner = UserId::new();
        let original = sut_at(&repo, base_time())
            .create(&owner, "t".to_string(), "d".to_string())
            .await
            .unwrap();
        let later = base_time() + Duration::minutes(3);

        // When
        sut_at(&repo, later)
            .update(
                &owner,
                &original.id().to_string(),
                "t2".to_string(),
                "d2".to_string(),
            )
            .await
            .unwrap();

        // Then
        let expected = Todo::from_db(
            original.id().clone(),
            owner.clone(),
            "t2".to_string(),
            "d2".to_string(),
            original.created_at(),
            later,
        );
        assert_eq!(repo.todos(), vec![expected]);
    }

    #[tokio::test]
    async fn test_他ユーザーの更新は成功を返すが変更しない() {
        let repo = MockTodoRepository::new();
        let alice = UserId::new();
        let todo = sut_at(&repo, base_time())
            .create(&alice, "mine".to_string(), String::new())
            .await
            .unwrap();

        let result = sut_at(&repo, base_time())
            .update(
                &UserId::new(),
                &todo.id().to_string(),
                "hijack".to_string(),
                String::new(),
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(repo.todos(), vec![todo]);
    }

    #[tokio::test]
    async fn test_削除は自分のtodoのみを対象にする() {
        // Given
        let repo = MockTodoRepository::new();
        let alice = UserId::new();
        let sut = sut_at(&repo, base_time());
        let todo = sut
            .create(&alice, "mine".to_string(), String::new())
            .await
            .unwrap();

        // When
        sut.delete(&UserId::new(), &todo.id().to_string())
            .await
            .unwrap();
        let after_other = repo.todos().len();
        sut.delete(&alice, &todo.id().to_string()).await.unwrap();

        // Then
        assert_eq!(after_other, 1);
        assert!(repo.todos().is_empty());
    }

    #[rstest]
    #[case::数値("7")]
    #[case::存在しないuuid("0190a8c0-0000-7000-8000-000000000000")]
    #[tokio::test]
    async fn test_該当しないidの削除も成功を返す(#[case] id: &str) {
        let repo = MockTodoRepository::new();
        let sut = sut_at(&repo, base_time());

        let result = sut.delete(&UserId::new(), id).await;

        assert!(result.is_ok());
    }
}
