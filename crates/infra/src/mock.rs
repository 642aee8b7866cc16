//! # テスト用モックリポジトリ
//!
//! ユースケース / ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすると他クレートからも利用できる。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use todo_domain::{
    todo::{Todo, TodoId},
    user::{Email, User, UserId},
};

use crate::{
    error::InfraError,
    repository::{TodoRepository, UserRepository},
};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(InfraError::conflict("User", user.email().as_str()));
        }
        users.push(user.clone());
        Ok(())
    }
}

// ===== MockTodoRepository =====

#[derive(Clone, Default)]
pub struct MockTodoRepository {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有者に関係なく保存されている全 Todo
    pub fn todos(&self) -> Vec<Todo> {
        self.todos.lock().unwrap().clone()
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn insert(&self, todo: &Todo) -> Result<(), InfraError> {
        self.todos.lock().unwrap().push(todo.clone());
        Ok(())
    }

    async fn find_all_by_user(&self, user_id: &UserId) -> Result<Vec<Todo>, InfraError> {
        let mut todos: Vec<Todo> = self
            .todos
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect();
        todos.sort_by_key(|t| (t.created_at(), *t.id().as_uuid()));
        Ok(todos)
    }

    async fn find_by_id(
        &self,
        id: &TodoId,
        user_id: &UserId,
    ) -> Result<Option<Todo>, InfraError> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id && t.is_owned_by(user_id))
            .cloned())
    }

    async fn update_content(
        &self,
        id: &TodoId,
        user_id: &UserId,
        title: &str,
        description: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        let Some(pos) = todos
            .iter()
            .position(|t| t.id() == id && t.is_owned_by(user_id))
        else {
            return Ok(false);
        };
        let updated =
            todos[pos]
                .clone()
                .with_content(title.to_string(), description.to_string(), updated_at);
        todos[pos] = updated;
        Ok(true)
    }

    async fn delete(&self, id: &TodoId, user_id: &UserId) -> Result<bool, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| !(t.id() == id && t.is_owned_by(user_id)));
        Ok(todos.len() < before)
    }
}
