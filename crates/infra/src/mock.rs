//! # テスト用リポジトリ
//!
//! ハンドラテストで使用する [`TodoRepository`] のテストダブル。
//! インメモリ実装と、ストア障害を再現する常時失敗実装の 2 種類を提供する。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todoflow-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 挿入順を保持するため、List の「ストアの自然順」を挿入順として再現する。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todoflow_domain::todo::{Todo, TodoId};

use crate::{InfraError, repository::TodoRepository};

/// インメモリ実装の TodoRepository
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            todos: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 事前状態を組み立てるためのヘルパー
    pub fn add_todo(&self, todo: Todo) {
        self.todos.lock().unwrap().push(todo);
    }
}

/// すべての操作が失敗する TodoRepository
///
/// ストア障害時のエラーハンドリング（500 レスポンスと固定メッセージ）を
/// 検証するための実装。
#[derive(Clone, Copy, Default)]
pub struct FailingTodoRepository;

impl FailingTodoRepository {
    fn failure() -> InfraError {
        InfraError::DynamoDb("ストアへの接続に失敗しました".to_string())
    }
}

#[async_trait]
impl TodoRepository for FailingTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Err(Self::failure())
    }

    async fn find_by_id(&self, _id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Err(Self::failure())
    }

    async fn insert(&self, _todo: &Todo) -> Result<(), InfraError> {
        Err(Self::failure())
    }

    async fn update(&self, _todo: &Todo) -> Result<bool, InfraError> {
        Err(Self::failure())
    }

    async fn delete(&self, _id: &TodoId) -> Result<bool, InfraError> {
        Err(Self::failure())
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn insert(&self, todo: &Todo) -> Result<(), InfraError> {
        self.todos.lock().unwrap().push(todo.clone());
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<bool, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        match todos.iter_mut().find(|t| t.id() == todo.id()) {
            Some(existing) => {
                *existing = todo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id() != id);
        Ok(todos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use todoflow_domain::todo::{Description, Title};

    use super::*;

    fn todo(title: &str) -> Todo {
        Todo::new(
            Title::new(title).unwrap(),
            Description::new("説明").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_find_allは挿入順で返す() {
        let repo = InMemoryTodoRepository::new();
        repo.insert(&todo("一番目")).await.unwrap();
        repo.insert(&todo("二番目")).await.unwrap();

        let todos = repo.find_all().await.unwrap();

        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title().as_str(), "一番目");
        assert_eq!(todos[1].title().as_str(), "二番目");
    }

    #[tokio::test]
    async fn test_add_todoで事前状態を組み立てられる() {
        let repo = InMemoryTodoRepository::new();
        let t = todo("既存データ");
        repo.add_todo(t.clone());

        let found = repo.find_by_id(t.id()).await.unwrap();

        assert_eq!(found, Some(t));
    }

    #[tokio::test]
    async fn test_failing_repositoryはすべての操作でエラーを返す() {
        let repo = FailingTodoRepository;

        assert!(repo.find_all().await.is_err());
        assert!(repo.insert(&todo("保存できない")).await.is_err());
        assert!(repo.delete(&TodoId::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_updateは存在しないidに対してfalseを返す() {
        let repo = InMemoryTodoRepository::new();

        let updated = repo.update(&todo("未登録")).await.unwrap();

        assert!(!updated);
    }

    #[tokio::test]
    async fn test_deleteは存在するidに対してtrueを返し要素を取り除く() {
        let repo = InMemoryTodoRepository::new();
        let t = todo("削除対象");
        repo.insert(&t).await.unwrap();

        let deleted = repo.delete(t.id()).await.unwrap();

        assert!(deleted);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleteは存在しないidに対してfalseを返す() {
        let repo = InMemoryTodoRepository::new();

        let deleted = repo.delete(&TodoId::new()).await.unwrap();

        assert!(!deleted);
    }
}
