//! # TodoRepository
//!
//! Todo コレクションの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: PK = `id` の単一テーブルに 1 Todo = 1 アイテムで格納
//! - **存在チェックは条件式**: 更新・削除は `attribute_exists(id)` 付きで
//!   発行し、条件失敗を「見つからない」として `Ok(false)` で返す。
//!   読み取り後の書き込みの間に削除が割り込んだ場合もこの経路に落ちる
//! - **last-write-wins**: バージョン管理・楽観的ロックは行わない

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use chrono::{DateTime, Utc};
use todoflow_domain::todo::{Description, Title, Todo, TodoId};

use crate::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// すべての Todo を取得する（ストアの自然順）
    ///
    /// 1 件もない場合は空の Vec を返す。
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ID で Todo を検索する
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

    /// 新しい Todo を保存する
    async fn insert(&self, todo: &Todo) -> Result<(), InfraError>;

    /// 既存の Todo を上書き保存する
    ///
    /// アイテムが存在しない場合は書き込まず `Ok(false)` を返す。
    async fn update(&self, todo: &Todo) -> Result<bool, InfraError>;

    /// Todo を削除する
    ///
    /// アイテムが存在しない場合は `Ok(false)` を返す。
    async fn delete(&self, id: &TodoId) -> Result<bool, InfraError>;
}

/// DynamoDB 実装の TodoRepository
pub struct DynamoDbTodoRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbTodoRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let mut todos = Vec::new();
        let mut start_key = None;

        // 1MB を超えるとページ分割されるため、LastEvaluatedKey が尽きるまで走査する
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| InfraError::DynamoDb(format!("Todo 一覧の取得に失敗: {e}")))?;

            for item in output.items.unwrap_or_default() {
                todos.push(from_item(&item)?);
            }

            start_key = output.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(todos)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| InfraError::DynamoDb(format!("Todo の取得に失敗: {e}")))?;

        output.item.map(|item| from_item(&item)).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %todo.id()))]
    async fn insert(&self, todo: &Todo) -> Result<(), InfraError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(todo)))
            .send()
            .await
            .map_err(|e| InfraError::DynamoDb(format!("Todo の保存に失敗: {e}")))?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %todo.id()))]
    async fn update(&self, todo: &Todo) -> Result<bool, InfraError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(todo)))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let is_conditional_check_failed = err
                    .as_service_error()
                    .map(|e| e.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if is_conditional_check_failed {
                    return Ok(false);
                }
                Err(InfraError::DynamoDb(format!("Todo の更新に失敗: {err}")))
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let is_conditional_check_failed = err
                    .as_service_error()
                    .map(|e| e.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if is_conditional_check_failed {
                    return Ok(false);
                }
                Err(InfraError::DynamoDb(format!("Todo の削除に失敗: {err}")))
            }
        }
    }
}

// ===== アイテム変換 =====

/// Todo を DynamoDB アイテムに変換する
///
/// `completed_on` は未完了の間は属性自体を持たない。
fn to_item(todo: &Todo) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        "id".to_string(),
        AttributeValue::S(todo.id().to_string()),
    );
    item.insert(
        "title".to_string(),
        AttributeValue::S(todo.title().as_str().to_string()),
    );
    item.insert(
        "description".to_string(),
        AttributeValue::S(todo.description().as_str().to_string()),
    );
    item.insert(
        "completed".to_string(),
        AttributeValue::Bool(todo.completed()),
    );

    if let Some(completed_on) = todo.completed_on() {
        item.insert(
            "completed_on".to_string(),
            AttributeValue::S(completed_on.to_rfc3339()),
        );
    }

    item
}

/// DynamoDB アイテムから Todo を復元する
///
/// 属性の欠落・型不一致・パース不能な値は [`InfraError::InvalidItem`] になる。
fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Todo, InfraError> {
    let id = TodoId::parse(get_s(item, "id")?)
        .map_err(|e| InfraError::InvalidItem(format!("id: {e}")))?;
    let title = Title::new(get_s(item, "title")?)
        .map_err(|e| InfraError::InvalidItem(format!("title: {e}")))?;
    let description = Description::new(get_s(item, "description")?)
        .map_err(|e| InfraError::InvalidItem(format!("description: {e}")))?;

    let completed = item
        .get("completed")
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| {
            InfraError::InvalidItem("属性 'completed' がないか Bool ではありません".to_string())
        })?;

    let completed_on = item
        .get("completed_on")
        .map(parse_timestamp)
        .transpose()?;

    Ok(Todo::restore(id, title, description, completed, completed_on))
}

/// 文字列属性を取り出す
fn get_s<'a>(item: &'a HashMap<String, AttributeValue>, key: &str) -> Result<&'a str, InfraError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
        .ok_or_else(|| {
            InfraError::InvalidItem(format!("属性 '{key}' がないか文字列ではありません"))
        })
}

/// RFC 3339 のタイムスタンプ属性をパースする
fn parse_timestamp(value: &AttributeValue) -> Result<DateTime<Utc>, InfraError> {
    let text = value.as_s().map_err(|_| {
        InfraError::InvalidItem("属性 'completed_on' が文字列ではありません".to_string())
    })?;

    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| InfraError::InvalidItem(format!("completed_on: {e}")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_todo() -> Todo {
        Todo::new(
            Title::new("Buy milk").unwrap(),
            Description::new("2%").unwrap(),
        )
    }

    #[test]
    fn test_to_itemは未完了のtodoにcompleted_on属性を含めない() {
        let todo = sample_todo();

        let item = to_item(&todo);

        assert_eq!(
            item.get("id"),
            Some(&AttributeValue::S(todo.id().to_string()))
        );
        assert_eq!(
            item.get("title"),
            Some(&AttributeValue::S("Buy milk".to_string()))
        );
        assert_eq!(
            item.get("description"),
            Some(&AttributeValue::S("2%".to_string()))
        );
        assert_eq!(item.get("completed"), Some(&AttributeValue::Bool(false)));
        assert_eq!(item.get("completed_on"), None);
    }

    #[test]
    fn test_to_itemは完了済みtodoの完了時刻をrfc3339で格納する() {
        let mut todo = sample_todo();
        let now = Utc::now();
        todo.complete(now);

        let item = to_item(&todo);

        assert_eq!(item.get("completed"), Some(&AttributeValue::Bool(true)));
        assert_eq!(
            item.get("completed_on"),
            Some(&AttributeValue::S(now.to_rfc3339()))
        );
    }

    #[test]
    fn test_from_itemでアイテムからtodoを復元できる() {
        let mut todo = sample_todo();
        todo.complete(Utc::now());

        let restored = from_item(&to_item(&todo)).unwrap();

        assert_eq!(restored, todo);
    }

    #[test]
    fn test_from_itemは属性が欠落していればエラーを返す() {
        let mut item = to_item(&sample_todo());
        item.remove("title");

        let result = from_item(&item);

        assert!(matches!(result, Err(InfraError::InvalidItem(_))));
    }

    #[test]
    fn test_from_itemは型不一致の属性を拒否する() {
        let mut item = to_item(&sample_todo());
        item.insert(
            "completed".to_string(),
            AttributeValue::S("true".to_string()),
        );

        let result = from_item(&item);

        assert!(matches!(result, Err(InfraError::InvalidItem(_))));
    }

    #[test]
    fn test_from_itemはパース不能な完了時刻を拒否する() {
        let mut item = to_item(&sample_todo());
        item.insert(
            "completed_on".to_string(),
            AttributeValue::S("昨日".to_string()),
        );

        let result = from_item(&item);

        assert!(matches!(result, Err(InfraError::InvalidItem(_))));
    }
}
