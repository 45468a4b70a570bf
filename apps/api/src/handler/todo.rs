//! # Todo API ハンドラ
//!
//! Todo リソースの 6 操作（List / Create / Update / Complete / Delete /
//! Delete-completed）を実装する。
//!
//! ## ステータスコードのマッピング
//!
//! - 見つからない ID・構文的に不正な ID: 一律 404（不正な ID はどの Todo も
//!   指せないため）。Update / Complete / Delete / Delete-completed で共通
//! - ストア障害: 操作ごとの固定メッセージで 500
//! - Create の入力検証失敗: 400（ストアに到達する前に弾く）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use todoflow_domain::{
    clock::Clock,
    todo::{Description, Title, Todo, TodoId},
};
use todoflow_infra::repository::TodoRepository;

use crate::error::ApiError;

/// Todo ハンドラーの State
pub struct TodoState<R> {
    pub repository: R,
    pub clock:      Arc<dyn Clock>,
}

/// Create リクエストボディ
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title:       String,
    pub description: String,
}

/// Update リクエストボディ
///
/// 省略されたフィールドは変更しない（`null` と省略は同義に扱う）。
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title:       Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Todo レスポンス DTO
///
/// `completed_on` は未完了の間はフィールド自体を出力しない。
#[derive(Debug, Serialize)]
pub struct TodoDto {
    pub id:          String,
    pub title:       String,
    pub description: String,
    pub completed:   bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<String>,
}

impl TodoDto {
    fn from_todo(todo: &Todo) -> Self {
        Self {
            id:           todo.id().to_string(),
            title:        todo.title().as_str().to_string(),
            description:  todo.description().as_str().to_string(),
            completed:    todo.completed(),
            completed_on: todo.completed_on().map(|t| t.to_rfc3339()),
        }
    }
}

/// 削除操作の意図タグ
///
/// Delete と Delete-completed はルートとエラーメッセージだけが異なる
/// 同一の操作。サーバー側で `completed` の検査は行わない。
#[derive(Debug, Clone, Copy)]
enum DeleteIntent {
    /// DELETE /todos/{id}
    Todo,
    /// DELETE /completed/{id}
    Completed,
}

impl DeleteIntent {
    /// ストア障害時の固定レスポンスメッセージ
    fn failure_message(self) -> &'static str {
        match self {
            DeleteIntent::Todo => "Failed to delete todo",
            DeleteIntent::Completed => "Failed to delete completed todo",
        }
    }
}

/// パスセグメントを TodoId として解釈する
///
/// 不正な ID はどの Todo も指せないため、一律 404 として扱う
/// （DESIGN.md に記録したポリシー）。
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
    TodoId::parse(raw).map_err(|_| ApiError::NotFound(format!("Todo not found: {raw}")))
}

/// Todo 一覧を取得する
///
/// ## エンドポイント
/// GET /todos
pub async fn list_todos<R>(State(state): State<Arc<TodoState<R>>>) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    let todos = state
        .repository
        .find_all()
        .await
        .map_err(|e| ApiError::store("Database error", e))?;

    let body: Vec<TodoDto> = todos.iter().map(TodoDto::from_todo).collect();

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Todo を作成する
///
/// ## エンドポイント
/// POST /todos
pub async fn create_todo<R>(
    State(state): State<Arc<TodoState<R>>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    let title = Title::new(req.title)?;
    let description = Description::new(req.description)?;

    let todo = Todo::new(title, description);

    state
        .repository
        .insert(&todo)
        .await
        .map_err(|e| ApiError::store("Failed to add todo", e))?;

    tracing::debug!(id = %todo.id(), "Todo を作成しました");

    Ok((StatusCode::CREATED, Json(TodoDto::from_todo(&todo))).into_response())
}

/// Todo のタイトル・説明を更新する
///
/// 渡されたフィールドだけを置き換え、省略されたフィールドは変更しない。
///
/// ## エンドポイント
/// PUT /todos/{id}
pub async fn update_todo<R>(
    State(state): State<Arc<TodoState<R>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    let id = parse_todo_id(&id)?;

    let title = req.title.map(Title::new).transpose()?;
    let description = req.description.map(Description::new).transpose()?;

    let mut todo = state
        .repository
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::store("Failed to update todo", e))?
        .ok_or_else(|| ApiError::NotFound(format!("Todo not found: {id}")))?;

    todo.update(title, description);

    let updated = state
        .repository
        .update(&todo)
        .await
        .map_err(|e| ApiError::store("Failed to update todo", e))?;
    // 読み取りと書き込みの間に削除が割り込んだ場合
    if !updated {
        return Err(ApiError::NotFound(format!("Todo not found: {id}")));
    }

    Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// Todo を完了にする
///
/// `completed_on` は呼び出しのたびに現在時刻で再計算される。
///
/// ## エンドポイント
/// PUT /todos/complete/{id}
pub async fn complete_todo<R>(
    State(state): State<Arc<TodoState<R>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    let id = parse_todo_id(&id)?;

    let mut todo = state
        .repository
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::store("Failed to complete todo", e))?
        .ok_or_else(|| ApiError::NotFound(format!("Todo not found: {id}")))?;

    todo.complete(state.clock.now());

    let updated = state
        .repository
        .update(&todo)
        .await
        .map_err(|e| ApiError::store("Failed to complete todo", e))?;
    if !updated {
        return Err(ApiError::NotFound(format!("Todo not found: {id}")));
    }

    Ok((StatusCode::OK, Json(TodoDto::from_todo(&todo))).into_response())
}

/// Todo を削除する
///
/// ## エンドポイント
/// DELETE /todos/{id}
pub async fn delete_todo<R>(
    State(state): State<Arc<TodoState<R>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    remove_todo(&state, &id, DeleteIntent::Todo).await
}

/// 完了済み Todo を削除する
///
/// Delete と同一の機構で、ルートとエラーメッセージだけが異なる。
/// `completed` であることの検査は行わない。
///
/// ## エンドポイント
/// DELETE /completed/{id}
pub async fn delete_completed_todo<R>(
    State(state): State<Arc<TodoState<R>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    remove_todo(&state, &id, DeleteIntent::Completed).await
}

/// 両削除ルート共通の実装
async fn remove_todo<R>(
    state: &TodoState<R>,
    raw_id: &str,
    intent: DeleteIntent,
) -> Result<Response, ApiError>
where
    R: TodoRepository,
{
    let id = parse_todo_id(raw_id)?;

    let deleted = state
        .repository
        .delete(&id)
        .await
        .map_err(|e| ApiError::store(intent.failure_message(), e))?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Todo not found: {id}")));
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
