//! # Todo API アプリケーション構築
//!
//! ルーター構築とミドルウェア（CORS・トレーシング）の合成を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, put},
};
use todoflow_infra::repository::TodoRepository;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handler::{
    TodoState,
    complete_todo,
    create_todo,
    delete_completed_todo,
    delete_todo,
    greeting,
    health_check,
    list_todos,
    update_todo,
};

/// ルーターを構築する
///
/// CORS は単一の固定オリジンのみを許可し、メソッドは
/// GET / POST / PUT / DELETE、リクエストヘッダーは `Content-Type` に限定する。
///
/// # パニック
///
/// `allowed_origin` がヘッダー値として不正な場合はパニックする
/// （起動時にのみ呼ばれる前提）。
pub fn build_app<R>(state: Arc<TodoState<R>>, allowed_origin: &str) -> Router
where
    R: TodoRepository + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(
            allowed_origin
                .parse::<HeaderValue>()
                .expect("ALLOWED_ORIGIN がヘッダー値として不正です"),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
        .route("/todos", get(list_todos::<R>).post(create_todo::<R>))
        .route(
            "/todos/{id}",
            put(update_todo::<R>).delete(delete_todo::<R>),
        )
        .route("/todos/complete/{id}", put(complete_todo::<R>))
        .route("/completed/{id}", delete(delete_completed_todo::<R>))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
