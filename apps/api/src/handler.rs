//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、状態遷移はドメイン層に委譲

pub mod health;
pub mod todo;

pub use health::{greeting, health_check};
pub use todo::{
    TodoState,
    complete_todo,
    create_todo,
    delete_completed_todo,
    delete_todo,
    list_todos,
    update_todo,
};
