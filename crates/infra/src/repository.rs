//! # リポジトリ実装
//!
//! Todo コレクションへの永続化インターフェースと、その具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: API 層はトレイト経由でリポジトリを利用する
//! - **ストア抽象化**: DynamoDB 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でインメモリ実装に差し替え可能

pub mod todo_repository;

pub use todo_repository::{DynamoDbTodoRepository, TodoRepository};
