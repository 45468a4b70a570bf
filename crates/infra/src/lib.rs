//! # Todoflow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! ドキュメントストア（DynamoDB）の詳細をカプセル化し、
//! API 層をストアの変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB クライアントとテーブル管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - Todo リポジトリ（トレイトと DynamoDB 実装）
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）

pub mod dynamodb;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
