//! # Todoflow ドメイン層
//!
//! Todo エンティティとその値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`todo::Todo`]）
//! - **値オブジェクト**: 生成時にバリデーションされる不変オブジェクト
//!   （[`todo::Title`], [`todo::Description`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダの抽象化
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - Todo エンティティと値オブジェクト

pub mod clock;
pub mod error;
pub mod todo;

pub use error::DomainError;
