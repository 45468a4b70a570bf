//! # インフラ層エラー定義
//!
//! ドキュメントストアとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: AWS SDK のエラー型はジェネリクスが深く `#[from]` が
//!   困難なため、発生箇所で String にマップする
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **リトライしない**: 最初の失敗をそのまま API 層へ伝播する

use thiserror::Error;

/// インフラ層で発生するエラー
///
/// API 層でこのエラーを受け取り、一律に 500 レスポンスへ変換する。
/// クライアントに詳細を返さないため、メッセージはログ専用。
#[derive(Debug, Error)]
pub enum InfraError {
    /// DynamoDB エラー
    ///
    /// DynamoDB への操作（接続エラー、スロットリング等）で発生するエラー。
    #[error("DynamoDB エラー: {0}")]
    DynamoDb(String),

    /// 不正なアイテム
    ///
    /// ストアから取得したアイテムがエンティティとして復元できない場合。
    /// 属性の欠落や型不一致など。
    #[error("不正なアイテム: {0}")]
    InvalidItem(String),
}
