//! # エラーレスポンスボディ
//!
//! 全エンドポイント共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - ワイヤ形式はフラットな `{"error": "<メッセージ>"}`。
//!   クライアントはこの形だけを前提にしている
//! - `ErrorBody` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）

use serde::{Deserialize, Serialize};

/// エラーレスポンスボディ
///
/// すべてのエラーレスポンスで統一された `{"error": ...}` 形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// 新しいエラーボディを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializeでerrorフィールドだけのjsonになる() {
        let body = ErrorBody::new("Database error");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({ "error": "Database error" }));
    }

    #[test]
    fn test_deserializeでjsonからオブジェクトに変換する() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "Failed to add todo"}"#).unwrap();

        assert_eq!(body.error, "Failed to add todo");
    }
}
