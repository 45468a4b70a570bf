//! # Todo API エラー定義
//!
//! API 層のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ワイヤ契約
//!
//! エラーボディは一律にフラットな `{"error": "<メッセージ>"}`。
//! ストア起因の 500 は操作ごとに固定のメッセージ文字列を返し、
//! 障害の詳細はログにのみ出力する。
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `Store` | 500 Internal Server Error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todoflow_domain::DomainError;
use todoflow_infra::InfraError;
use todoflow_shared::ErrorBody;

/// Todo API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない
    ///
    /// 存在しない ID と、構文的に不正な ID の両方をこのバリアントで扱う。
    /// どちらもクライアントから見れば「その Todo は存在しない」。
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    Validation(String),

    /// ストアエラー
    ///
    /// `context` が操作ごとの固定レスポンスメッセージになる。
    #[error("{context}: {source}")]
    Store {
        /// クライアントに返す固定メッセージ
        context: &'static str,
        /// ログ専用の原因
        #[source]
        source:  InfraError,
    },
}

impl ApiError {
    /// ストアエラーを生成する
    pub fn store(context: &'static str, source: InfraError) -> Self {
        Self::Store { context, source }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Store { context, source } => {
                tracing::error!("ストアエラー: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_foundは404に変換される() {
        let response = ApiError::NotFound("Todo not found: abc".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validationは400に変換される() {
        let response = ApiError::Validation("タイトルは必須です".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storeは500に変換される() {
        let err = ApiError::store(
            "Database error",
            InfraError::DynamoDb("接続失敗".to_string()),
        );

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_errorのvalidationはapi_errorのvalidationになる() {
        let err: ApiError = DomainError::Validation("説明は必須です".to_string()).into();

        assert!(matches!(err, ApiError::Validation(_)));
    }
}
