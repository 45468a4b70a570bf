//! # Todo API 設定
//!
//! 環境変数から Todo API サーバーの設定を読み込む。

use std::env;

/// Todo API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// ドキュメントストア（DynamoDB）のエンドポイント URL
    pub dynamodb_endpoint_url: String,
    /// Todo テーブル名
    pub todos_table_name: String,
    /// CORS で許可する唯一のオリジン
    pub allowed_origin: String,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    ///
    /// `DYNAMODB_ENDPOINT_URL` のみ必須。それ以外は未設定時に
    /// デフォルト値へフォールバックする（ポートは 5000）。
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT は有効なポート番号である必要があります"),
            dynamodb_endpoint_url: env::var("DYNAMODB_ENDPOINT_URL")?,
            todos_table_name: env::var("TODOS_TABLE_NAME").unwrap_or_else(|_| "todos".to_string()),
            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "https://todo-mern-chi-sable.vercel.app".to_string()),
        })
    }
}
