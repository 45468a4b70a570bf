//! # Todo API サーバー
//!
//! Todo コレクションの CRUD を提供する HTTP サービス。
//!
//! ## 役割
//!
//! - **リソース API**: Todo の一覧・作成・更新・完了・削除
//! - **データ永続化**: DynamoDB（ドキュメントストア）への委譲
//!
//! リクエストごとの制御フローは「最小限の形を検証 → ストア操作を 1 回発行 →
//! 結果・不在・エラーを HTTP レスポンスへ変換」の 3 手のみ。
//! プロセス内に共有可変状態は持たず、並行性の正しさはストアに委譲する
//! （last-write-wins）。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `DYNAMODB_ENDPOINT_URL` | **Yes** | ドキュメントストアのエンドポイント URL |
//! | `TODOS_TABLE_NAME` | No | テーブル名（デフォルト: `todos`） |
//! | `ALLOWED_ORIGIN` | No | CORS で許可するオリジン |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（DynamoDB Local）
//! DYNAMODB_ENDPOINT_URL=http://localhost:8000 cargo run -p todoflow-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use todoflow_api::{app_builder::build_app, config::ApiConfig, handler::TodoState};
use todoflow_domain::clock::SystemClock;
use todoflow_infra::{dynamodb, repository::DynamoDbTodoRepository};
use todoflow_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

/// Todo API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ドキュメントストアへの接続とテーブル確認
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    // RUST_LOG 環境変数でログレベルを制御可能
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Todo API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // ドキュメントストアへ接続し、テーブルを確認する（冪等）
    let client = dynamodb::create_client(&config.dynamodb_endpoint_url).await;
    dynamodb::ensure_todos_table(&client, &config.todos_table_name).await?;
    tracing::info!("ドキュメントストアに接続しました");

    // 依存コンポーネントを初期化
    let repository = DynamoDbTodoRepository::new(client, config.todos_table_name.clone());
    let state = Arc::new(TodoState {
        repository,
        clock: Arc::new(SystemClock),
    });

    // ルーター構築
    let app = build_app(state, &config.allowed_origin);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Todo API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
