//! # Todo API ライブラリ
//!
//! ルーター構築・設定・ハンドラを公開する。
//! `main.rs` はインフラ初期化とサーバー起動に集中し、
//! テストはここから [`app_builder::build_app`] を組み立てて利用する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
