//! menu 共通ライブラリ
//!
//! `menu` コマンドが使うエラー型・LLM プロバイダ・構造化ログ・環境解決を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// LLMプロバイダ
pub mod llm;

/// Outbound ポート（ログ・環境変数・時刻）
pub mod ports;

/// ポートの標準実装
pub mod adapter;
