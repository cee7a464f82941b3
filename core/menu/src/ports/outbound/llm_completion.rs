//! 単発 LLM 完了の Outbound ポート
//!
//! 1 回のプロンプトで全文応答を取得する。リトライはしない。

use common::error::Error;

/// 単発の LLM 完了（プロンプトのみを入力に応答文字列を取得）
pub trait LlmCompletion: Send + Sync {
    /// プロバイダ名（ログ用）
    fn name(&self) -> &str;

    fn complete(&self, prompt: &str) -> Result<String, Error>;
}
