//! LLMプロバイダのトレイト定義

use crate::error::Error;
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（Gemini、Echo）はこのトレイトを実装する必要があります。
/// 1 回のリクエストで 1 回の応答を得る単発呼び出しのみを扱う。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// モデル名を返す
    fn model(&self) -> &str;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// # Arguments
    /// * `request_json` - リクエストJSON文字列
    ///
    /// # Returns
    /// * `Ok(String)` - レスポンスJSON文字列
    /// * `Err(Error)` - 通信・認証・クォータ等のエラー
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストを抽出
    ///
    /// # Returns
    /// * `Ok(Option<String>)` - 抽出したテキスト（存在しない場合はNone）
    /// * `Err(Error)` - レスポンスが JSON でない、またはエラー応答
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `query` - ユーザークエリ（プロンプト全文）
    /// * `system_instruction` - システム指示（オプション）
    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error>;
}
