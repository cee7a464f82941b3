//! Echoプロバイダの実装
//!
//! 実際にLLM APIを呼び出さず、固定の推薦を返します。
//! API キーなしでの動作確認やテスト用に使用します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// Echo が返す応答テキスト（前後に説明文とコードフェンスを含む）
const CANNED_REPLY: &str = "오늘의 추천입니다!\n```json\n{\n  \"menu\": \"김치찌개 + 계란말이\",\n  \"comment\": \"API 없이도 든든하게, 오늘은 집밥 느낌으로 가볼까요?\",\n  \"place\": \"동네 백반집\"\n}\n```\n맛있게 드세요.";

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 実際の API 呼び出しは行わず、Gemini 形式の封筒に固定テキストを入れて返す
        let request: Value = serde_json::from_str(request_json)
            .map_err(|e| Error::json(format!("Failed to parse request JSON: {}", e)))?;
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": CANNED_REPLY}]}
            }],
            "echo": request
        });
        Ok(response.to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        Ok(v["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string()))
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error> {
        let mut payload = json!({ "query": query });
        if let Some(system) = system_instruction {
            payload["system_instruction"] = json!(system);
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmDriver;

    #[test]
    fn test_echo_provider_name() {
        let provider = EchoProvider::new();
        assert_eq!(provider.name(), "echo");
    }

    #[test]
    fn test_echo_payload_contains_query() {
        let payload = EchoProvider::new()
            .make_request_payload("hello", Some("sys"))
            .unwrap();
        assert_eq!(payload["query"], "hello");
        assert_eq!(payload["system_instruction"], "sys");
    }

    #[test]
    fn test_echo_reply_wraps_json_in_prose() {
        let driver = LlmDriver::new(EchoProvider::new());
        let text = driver.query("prompt", None).unwrap();
        assert!(text.starts_with("오늘의 추천입니다!"));
        let start = text.find('{').unwrap();
        let end = text.rfind('}').unwrap();
        let v: Value = serde_json::from_str(&text[start..=end]).unwrap();
        assert_eq!(v["menu"], "김치찌개 + 계란말이");
        assert_eq!(v["place"], "동네 백반집");
    }
}
