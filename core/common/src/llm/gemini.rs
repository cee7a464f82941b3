//! Geminiプロバイダの実装（generateContent を blocking で 1 回呼ぶ）

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

/// デフォルトのモデル名
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// デフォルトの API ベース URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Geminiプロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: String,
    base_url: String,
    temperature: Option<f32>,
    client: reqwest::blocking::Client,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `model` - モデル名（デフォルト: "gemini-1.5-flash"）
    /// * `api_key` - API キー（呼び出し側で環境変数から解決済みのもの）
    pub fn new(model: Option<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// ベース URL を差し替える（プロキシ・テスト用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// エラーレスポンス本文から error.message を取り出す（無ければ本文そのまま）
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // キーは URL ではなくヘッダで渡す（reqwest のエラー表示に URL が含まれるため）
        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(Error::http(format!(
                "Gemini API error: {}",
                api_error_message(status, &response_text)
            )));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .map(|s| s.to_string());

        Ok(text)
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error> {
        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": query}]
            }]
        });

        if let Some(system) = system_instruction {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        if let Some(t) = self.temperature {
            payload["generationConfig"] = json!({ "temperature": t });
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(None, "test-key")
    }

    #[test]
    fn test_default_model() {
        let p = provider();
        assert_eq!(p.name(), "gemini");
        assert_eq!(p.model(), "gemini-1.5-flash");
        assert_eq!(
            p.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_endpoint_with_base_url() {
        let p = GeminiProvider::new(Some("gemini-2.0-flash".to_string()), "k")
            .with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            p.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_make_request_payload_simple() {
        let payload = provider().make_request_payload("Hello", None).unwrap();
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "Hello");
        assert!(payload.get("systemInstruction").is_none());
        assert!(payload.get("generationConfig").is_none());
    }

    #[test]
    fn test_make_request_payload_with_system_and_temperature() {
        let p = provider().with_temperature(Some(0.5));
        let payload = p.make_request_payload("Hello", Some("be brief")).unwrap();
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(payload["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_parse_response_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"menu\":\"A\"}"}]}}]}"#;
        let text = provider().parse_response_text(body).unwrap();
        assert_eq!(text.as_deref(), Some("{\"menu\":\"A\"}"));
    }

    #[test]
    fn test_parse_response_text_skips_non_text_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{}},{"text":"hi"}]}}]}"#;
        let text = provider().parse_response_text(body).unwrap();
        assert_eq!(text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_parse_response_text_no_candidates() {
        let body = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert_eq!(provider().parse_response_text(body).unwrap(), None);
    }

    #[test]
    fn test_parse_response_text_error_body() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        let err = provider().parse_response_text(body).unwrap_err();
        assert!(err.to_string().contains("Resource has been exhausted"));
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_api_error_message() {
        let msg = api_error_message(
            reqwest::StatusCode::FORBIDDEN,
            r#"{"error":{"message":"API key not valid"}}"#,
        );
        assert_eq!(msg, "API key not valid");

        let msg = api_error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
    }

    /// 1 リクエストだけ受けて固定レスポンスを返すローカルサーバ。受け取ったリクエスト全文を返す。
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
                head.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut req_body = vec![0u8; content_length];
            reader.read_exact(&mut req_body).unwrap();
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            head + &String::from_utf8_lossy(&req_body)
        });
        (base_url, handle)
    }

    #[test]
    fn test_http_success_sends_key_in_header() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"hi"}]}}]}"#,
        );
        let p = GeminiProvider::new(None, "secret-key").with_base_url(base_url);
        let body = p.make_http_request(r#"{"contents":[]}"#).unwrap();
        assert_eq!(p.parse_response_text(&body).unwrap().as_deref(), Some("hi"));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.ends_with(r#"{"contents":[]}"#));
    }

    #[test]
    fn test_http_error_status_uses_api_message() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 403 Forbidden",
            r#"{"error":{"code":403,"message":"API key not valid"}}"#,
        );
        let p = GeminiProvider::new(None, "bad-key").with_base_url(base_url);
        let err = p.make_http_request("{}").unwrap_err();
        server.join().unwrap();
        assert_eq!(err, Error::http("Gemini API error: API key not valid"));
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_transport_error_hides_url_and_key() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let p = GeminiProvider::new(None, "secret-key").with_base_url(format!("http://{}", addr));
        let err = p.make_http_request("{}").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HTTP request failed"), "{}", msg);
        assert!(!msg.contains("secret-key"));
        assert!(!msg.contains("generateContent"));
        assert_eq!(err.exit_code(), 69);
    }
}
