//! 推薦クライアント
//!
//! プロンプト生成 → LLM 1 回呼び出し → 応答から JSON 抽出 → 3 項目検証。
//! どの段階で失敗しても呼び出し側には固定のフォールバック結果を返す。

use crate::domain::{Notice, Recommendation, RecommendationResult, SelectionRecord};
use crate::ports::outbound::LlmCompletion;
use crate::usecase::prompt::build_prompt;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use serde_json::Value;
use std::sync::Arc;

/// 推薦取得の失敗要因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    /// API 呼び出し自体の失敗（通信・認証・クォータ・空応答）
    #[error("{0}")]
    Api(Error),
    /// 応答に `{ ... }` が見つからない
    #[error("no JSON object in reply")]
    NoPayload,
    /// `{ ... }` が JSON として解析できない
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),
    /// 必須キーが無い（または空）
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

impl RecommendError {
    /// ログ用の短い要因名
    pub fn cause(&self) -> &'static str {
        match self {
            Self::Api(_) => "api",
            Self::NoPayload => "no_payload",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::MissingField(_) => "missing_field",
        }
    }

    /// ユーザーに出す通知。API 失敗のみ通知し、応答不正は黙ってフォールバックする。
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Api(e) => Some(Notice::error(format!(
                "메뉴 추천 중 오류가 발생했습니다: {}",
                e
            ))),
            _ => None,
        }
    }
}

/// 最初の `{` から最後の `}` までを取り出す
///
/// 前後の説明文やコードフェンスは捨てる。`{` が無い、または `}` が `{` より前にしか無い場合は None。
pub fn extract_payload(reply: &str) -> Option<&str> {
    let reply = reply.trim();
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&reply[start..=end])
}

/// 応答テキストから推薦結果を取り出す
pub fn parse_reply(reply: &str) -> Result<RecommendationResult, RecommendError> {
    let payload = extract_payload(reply).ok_or(RecommendError::NoPayload)?;
    let v: Value = serde_json::from_str(payload)
        .map_err(|e| RecommendError::InvalidPayload(e.to_string()))?;
    RecommendationResult::from_object(&v).map_err(RecommendError::MissingField)
}

/// 推薦クライアント
pub struct RecommendationClient {
    llm: Arc<dyn LlmCompletion>,
    log: Arc<dyn Log>,
}

impl RecommendationClient {
    pub fn new(llm: Arc<dyn LlmCompletion>, log: Arc<dyn Log>) -> Self {
        Self { llm, log }
    }

    /// 1 回の外部呼び出しと抽出をまとめた失敗しうる操作
    pub fn fetch(&self, selections: &SelectionRecord) -> Result<RecommendationResult, RecommendError> {
        let prompt = build_prompt(selections);
        let reply = self.llm.complete(&prompt).map_err(RecommendError::Api)?;
        parse_reply(&reply)
    }

    /// 推薦結果と通知を返す。失敗はここで吸収し、必ず有効な結果を返す。
    pub fn recommend(&self, selections: &SelectionRecord) -> Recommendation {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "recommendation requested", "usecase", "recommend")
                .field("provider", self.llm.name())
                .field("mood", selections.mood.to_string()),
        );
        match self.fetch(selections) {
            Ok(result) => {
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "recommendation received", "usecase", "recommend")
                        .field("menu", result.menu.clone()),
                );
                Recommendation::ok(result)
            }
            Err(e) => {
                let _ = self.log.log(
                    &LogRecord::new(
                        LogLevel::Warn,
                        format!("recommendation fell back: {}", e),
                        "usecase",
                        "recommend",
                    )
                    .field("cause", e.cause()),
                );
                Recommendation::fallback(e.notice())
            }
        }
    }

    /// 推薦結果のみを返す（常に成功）
    #[allow(dead_code)]
    pub fn get_recommendation(&self, selections: &SelectionRecord) -> RecommendationResult {
        self.recommend(selections).result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::stub::{sample_selections, StubCompletion};
    use crate::domain::NoticeLevel;
    use common::adapter::NoopLog;

    fn client(replies: Vec<Result<String, Error>>) -> (RecommendationClient, Arc<StubCompletion>) {
        let stub = Arc::new(StubCompletion::new(replies));
        let c = RecommendationClient::new(stub.clone(), Arc::new(NoopLog));
        (c, stub)
    }

    #[test]
    fn test_extract_payload_plain() {
        let s = r#"{"menu":"A"}"#;
        assert_eq!(extract_payload(s), Some(s));
    }

    #[test]
    fn test_extract_payload_with_fence() {
        let s = "```json\n{\"menu\":\"A\"}\n```";
        assert_eq!(extract_payload(s), Some("{\"menu\":\"A\"}"));
    }

    #[test]
    fn test_extract_payload_no_brace() {
        assert_eq!(extract_payload("국밥 드세요"), None);
        assert_eq!(extract_payload("only closing }"), None);
    }

    #[test]
    fn test_extract_payload_reversed_braces() {
        assert_eq!(extract_payload("} then {"), None);
    }

    #[test]
    fn test_brace_extraction_success() {
        let (c, _) = client(vec![Ok(
            "Here you go!\n{\"menu\":\"A\",\"comment\":\"B\",\"place\":\"C\"}\nEnjoy.".to_string(),
        )]);
        let r = c.get_recommendation(&sample_selections());
        assert_eq!(
            r,
            RecommendationResult {
                menu: "A".to_string(),
                comment: "B".to_string(),
                place: "C".to_string(),
            }
        );
    }

    #[test]
    fn test_no_brace_returns_fallback_without_notice() {
        let (c, _) = client(vec![Ok("I recommend noodles.".to_string())]);
        let rec = c.recommend(&sample_selections());
        assert_eq!(rec.result, RecommendationResult::fallback());
        assert_eq!(rec.notice, None);
    }

    #[test]
    fn test_missing_place_returns_fallback() {
        let (c, _) = client(vec![Ok(r#"{"menu":"A","comment":"B"}"#.to_string())]);
        assert_eq!(
            c.fetch(&sample_selections()),
            Err(RecommendError::MissingField("place"))
        );
        let (c, _) = client(vec![Ok(r#"{"menu":"A","comment":"B"}"#.to_string())]);
        assert_eq!(c.get_recommendation(&sample_selections()), RecommendationResult::fallback());
    }

    #[test]
    fn test_invalid_json_returns_fallback() {
        let (c, _) = client(vec![Ok("{menu: A, comment: B}".to_string())]);
        let rec = c.recommend(&sample_selections());
        assert_eq!(rec.result, RecommendationResult::fallback());
        assert!(rec.notice.is_none());
    }

    #[test]
    fn test_braces_in_prose_fool_the_heuristic() {
        let (c, _) = client(vec![Ok(
            "{note} {\"menu\":\"A\",\"comment\":\"B\",\"place\":\"C\"}".to_string(),
        )]);
        assert_eq!(c.get_recommendation(&sample_selections()), RecommendationResult::fallback());
    }

    #[test]
    fn test_api_error_returns_fallback_with_notice() {
        let (c, _) = client(vec![Err(Error::http("Gemini API error: quota exceeded"))]);
        let rec = c.recommend(&sample_selections());
        assert_eq!(rec.result, RecommendationResult::fallback());
        let notice = rec.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(
            notice.message,
            "메뉴 추천 중 오류가 발생했습니다: Gemini API error: quota exceeded"
        );
    }

    #[test]
    fn test_exactly_one_call_per_invocation() {
        let (c, stub) = client(vec![Err(Error::http("down")), Ok("no json".to_string())]);
        c.get_recommendation(&sample_selections());
        assert_eq!(stub.calls(), 1);
        c.get_recommendation(&sample_selections());
        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_prompt_is_sent_as_sole_input() {
        let (c, stub) = client(vec![Ok("x".to_string())]);
        c.get_recommendation(&sample_selections());
        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], build_prompt(&sample_selections()));
    }
}
