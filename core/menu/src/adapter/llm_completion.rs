//! 単発 LLM 完了の標準実装（common の LlmDriver に委譲）

use crate::ports::outbound::LlmCompletion;
use common::error::Error;
use common::llm::{LlmDriver, LlmProvider};
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;
use std::time::Instant;

/// プロバイダ経由で 1 回だけ問い合わせるアダプタ
pub struct ProviderCompletion<P: LlmProvider> {
    driver: LlmDriver<P>,
    log: Arc<dyn Log>,
}

impl<P: LlmProvider> ProviderCompletion<P> {
    pub fn new(driver: LlmDriver<P>, log: Arc<dyn Log>) -> Self {
        Self { driver, log }
    }
}

impl<P: LlmProvider> LlmCompletion for ProviderCompletion<P> {
    fn name(&self) -> &str {
        self.driver.provider().name()
    }

    fn complete(&self, prompt: &str) -> Result<String, Error> {
        let started = Instant::now();
        let result = self.driver.query(prompt, None);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let record = match &result {
            Ok(text) => LogRecord::new(LogLevel::Debug, "llm call finished", "adapter", "llm")
                .field("reply_len", text.chars().count()),
            Err(e) => LogRecord::new(
                LogLevel::Error,
                format!("llm call failed: {}", e),
                "adapter",
                "error",
            ),
        };
        let _ = self.log.log(
            &record
                .field("provider", self.driver.provider().name())
                .field("model", self.driver.provider().model())
                .field("elapsed_ms", elapsed_ms),
        );
        result
    }
}
