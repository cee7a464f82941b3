//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::driver::LlmDriver;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::LlmProvider;
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini generateContent
    Gemini,
    /// Echo（API を呼ばず固定応答）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }

    /// API キーを読む環境変数名（不要なら None）
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Echo => None,
        }
    }

    pub fn all() -> &'static [ProviderType] {
        &[Self::Gemini, Self::Echo]
    }
}

/// プロバイダ生成時のオプション
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Gemini(GeminiProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Gemini(p) => p.model(),
            Self::Echo(p) => p.model(),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Gemini(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Gemini(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }

    fn make_request_payload(
        &self,
        query: &str,
        system_instruction: Option<&str>,
    ) -> Result<Value, Error> {
        match self {
            Self::Gemini(p) => p.make_request_payload(query, system_instruction),
            Self::Echo(p) => p.make_request_payload(query, system_instruction),
        }
    }
}

/// プロバイダを作成
///
/// Gemini は API キーが必須。無い場合は Env エラー（起動不可）を返す。
pub fn create_provider(
    provider_type: ProviderType,
    options: ProviderOptions,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::Gemini => {
            let api_key = options
                .api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| Error::env("GEMINI_API_KEY environment variable is not set"))?;
            let mut p = GeminiProvider::new(options.model, api_key)
                .with_temperature(options.temperature);
            if let Some(url) = options.base_url {
                p = p.with_base_url(url);
            }
            Ok(AnyProvider::Gemini(p))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

/// ドライバーを作成
pub fn create_driver(
    provider_type: ProviderType,
    options: ProviderOptions,
) -> Result<LlmDriver<AnyProvider>, Error> {
    let provider = create_provider(provider_type, options)?;
    Ok(LlmDriver::new(provider))
}
