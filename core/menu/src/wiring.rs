//! 配線: 標準アダプタで MenuUseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{FileJsonLog, StdClock, StdEnvResolver, StderrLog, TeeLog};
use common::domain::ModelName;
use common::error::Error;
use common::llm::{create_driver, LlmProvider, ProviderOptions, ProviderType};
use common::ports::outbound::{EnvResolver, Log};

use crate::adapter::ProviderCompletion;
use crate::cli::Config;
use crate::usecase::app::MenuUseCase;
use crate::usecase::recommend::RecommendationClient;

/// ログファイル名（<home>/logs/ 配下）
const LOG_FILE_NAME: &str = "menu.jsonl";

/// 配線済みのアプリ
pub struct App {
    pub menu_use_case: MenuUseCase,
    pub logger: Arc<dyn Log>,
    pub provider: String,
    pub model: String,
}

/// 標準の環境変数解決で組み立てる
pub fn wire_menu(config: &Config) -> Result<App, Error> {
    wire_menu_with(config, &StdEnvResolver)
}

/// 環境変数解決を差し替えて組み立てる
///
/// プロバイダ: -p > gemini。モデル: -m > MENU_MODEL > プロバイダ既定。
pub fn wire_menu_with(config: &Config, env: &dyn EnvResolver) -> Result<App, Error> {
    let logger = build_logger(config, env)?;

    let provider_type = match config.profile.as_deref() {
        None => ProviderType::Gemini,
        Some(name) => ProviderType::from_str(name)
            .ok_or_else(|| Error::invalid_argument(format!("Unknown provider: {}", name)))?,
    };
    let api_key = match provider_type.api_key_env() {
        Some(var) => Some(env.api_key(var)?),
        None => None,
    };
    let model: Option<ModelName> = config.model.clone().or_else(|| env.model_from_env());

    let driver = create_driver(
        provider_type,
        ProviderOptions {
            model: model.map(|m| m.to_string()),
            api_key,
            base_url: None,
            temperature: config.temperature,
        },
    )?;
    let provider = driver.provider().name().to_string();
    let model = driver.provider().model().to_string();

    let completion = Arc::new(ProviderCompletion::new(driver, Arc::clone(&logger)));
    let client = Arc::new(RecommendationClient::new(completion, Arc::clone(&logger)));
    let menu_use_case = MenuUseCase::new(client, Arc::new(StdClock), Arc::clone(&logger));

    Ok(App {
        menu_use_case,
        logger,
        provider,
        model,
    })
}

/// JSONL ファイルログ。-v のときは stderr にも流す。
fn build_logger(config: &Config, env: &dyn EnvResolver) -> Result<Arc<dyn Log>, Error> {
    let path: PathBuf = match &config.log_file {
        Some(p) => p.clone(),
        None => env.resolve_home_dir()?.logs_dir().join(LOG_FILE_NAME),
    };
    let file: Arc<dyn Log> = Arc::new(FileJsonLog::new(path));
    if config.verbose {
        Ok(Arc::new(TeeLog::new(vec![file, Arc::new(StderrLog)])))
    } else {
        Ok(file)
    }
}
