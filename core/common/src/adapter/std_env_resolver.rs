//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{HomeDir, ModelName};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// 環境変数の取得関数からホームディレクトリを解決する（テストでは HashMap を渡す）
pub(crate) fn home_dir_from(get: impl Fn(&str) -> Option<String>) -> Result<HomeDir, Error> {
    if let Some(home) = non_empty(get("MENU_HOME")) {
        return Ok(HomeDir::new(PathBuf::from(home)));
    }

    let config_base = non_empty(get("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| non_empty(get("HOME")).map(|h| PathBuf::from(h).join(".config")))
        .ok_or_else(|| Error::env("HOME is not set"))?;

    Ok(HomeDir::new(config_base.join("menu")))
}

impl EnvResolver for StdEnvResolver {
    fn api_key(&self, var: &str) -> Result<String, Error> {
        non_empty(env::var(var).ok())
            .ok_or_else(|| Error::env(format!("{} environment variable is not set", var)))
    }

    fn model_from_env(&self) -> Option<ModelName> {
        non_empty(env::var("MENU_MODEL").ok()).map(ModelName::new)
    }

    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        home_dir_from(|k| env::var(k).ok())
    }
}
