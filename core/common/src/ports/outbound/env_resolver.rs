//! 環境変数解決 Outbound ポート
//!
//! API キー・モデル名・ホームディレクトリを環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{HomeDir, ModelName};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 指定した環境変数から API キーを取得する。未設定・空はエラー（起動不可）。
    fn api_key(&self, var: &str) -> Result<String, Error>;

    /// MENU_MODEL によるモデル指定（未設定なら None）
    fn model_from_env(&self) -> Option<ModelName>;

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. MENU_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/menu（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/menu
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;
}
