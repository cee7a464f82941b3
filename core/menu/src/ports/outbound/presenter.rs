//! 表示の Outbound ポート
//!
//! 描画は表示側の責務。usecase はドメイン値を渡すだけで、書式は実装に任せる。

use crate::domain::{HistoryEntry, Notice, Recommendation, SelectionRecord};
use anyhow::Result;

/// 画面表示の抽象
pub trait Presenter: Send + Sync {
    /// タイトル（セッション開始時に 1 回）
    fn show_title(&self) -> Result<()>;

    /// home 画面
    fn show_home(&self) -> Result<()>;

    /// result 画面（推薦カード・6 項目・コメント）
    fn show_result(&self, selections: &SelectionRecord, recommendation: &Recommendation) -> Result<()>;

    /// 保存済みの履歴一覧（空なら何も出さない実装でよい）
    fn show_history(&self, entries: &[HistoryEntry]) -> Result<()>;

    /// 非致命的な通知
    fn notice(&self, notice: &Notice) -> Result<()>;
}
