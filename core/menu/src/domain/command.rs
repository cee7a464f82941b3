//! menu コマンドの enum（Command Pattern）
//!
//! ヘルプ表示 vs 対話セッションの分岐を enum で明示する。

/// menu の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum MenuCommand {
    /// ヘルプ表示
    Help,
    /// 対話セッション（home → select → result）
    Session,
}
