//! 保存した推薦の履歴（セッション内のみ、追記専用）

use crate::domain::recommendation::RecommendationResult;
use crate::domain::selection::SelectionRecord;
use serde::Serialize;

/// タイムスタンプの書式（ローカル時刻、分まで）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 履歴 1 件。追加後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub selections: SelectionRecord,
    pub result: RecommendationResult,
}

impl HistoryEntry {
    pub fn new(
        at: chrono::NaiveDateTime,
        selections: SelectionRecord,
        result: RecommendationResult,
    ) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            selections,
            result,
        }
    }
}

/// 履歴ストア
///
/// 追加順を保持し、上限・重複排除・削除・変更の手段は持たない。
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 末尾に追加する
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// 追加順の全件
    pub fn list_all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
