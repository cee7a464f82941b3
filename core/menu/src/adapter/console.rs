//! 端末向け Presenter 実装
//!
//! 画面ブロックは stdout、通知は stderr に出す。書式は render_* の純粋関数に分けてある。

use crate::domain::{
    CatalogOption, HistoryEntry, Notice, NoticeLevel, Recommendation, SelectionRecord,
};
use crate::ports::outbound::Presenter;
use anyhow::Result;
use std::io::{self, Write};

pub const TITLE: &str = "🍜 기분의 한 끼 메뉴판";

const RULE: &str = "────────────────────────────────";

pub fn render_title() -> String {
    format!("{}\n{}\n", TITLE, RULE)
}

pub fn render_home() -> String {
    "\n### 오늘의 기분을 한 끼로 표현해볼까? 🤔\n  [Enter] 오늘의 메뉴 뽑기 🎲   [q] 종료\n".to_string()
}

pub fn render_result(selections: &SelectionRecord, recommendation: &Recommendation) -> String {
    let r = &recommendation.result;
    let mut out = String::new();
    out.push_str("\n### 🎉 오늘의 추천 메뉴\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("  🍽 {}\n", r.menu));
    out.push_str(&format!("  📍 {}\n", r.place));
    out.push_str(RULE);
    out.push('\n');
    let rows = [
        ("🧠 기분", selections.mood.label().to_string()),
        ("🍽 음식 종류", selections.food_type.label().to_string()),
        ("🕒 시간대", selections.time_slot.label().to_string()),
        ("💸 예산", selections.budget.label().to_string()),
        ("👥 함께하는 사람", selections.companion.label().to_string()),
        ("🚫 제외 음식", selections.avoid_foods.display_text()),
    ];
    for (name, value) in rows {
        out.push_str(&format!("  {}: {}\n", name, value));
    }
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("  💬 {}\n", r.comment));
    out.push_str("\n  [r] 다시 추천받기   [h] 처음으로   [w] 오늘의 기분 저장하기   [q] 종료\n");
    out
}

/// 履歴一覧。空なら空文字列。
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n### 📝 저장된 기록\n");
    for e in entries {
        out.push_str(&format!(
            "  • {}\n    기분: {}\n    메뉴: {}\n    \"{}\"\n",
            e.timestamp, e.selections.mood, e.result.menu, e.result.comment
        ));
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let mark = match notice.level {
        NoticeLevel::Error => "❌",
        NoticeLevel::Warn => "⚠️",
        NoticeLevel::Success => "✅",
    };
    format!("{} {}", mark, notice.message)
}

/// 端末 Presenter
#[derive(Debug, Clone, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }

    fn out(&self, block: &str) -> Result<()> {
        if block.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(block.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

impl Presenter for ConsolePresenter {
    fn show_title(&self) -> Result<()> {
        self.out(&render_title())
    }

    fn show_home(&self) -> Result<()> {
        self.out(&render_home())
    }

    fn show_result(&self, selections: &SelectionRecord, recommendation: &Recommendation) -> Result<()> {
        self.out(&render_result(selections, recommendation))
    }

    fn show_history(&self, entries: &[HistoryEntry]) -> Result<()> {
        self.out(&render_history(entries))
    }

    fn notice(&self, notice: &Notice) -> Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", render_notice(notice))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::stub::sample_selections;
    use crate::domain::{AvoidFoods, RecommendationResult};
    use chrono::NaiveDate;

    fn recommendation() -> Recommendation {
        Recommendation::ok(RecommendationResult {
            menu: "얼큰한 짬뽕".to_string(),
            comment: "스트레스엔 매운맛!".to_string(),
            place: "동네 중국집".to_string(),
        })
    }

    #[test]
    fn test_render_result_shows_all_values() {
        let s = sample_selections();
        let out = render_result(&s, &recommendation());
        assert!(out.contains("🍽 얼큰한 짬뽕"));
        assert!(out.contains("📍 동네 중국집"));
        assert!(out.contains("💬 스트레스엔 매운맛!"));
        assert!(out.contains(s.mood.label()));
        assert!(out.contains(s.food_type.label()));
        assert!(out.contains(s.time_slot.label()));
        assert!(out.contains(s.budget.label()));
        assert!(out.contains(s.companion.label()));
    }

    #[test]
    fn test_render_result_empty_avoid_foods_shows_sentinel() {
        let mut s = sample_selections();
        s.avoid_foods = AvoidFoods::default();
        let out = render_result(&s, &recommendation());
        assert!(out.contains("🚫 제외 음식: ✅ 없음"));
    }

    #[test]
    fn test_render_history() {
        assert_eq!(render_history(&[]), "");
        let at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let entry = HistoryEntry::new(at, sample_selections(), recommendation().result);
        let out = render_history(&[entry]);
        assert!(out.contains("📝 저장된 기록"));
        assert!(out.contains("2026-10-17 19:00"));
        assert!(out.contains("메뉴: 얼큰한 짬뽕"));
        assert!(out.contains("\"스트레스엔 매운맛!\""));
    }

    #[test]
    fn test_render_notice() {
        assert_eq!(render_notice(&Notice::success("저장되었습니다! 👍")), "✅ 저장되었습니다! 👍");
        assert!(render_notice(&Notice::error("x")).starts_with("❌"));
    }
}
