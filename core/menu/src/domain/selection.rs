//! 選択レコード（プロンプト生成の入力となる 6 項目）

use crate::domain::catalog::{AvoidFood, Budget, CatalogOption, Companion, FoodType, Mood, TimeSlot};
use serde::Serialize;
use std::collections::BTreeSet;

/// 「피하고 싶은 음식」の選択集合
///
/// カタログ順に並ぶ集合。番兵（✅ 없음）が含まれていれば除外指定なしとして扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvoidFoods(BTreeSet<AvoidFood>);

impl AvoidFoods {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 実際に除外すべき食べ物。空集合または番兵を含む場合は空。
    pub fn exclusions(&self) -> Vec<AvoidFood> {
        if self.0.iter().any(|a| a.is_sentinel()) {
            return Vec::new();
        }
        self.0.iter().copied().collect()
    }

    /// 結果画面での表示用。未選択なら番兵ラベル、それ以外は選択ラベルをそのまま連結する。
    pub fn display_text(&self) -> String {
        if self.is_empty() {
            return AvoidFood::Nothing.label().to_string();
        }
        self.0
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<AvoidFood> for AvoidFoods {
    fn from_iter<I: IntoIterator<Item = AvoidFood>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// ユーザーが選んだ 6 項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRecord {
    pub mood: Mood,
    pub food_type: FoodType,
    pub time_slot: TimeSlot,
    pub budget: Budget,
    pub companion: Companion,
    pub avoid_foods: AvoidFoods,
}
