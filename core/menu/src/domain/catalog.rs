//! 選択肢カタログ（各入力項目の固定ラベル一覧）
//!
//! ラベルは表示とプロンプトの両方にそのまま使う。一覧の順序が表示順かつ集合の並び順。

use common::error::Error;

/// カタログの 1 項目（単一選択・複数選択ウィジェットの選択肢）
pub trait CatalogOption: Copy + Ord + 'static {
    /// 表示順の全選択肢
    const ALL: &'static [Self];
    /// 入力ウィジェットの見出し
    const QUESTION: &'static str;
    /// エラーメッセージ用の項目名
    const DIMENSION: &'static str;

    fn label(&self) -> &'static str;

    /// ラベルから値を引く。カタログ外のラベルは設定エラー扱い。
    fn from_label(label: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label() == label)
            .ok_or_else(|| {
                Error::invalid_argument(format!("unknown {} label: {}", Self::DIMENSION, label))
            })
    }
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($dimension:literal, $question:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl CatalogOption for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const QUESTION: &'static str = $question;
            const DIMENSION: &'static str = $dimension;

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(self.label())
            }
        }
    };
}

catalog_enum! {
    /// 지금 기분
    Mood("mood", "🧠 지금 기분은?") {
        Stressed => "😤 스트레스 받는다",
        SoSo => "😐 무난함",
        Excited => "😍 설렌다",
        Tired => "😩 피곤하다",
        Drowsy => "😴 나른하다",
        Hyped => "🥳 신난다",
        Down => "😭 우울하다",
        Overwhelmed => "😵 멘붕이다",
    }
}

catalog_enum! {
    /// 먹고 싶은 것
    FoodType("food type", "🍽 먹고 싶은 건?") {
        Soup => "🍜 국물 있는 음식",
        Noodles => "🍝 면 요리",
        Rice => "🍚 밥 요리",
        BreadDessert => "🥖 빵/디저트",
        Meat => "🍖 고기",
        Seafood => "🦞 해산물",
        NotSure => "❓ 모르겠음",
    }
}

catalog_enum! {
    /// 식사 시간대
    TimeSlot("time slot", "🕒 식사 시간대는?") {
        Breakfast => "🌅 아침",
        Lunch => "🌞 점심",
        Dinner => "🌙 저녁",
        LateNight => "🌃 야식",
        Anytime => "🌀 상관없음",
    }
}

catalog_enum! {
    /// 예산
    Budget("budget", "💸 예산은?") {
        AroundTenThousand => "💸 만 원 내외",
        AroundTwentyThousand => "💰 2만 원 내외",
        Flex => "💳 플렉스!",
    }
}

catalog_enum! {
    /// 함께 먹는 사람
    Companion("companion", "👥 누구와 함께 먹나요?") {
        Alone => "🧍 혼자",
        Friends => "🧑‍🤝‍🧑 친구랑",
        Partner => "💑 연인이랑",
        Family => "👨‍👩‍👧 가족이랑",
        Coworkers => "👔 직장 동료랑",
    }
}

catalog_enum! {
    /// 피하고 싶은 음식（複数選択。`Nothing` は「なし」の番兵）
    AvoidFood("avoid food", "🚫 피하고 싶은 음식 (여러 개 선택 가능)") {
        Seafood => "🦐 해산물",
        Meat => "🥩 고기",
        Flour => "🍞 밀가루",
        Spicy => "🧄 자극적인 음식",
        Nothing => "✅ 없음",
    }
}

impl AvoidFood {
    /// 「なし」の番兵か
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_labels<T: CatalogOption>() {
        let labels: HashSet<&str> = T::ALL.iter().map(|v| v.label()).collect();
        assert_eq!(labels.len(), T::ALL.len(), "{} has duplicate labels", T::DIMENSION);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Mood::ALL.len(), 8);
        assert_eq!(FoodType::ALL.len(), 7);
        assert_eq!(TimeSlot::ALL.len(), 5);
        assert_eq!(Budget::ALL.len(), 3);
        assert_eq!(Companion::ALL.len(), 5);
        assert_eq!(AvoidFood::ALL.len(), 5);
    }

    #[test]
    fn test_labels_are_unique() {
        assert_unique_labels::<Mood>();
        assert_unique_labels::<FoodType>();
        assert_unique_labels::<TimeSlot>();
        assert_unique_labels::<Budget>();
        assert_unique_labels::<Companion>();
        assert_unique_labels::<AvoidFood>();
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Mood::from_label("😴 나른하다").unwrap(), Mood::Drowsy);
        assert_eq!(AvoidFood::from_label("✅ 없음").unwrap(), AvoidFood::Nothing);
    }

    #[test]
    fn test_from_unknown_label_is_invalid_argument() {
        let err = Budget::from_label("💎 무제한").unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("budget"));
    }

    #[test]
    fn test_order_follows_catalog() {
        assert!(AvoidFood::Seafood < AvoidFood::Spicy);
        assert!(AvoidFood::Spicy < AvoidFood::Nothing);
        assert_eq!(Mood::ALL[0], Mood::Stressed);
        assert_eq!(FoodType::ALL[6], FoodType::NotSure);
    }

    #[test]
    fn test_serialize_as_label() {
        let json = serde_json::to_string(&TimeSlot::LateNight).unwrap();
        assert_eq!(json, "\"🌃 야식\"");
    }

    #[test]
    fn test_only_nothing_is_sentinel() {
        let sentinels: Vec<_> = AvoidFood::ALL.iter().filter(|a| a.is_sentinel()).collect();
        assert_eq!(sentinels, vec![&AvoidFood::Nothing]);
    }
}
