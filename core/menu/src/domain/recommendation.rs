//! 推薦結果（menu / comment / place の 3 項目）

use crate::domain::notice::Notice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FALLBACK_MENU: &str = "얼큰한 순대국밥 + 김치";
const FALLBACK_COMMENT: &str = "메뉴 추천 중 오류가 발생했어요. 대신 든든한 국밥 한 그릇 어떠세요?";
const FALLBACK_PLACE: &str = "24시간 운영하는 따뜻한 국밥집";

/// 推薦結果。3 項目とも空でない文字列であることが不変条件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub menu: String,
    pub comment: String,
    pub place: String,
}

impl RecommendationResult {
    /// 生成・解析に失敗したときに使う固定の結果
    pub fn fallback() -> Self {
        Self {
            menu: FALLBACK_MENU.to_string(),
            comment: FALLBACK_COMMENT.to_string(),
            place: FALLBACK_PLACE.to_string(),
        }
    }

    /// JSON オブジェクトから 3 項目を取り出す。
    ///
    /// 欠けている（または文字列でない・空の）最初の項目名を Err で返す。余分なキーは無視する。
    pub fn from_object(v: &Value) -> Result<Self, &'static str> {
        let field = |key: &'static str| -> Result<String, &'static str> {
            v.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .ok_or(key)
        };
        Ok(Self {
            menu: field("menu")?,
            comment: field("comment")?,
            place: field("place")?,
        })
    }
}

/// 推薦結果と、取得時にユーザーへ出す通知（あれば）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub result: RecommendationResult,
    pub notice: Option<Notice>,
}

impl Recommendation {
    pub fn ok(result: RecommendationResult) -> Self {
        Self {
            result,
            notice: None,
        }
    }

    pub fn fallback(notice: Option<Notice>) -> Self {
        Self {
            result: RecommendationResult::fallback(),
            notice,
        }
    }
}
