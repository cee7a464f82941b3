//! 推薦プロンプトの組み立て（純粋関数）

use crate::domain::{CatalogOption, SelectionRecord};

/// 除外指定なしのときにプロンプトへ入れる文言
pub const NO_EXCLUSIONS: &str = "없음";

/// 「피하고 싶은 음식」の条件文。空または番兵入りなら "없음"。
pub fn avoid_foods_clause(selections: &SelectionRecord) -> String {
    let exclusions = selections.avoid_foods.exclusions();
    if exclusions.is_empty() {
        return NO_EXCLUSIONS.to_string();
    }
    exclusions
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 選択レコードから LLM へのプロンプトを作る
///
/// 役割 → 6 条件 → 3 キーの JSON 形式 → JSON 以外を禁じる注意事項、の順。
/// 同じ入力からは常に同じ文字列を返す。
pub fn build_prompt(selections: &SelectionRecord) -> String {
    format!(
        r#"당신은 감성 식단 추천 AI입니다.
아래 조건을 기반으로 메뉴를 추천하고, 정확히 아래 JSON 형식으로만 응답해주세요.
다른 말은 하지 말고 오직 JSON 형식으로만 응답하세요.

조건:
- 기분: {mood}
- 먹고 싶은 것: {food_type}
- 식사 시간대: {time_slot}
- 예산: {budget}
- 함께 먹는 사람: {companion}
- 피하고 싶은 음식: {avoid_foods}

응답 형식:
{{
  "menu": "구체적인 메뉴명을 입력하세요",
  "comment": "기분과 상황에 맞는 재치있는 한 줄 코멘트",
  "place": "추천하는 식당/장소 유형 (예: 포장마차, 프랑스 레스토랑, 동네 맛집 등)"
}}

주의사항:
1. 반드시 위의 JSON 형식으로만 응답하세요
2. 다른 설명이나 텍스트를 추가하지 마세요
3. 메뉴는 구체적으로 작성해주세요 (예: "얼큰한 순대국밥 + 김치")
4. place는 메뉴와 상황에 어울리는 장소를 추천해주세요
"#,
        mood = selections.mood.label(),
        food_type = selections.food_type.label(),
        time_slot = selections.time_slot.label(),
        budget = selections.budget.label(),
        companion = selections.companion.label(),
        avoid_foods = avoid_foods_clause(selections),
    )
}
