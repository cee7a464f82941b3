//! テスト用: 固定応答の LlmCompletion・固定時刻の Clock・記録する Presenter・台本どおりの ActionSource

#[cfg(test)]
mod stub {
    use crate::domain::{
        Action, AvoidFood, AvoidFoods, Budget, Companion, FoodType, HistoryEntry, Input, Mood,
        Notice, Recommendation, SelectionRecord, Step, TimeSlot,
    };
    use crate::ports::outbound::{ActionSource, LlmCompletion, Presenter};
    use chrono::{NaiveDate, NaiveDateTime};
    use common::error::Error;
    use common::ports::outbound::Clock;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// 用意した応答を順に返す。尽きたら HTTP エラー。
    pub struct StubCompletion {
        replies: Mutex<VecDeque<Result<String, Error>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubCompletion {
        pub fn new(replies: Vec<Result<String, Error>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl LlmCompletion for StubCompletion {
        fn name(&self) -> &str {
            "stub"
        }

        fn complete(&self, prompt: &str) -> Result<String, Error> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::http("stub: no more replies")))
        }
    }

    pub struct FixedClock(NaiveDateTime);

    impl FixedClock {
        pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> Self {
            Self(
                NaiveDate::from_ymd_opt(year, month, day)
                    .unwrap()
                    .and_hms_opt(hour, min, 0)
                    .unwrap(),
            )
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    pub fn sample_selections() -> SelectionRecord {
        SelectionRecord {
            mood: Mood::Stressed,
            food_type: FoodType::Soup,
            time_slot: TimeSlot::Dinner,
            budget: Budget::AroundTenThousand,
            companion: Companion::Alone,
            avoid_foods: [AvoidFood::Seafood].into_iter().collect::<AvoidFoods>(),
        }
    }

    /// Presenter に渡された内容
    #[derive(Debug, Clone, PartialEq)]
    pub enum Rendered {
        Title,
        Home,
        Result {
            selections: SelectionRecord,
            recommendation: Recommendation,
        },
        History(Vec<HistoryEntry>),
        Notice(Notice),
    }

    #[derive(Default)]
    pub struct RecordingPresenter {
        rendered: Mutex<Vec<Rendered>>,
    }

    impl RecordingPresenter {
        fn push(&self, r: Rendered) -> anyhow::Result<()> {
            self.rendered.lock().unwrap().push(r);
            Ok(())
        }

        /// 受け取ったままの全件
        pub fn raw(&self) -> Vec<Rendered> {
            self.rendered.lock().unwrap().clone()
        }

        /// 空の履歴表示は含めない
        pub fn rendered(&self) -> Vec<Rendered> {
            self.rendered
                .lock()
                .unwrap()
                .iter()
                .filter(|r| !matches!(r, Rendered::History(h) if h.is_empty()))
                .cloned()
                .collect()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.rendered()
                .into_iter()
                .filter_map(|r| match r {
                    Rendered::Notice(n) => Some(n),
                    _ => None,
                })
                .collect()
        }

        pub fn results(&self) -> Vec<Recommendation> {
            self.rendered()
                .into_iter()
                .filter_map(|r| match r {
                    Rendered::Result { recommendation, .. } => Some(recommendation),
                    _ => None,
                })
                .collect()
        }

        pub fn histories(&self) -> Vec<Vec<HistoryEntry>> {
            self.rendered()
                .into_iter()
                .filter_map(|r| match r {
                    Rendered::History(h) => Some(h),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for RecordingPresenter {
        fn show_title(&self) -> anyhow::Result<()> {
            self.push(Rendered::Title)
        }

        fn show_home(&self) -> anyhow::Result<()> {
            self.push(Rendered::Home)
        }

        fn show_result(
            &self,
            selections: &SelectionRecord,
            recommendation: &Recommendation,
        ) -> anyhow::Result<()> {
            self.push(Rendered::Result {
                selections: selections.clone(),
                recommendation: recommendation.clone(),
            })
        }

        fn show_history(&self, entries: &[HistoryEntry]) -> anyhow::Result<()> {
            self.push(Rendered::History(entries.to_vec()))
        }

        fn notice(&self, notice: &Notice) -> anyhow::Result<()> {
            self.push(Rendered::Notice(notice.clone()))
        }
    }

    /// 用意した要求を順に返す。尽きたら None（終了）。
    pub struct ScriptedInput {
        inputs: VecDeque<Input>,
        pub steps_seen: Vec<Step>,
    }

    impl ScriptedInput {
        pub fn new(actions: Vec<Action>) -> Self {
            Self::from_inputs(actions.into_iter().map(Input::Action).collect())
        }

        pub fn from_inputs(inputs: Vec<Input>) -> Self {
            Self {
                inputs: inputs.into(),
                steps_seen: Vec::new(),
            }
        }
    }

    impl ActionSource for ScriptedInput {
        fn next_action(&mut self, step: Step) -> Result<Option<Input>, Error> {
            self.steps_seen.push(step);
            Ok(self.inputs.pop_front())
        }
    }
}

#[cfg(test)]
pub use stub::{
    sample_selections, FixedClock, Rendered, RecordingPresenter, ScriptedInput, StubCompletion,
};
