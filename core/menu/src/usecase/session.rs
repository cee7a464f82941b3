//! セッションの状態遷移（home → select → result）
//!
//! 1 セッション = 1 インスタンス。グローバル状態は持たず、呼び出し側が明示的に保持する。
//! 遷移は同期的で、受け付けない操作は状態を変えずに Rejected を返す。

use crate::domain::{
    Action, ActionKind, History, HistoryEntry, Input, Recommendation, SelectionRecord, Step,
};
use crate::usecase::recommend::RecommendationClient;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 現在の段階。result は表示中の選択と推薦を持つ。
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Home,
    Select,
    Result {
        selections: SelectionRecord,
        recommendation: Recommendation,
    },
}

impl Stage {
    pub fn step(&self) -> Step {
        match self {
            Self::Home => Step::Home,
            Self::Select => Step::Select,
            Self::Result { .. } => Step::Result,
        }
    }
}

/// 操作を適用した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// step が変わった（result への遷移では推薦取得まで完了している）
    Moved(Step),
    /// retry で表示中の推薦を取り直した
    Refreshed,
    /// 履歴に保存した（保存後の件数）
    Saved { count: usize },
    /// この step では受け付けない操作（状態は不変）
    Rejected { step: Step, action: ActionKind },
}

/// 1 セッション分の状態と遷移
pub struct SessionFlow {
    stage: Stage,
    history: History,
    client: Arc<RecommendationClient>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl SessionFlow {
    /// step = home、履歴は空で開始する
    pub fn new(client: Arc<RecommendationClient>, clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self {
            stage: Stage::Home,
            history: History::new(),
            client,
            clock,
            log,
        }
    }

    pub fn step(&self) -> Step {
        self.stage.step()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// 操作を 1 つ適用する。受付可否は `Step::accepts` の表で決める。
    pub fn apply(&mut self, action: Action) -> Outcome {
        let from = self.step();
        let kind = action.kind();
        if !from.accepts(kind) {
            return self.reject(kind);
        }
        // 各操作を受け付ける step は 1 つだけなので、ここでは操作だけで分岐できる
        let outcome = match action {
            Action::Start => {
                self.stage = Stage::Select;
                Outcome::Moved(Step::Select)
            }
            Action::Submit(selections) => {
                let recommendation = self.client.recommend(&selections);
                self.stage = Stage::Result {
                    selections,
                    recommendation,
                };
                Outcome::Moved(Step::Result)
            }
            Action::Retry => {
                self.refresh();
                Outcome::Refreshed
            }
            Action::Restart => {
                self.stage = Stage::Home;
                Outcome::Moved(Step::Home)
            }
            Action::Save => {
                self.save();
                Outcome::Saved {
                    count: self.history.len(),
                }
            }
        };
        self.log_outcome(from, kind, &outcome);
        outcome
    }

    /// 入力側の要求を適用する。操作語だけの submit は状態を変えずに拒否する。
    pub fn apply_input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Action(action) => self.apply(action),
            Input::Word(kind) => match Action::from_kind(kind) {
                Some(action) => self.apply(action),
                None => self.reject(kind),
            },
        }
    }

    fn reject(&self, kind: ActionKind) -> Outcome {
        let from = self.step();
        let outcome = Outcome::Rejected {
            step: from,
            action: kind,
        };
        self.log_outcome(from, kind, &outcome);
        outcome
    }

    /// 同じ選択で推薦を取り直し、表示中の推薦を置き換える
    fn refresh(&mut self) {
        if let Stage::Result {
            selections,
            recommendation,
        } = &mut self.stage
        {
            *recommendation = self.client.recommend(selections);
        }
    }

    /// 表示中の選択と推薦を現在時刻で履歴に追加する
    fn save(&mut self) {
        if let Stage::Result {
            selections,
            recommendation,
        } = &self.stage
        {
            self.history.append(HistoryEntry::new(
                self.clock.now(),
                selections.clone(),
                recommendation.result.clone(),
            ));
        }
    }

    fn log_outcome(&self, from: Step, kind: ActionKind, outcome: &Outcome) {
        let (level, message) = match outcome {
            Outcome::Rejected { .. } => (LogLevel::Warn, "action rejected"),
            _ => (LogLevel::Debug, "action applied"),
        };
        let _ = self.log.log(
            &LogRecord::new(level, message, "usecase", "flow")
                .field("from", from.as_str())
                .field("action", kind.as_str())
                .field("to", self.step().as_str())
                .field("history_len", self.history.len()),
        );
    }
}
