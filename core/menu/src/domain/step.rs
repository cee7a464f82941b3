//! 画面ステップとユーザー操作（状態遷移表）
//!
//! | step   | 受け付ける操作           |
//! |--------|--------------------------|
//! | home   | start                    |
//! | select | submit                   |
//! | result | retry / restart / save   |
//!
//! それ以外の操作は何もせず拒否する。

use crate::domain::selection::SelectionRecord;

/// 画面ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Home,
    Select,
    Result,
}

impl Step {
    /// この step で受け付ける操作
    pub fn accepted_actions(&self) -> &'static [ActionKind] {
        match self {
            Self::Home => &[ActionKind::Start],
            Self::Select => &[ActionKind::Submit],
            Self::Result => &[ActionKind::Retry, ActionKind::Restart, ActionKind::Save],
        }
    }

    pub fn accepts(&self, kind: ActionKind) -> bool {
        self.accepted_actions().contains(&kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Select => "select",
            Self::Result => "result",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 操作の種類（ペイロードなし）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Start,
    Submit,
    Retry,
    Restart,
    Save,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Submit => "submit",
            Self::Retry => "retry",
            Self::Restart => "restart",
            Self::Save => "save",
        }
    }

    pub fn all() -> &'static [ActionKind] {
        &[
            Self::Start,
            Self::Submit,
            Self::Retry,
            Self::Restart,
            Self::Save,
        ]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ユーザー操作（submit は入力ウィジェットで集めた選択を運ぶ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Submit(SelectionRecord),
    Retry,
    Restart,
    Save,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Start => ActionKind::Start,
            Self::Submit(_) => ActionKind::Submit,
            Self::Retry => ActionKind::Retry,
            Self::Restart => ActionKind::Restart,
            Self::Save => ActionKind::Save,
        }
    }

    /// ペイロードを持たない操作を種類から組み立てる。submit は選択が要るので None。
    pub fn from_kind(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::Start => Some(Self::Start),
            ActionKind::Submit => None,
            ActionKind::Retry => Some(Self::Retry),
            ActionKind::Restart => Some(Self::Restart),
            ActionKind::Save => Some(Self::Save),
        }
    }
}

/// 入力側から届く 1 件の要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// 組み立て済みの操作
    Action(Action),
    /// 操作語のみ（端末のコマンド入力）。選択を伴わない submit は受け付けられない。
    Word(ActionKind),
}
