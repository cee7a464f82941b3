//! Outbound ポート: アプリが外界（LLM・表示・入力）を使うための trait

pub mod action_source;
pub mod llm_completion;
pub mod presenter;

pub use action_source::ActionSource;
pub use llm_completion::LlmCompletion;
pub use presenter::Presenter;
