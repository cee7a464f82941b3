//! menu のユースケース（セッションの対話ループ）
//!
//! 表示は Presenter、入力は ActionSource 経由で行い、状態遷移は SessionFlow に任せる。

use crate::domain::{Notice, Step};
use crate::ports::outbound::{ActionSource, Presenter};
use crate::usecase::recommend::RecommendationClient;
use crate::usecase::session::{Outcome, SessionFlow, Stage};
use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 保存完了の通知
pub const SAVED_MESSAGE: &str = "저장되었습니다! 👍";

/// menu のユースケース（アダプター経由で I/O を行う）
pub struct MenuUseCase {
    client: Arc<RecommendationClient>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

fn display_err(e: anyhow::Error) -> Error {
    Error::io_msg(format!("display failed: {}", e))
}

impl MenuUseCase {
    pub fn new(client: Arc<RecommendationClient>, clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self { client, clock, log }
    }

    /// 新しいセッション（step = home、履歴は空）
    pub fn new_session(&self) -> SessionFlow {
        SessionFlow::new(
            Arc::clone(&self.client),
            Arc::clone(&self.clock),
            Arc::clone(&self.log),
        )
    }

    /// 入力が尽きるまでセッションを回す。終了コードを返す。
    pub fn run_session(
        &self,
        presenter: &dyn Presenter,
        input: &mut dyn ActionSource,
    ) -> Result<i32, Error> {
        let mut flow = self.new_session();
        let _ = self
            .log
            .log(&LogRecord::new(LogLevel::Info, "session started", "usecase", "lifecycle"));

        presenter.show_title().map_err(display_err)?;
        let mut needs_render = true;
        loop {
            if needs_render {
                render(presenter, &flow)?;
            }
            let Some(request) = input.next_action(flow.step())? else {
                break;
            };
            let outcome = flow.apply_input(request);
            needs_render = match outcome {
                Outcome::Moved(_) | Outcome::Refreshed => true,
                Outcome::Saved { .. } => {
                    presenter
                        .notice(&Notice::success(SAVED_MESSAGE))
                        .map_err(display_err)?;
                    presenter
                        .show_history(flow.history().list_all())
                        .map_err(display_err)?;
                    false
                }
                Outcome::Rejected { step, action } => {
                    presenter
                        .notice(&rejected_notice(step, action.as_str()))
                        .map_err(display_err)?;
                    false
                }
            };
        }

        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "session ended", "usecase", "lifecycle")
                .field("history_len", flow.history().len()),
        );
        Ok(0)
    }
}

/// 現在の step を描画する
fn render(presenter: &dyn Presenter, flow: &SessionFlow) -> Result<(), Error> {
    let shown = match flow.stage() {
        Stage::Home => presenter.show_home(),
        // select の入力ウィジェットは ActionSource 側が提示する
        Stage::Select => Ok(()),
        Stage::Result {
            selections,
            recommendation,
        } => presenter
            .show_result(selections, recommendation)
            .and_then(|_| match &recommendation.notice {
                Some(n) => presenter.notice(n),
                None => Ok(()),
            })
            .and_then(|_| {
                if flow.history().is_empty() {
                    Ok(())
                } else {
                    presenter.show_history(flow.history().list_all())
                }
            }),
    };
    shown.map_err(display_err)
}

fn rejected_notice(step: Step, action: &str) -> Notice {
    let accepted = step
        .accepted_actions()
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Notice::warn(format!(
        "'{}' 은(는) 지금 사용할 수 없어요 ({} 단계에서 가능: {})",
        action, step, accepted
    ))
}
