//! ユーザー操作の Outbound ポート
//!
//! select では 6 項目の入力ウィジェットを提示し、集めた選択を Action::Submit にして返す。
//! コマンド語だけの入力は Input::Word のまま渡し、受付可否はセッション側が決める。

use crate::domain::{Input, Step};
use common::error::Error;

/// 次のユーザー操作を取得する
pub trait ActionSource {
    /// 現在の step に対する次の要求。入力が尽きた（終了）なら None。
    fn next_action(&mut self, step: Step) -> Result<Option<Input>, Error>;
}
