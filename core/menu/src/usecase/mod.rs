//! ユースケース（ポート経由で I/O を行う）

pub mod app;
pub mod prompt;
pub mod recommend;
pub mod session;
