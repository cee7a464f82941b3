//! Log ポートの実装群
//!
//! - FileJsonLog: ファイルへ JSONL で追記
//! - StderrLog: --verbose 時に stderr へ 1 行要約を出す
//! - TeeLog: 複数の Log へ同じレコードを流す
//! - NoopLog: 何もしない（テスト用）

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// ファイルへ JSONL を追記する Log 実装
pub struct FileJsonLog {
    path: PathBuf,
    // 同一プロセス内で行が混ざらないよう書き込みを直列化する
    lock: Mutex<()>,
}

impl FileJsonLog {
    /// ログファイルパスへ追記する logger を生成する。
    /// 親ディレクトリが無ければ作成する（初回書き込み時）。
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::system("log lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::io_msg(format!("create {:?}: {}", parent, e)))?;
            }
        }
        let mut w = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io_msg(format!("open {:?}: {}", self.path, e)))?;
        let line = serde_json::to_string(record).map_err(|e| Error::Json(e.to_string()))?;
        w.write_all(line.as_bytes())
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.write_all(b"\n")
            .map_err(|e| Error::io_msg(e.to_string()))?;
        w.flush().map_err(|e| Error::io_msg(e.to_string()))?;
        Ok(())
    }
}

/// stderr へ要約を出す Log 実装（--verbose 用）
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut line = format!("[{}] {}", record.level.as_str(), record.message);
        if let Some(ref fields) = record.fields {
            let rendered = serde_json::to_string(fields).unwrap_or_default();
            line.push(' ');
            line.push_str(&rendered);
        }
        eprintln!("{}", line);
        Ok(())
    }
}

/// 複数の Log へ書き出す。最初のエラーを返すが、残りへの書き出しは続ける。
pub struct TeeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for l in &self.logs {
            if let Err(e) = l.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 何も出力しない Log 実装（テスト用）
#[derive(Debug, Clone, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}
