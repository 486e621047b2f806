//! 追加写入的日志文件，每行带时间戳。
//!
//! 实现 `log::Log`，库里通过 `log` 宏输出的内容也会写到同一个文件里。

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

struct Journal {
    file: Mutex<File>,
    level: LevelFilter,
}

impl Log for Journal {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {:<5} {}", timestamp, record.level(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// 打开（或创建）`path` 并定位到末尾，把它注册为全局日志。
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    log::set_boxed_logger(Box::new(Journal {
        file: Mutex::new(file),
        level,
    }))
    .context("logger already installed")?;
    log::set_max_level(level);
    Ok(())
}
