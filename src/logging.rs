//! ロギングシステム
//!
//! `log` ファサードの背後で固定タグ付きの診断出力を stderr へ流す
//! ディスパッチ失敗は UI に出さずここへ記録するだけ（リトライなし）

use log::{Level, LevelFilter, Log, Metadata, Record};

/// 診断出力に付与する固定タグ
pub const LOG_TAG: &str = "[open-cursor]";

/// stderr へ出力するロガー
#[derive(Debug)]
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    fn tag(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {}: {}",
                Self::tag(record.level()),
                LOG_TAG,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// グローバルロガーを設置する
///
/// `--verbose` 指定時は解決済みコマンド/URL のデバッグ出力も有効になる。
/// 二重初期化（テスト実行時など）はエラーとせず無視する。
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if log::set_boxed_logger(Box::new(CliLogger::new(level))).is_ok() {
        log::set_max_level(level);
    }
}
