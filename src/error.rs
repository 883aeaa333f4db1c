//! エラーハンドリングシステム
//!
//! open-cursor 全体で使用される統一されたエラー型とユーティリティを定義
//! 致命的なエラーは存在しない方針：ディスパッチ失敗はログのみで回復不要

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum OpenCursorError {
    /// 設定エラー
    #[error("Configuration error")]
    Config(#[from] ConfigError),

    /// ディスパッチエラー
    #[error("Dispatch failed")]
    Dispatch(#[from] DispatchError),

    /// パスエラー
    #[error("Path error: {0}")]
    Path(String),

    /// コマンドライン引数エラー
    #[error("Usage error: {0}")]
    Usage(String),
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid settings file {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("No user configuration directory available")]
    NoConfigDir,

    #[error("Unknown settings key: {key}")]
    UnknownKey { key: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// ディスパッチ固有のエラー
///
/// 外部プロセス起動と URL オープンのみが実行時に失敗しうる
#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error("exec error: `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("url open error: `{url}`: {message}")]
    UrlOpen { url: String, message: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, OpenCursorError>;

/// 各モジュール固有のResult型
pub mod config {
    pub type Result<T> = std::result::Result<T, super::ConfigError>;
}

pub mod dispatch {
    pub type Result<T> = std::result::Result<T, super::DispatchError>;
}

/// パニックハンドラの設定
///
/// パニックは即座に終了（ホストアプリケーションを巻き込まないCLIなので安全）
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .unwrap_or_else(|| std::panic::Location::caller());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
        std::process::exit(1);
    }));
}
