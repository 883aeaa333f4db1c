//! open-cursor - ノートボールトを Cursor エディタで開くCLIツール
//!
//! 設定レコードと起動コンテキストからシェルコマンド/URLを解決し、
//! OSへ fire-and-forget で発行する

// コアモジュール
pub mod error;
pub mod logging;

// 設定層
pub mod settings;

// 解決層
pub mod context;
pub mod resolver;
pub mod template;

// 発行層
pub mod dispatch;
pub mod vault;

// 公開API
pub use context::LaunchContext;
pub use dispatch::{Launcher, SystemLauncher};
pub use error::{OpenCursorError, Result};
pub use resolver::{resolve_shell_command, resolve_urls, UrlPlan};
pub use settings::{JsonSettingsStore, Settings, SettingsStore};
pub use vault::Vault;
