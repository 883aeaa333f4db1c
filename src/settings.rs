//! 設定管理
//!
//! 永続化されるフラットな設定レコードと、注入可能な読み書きコラボレータ
//! キー名は従来の保存形式（camelCase）を踏襲し、既存の設定ファイルを
//! そのまま読めるようにする

use crate::error::config::Result;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// 既定のシェルコマンドテンプレート
pub const DEFAULT_EXECUTE_TEMPLATE: &str = r#"cursor "{{vaultpath}}" "{{vaultpath}}/{{filepath}}""#;

/// 既定のワークスペースパステンプレート
pub const DEFAULT_WORKSPACE_PATH: &str = "{{vaultpath}}";

/// 編集可能なフィールドキーの一覧（`config` サブコマンド向け）
pub const FIELD_KEYS: &[&str] = &[
    "ribbonIcon",
    "ribbonCommandUsesCursor",
    "showFileContextMenuItem",
    "executeTemplate",
    "openFile",
    "workspacePath",
    "useUrlInsiders",
];

/// 設定レコード
///
/// * `ribbon_icon` / `show_file_context_menu_item` はホスト統合向けの
///   表示フラグで、CLI 単体では読み出されない（データとして保持のみ）
/// * `ribbon_command_uses_cursor` はモード未指定時のディスパッチ方式
///   （true = シェルコマンド / false = URL）
/// * `use_url_insiders` は URL スキームの切り替え
///   （true = `cursor-insiders://` / false = `cursor://`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub ribbon_icon: bool,
    pub ribbon_command_uses_cursor: bool,
    pub show_file_context_menu_item: bool,
    pub execute_template: String,
    pub open_file: bool,
    pub workspace_path: String,
    pub use_url_insiders: bool,

    /// 既知でないキーは保存時まで保持する（将来フィールドとの互換）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ribbon_icon: true,
            ribbon_command_uses_cursor: true,
            show_file_context_menu_item: true,
            execute_template: DEFAULT_EXECUTE_TEMPLATE.to_string(),
            open_file: true,
            workspace_path: DEFAULT_WORKSPACE_PATH.to_string(),
            use_url_insiders: false,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// 使用時点でのシェルコマンドテンプレート
    ///
    /// 空白のみの入力は既定値に差し替える（設定ファイルを手で編集した
    /// 場合もここで必ず非空になる）
    pub fn effective_execute_template(&self) -> &str {
        let trimmed = self.execute_template.trim();
        if trimmed.is_empty() {
            DEFAULT_EXECUTE_TEMPLATE
        } else {
            trimmed
        }
    }

    /// 使用時点でのワークスペースパステンプレート
    pub fn effective_workspace_path(&self) -> &str {
        let trimmed = self.workspace_path.trim();
        if trimmed.is_empty() {
            DEFAULT_WORKSPACE_PATH
        } else {
            trimmed
        }
    }

    /// フィールドキーから現在値を文字列で取得する
    pub fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "ribbonIcon" => Some(self.ribbon_icon.to_string()),
            "ribbonCommandUsesCursor" => Some(self.ribbon_command_uses_cursor.to_string()),
            "showFileContextMenuItem" => Some(self.show_file_context_menu_item.to_string()),
            "executeTemplate" => Some(self.execute_template.clone()),
            "openFile" => Some(self.open_file.to_string()),
            "workspacePath" => Some(self.workspace_path.clone()),
            "useUrlInsiders" => Some(self.use_url_insiders.to_string()),
            _ => None,
        }
    }

    /// フィールドキーへ値を設定する
    ///
    /// 文字列フィールドへの空白のみの入力は既定値へ置き換える
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "ribbonIcon" => self.ribbon_icon = parse_bool(key, value)?,
            "ribbonCommandUsesCursor" => {
                self.ribbon_command_uses_cursor = parse_bool(key, value)?
            }
            "showFileContextMenuItem" => {
                self.show_file_context_menu_item = parse_bool(key, value)?
            }
            "executeTemplate" => {
                let trimmed = value.trim();
                self.execute_template = if trimmed.is_empty() {
                    DEFAULT_EXECUTE_TEMPLATE.to_string()
                } else {
                    trimmed.to_string()
                };
            }
            "openFile" => self.open_file = parse_bool(key, value)?,
            "workspacePath" => {
                let trimmed = value.trim();
                self.workspace_path = if trimmed.is_empty() {
                    DEFAULT_WORKSPACE_PATH.to_string()
                } else {
                    trimmed.to_string()
                };
            }
            "useUrlInsiders" => self.use_url_insiders = parse_bool(key, value)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// 設定の読み書きコラボレータ
///
/// 永続化の形式と場所はこのトレイトの実装に委譲する
pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// JSONファイルによる設定ストア
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// ユーザー設定ディレクトリ配下の既定の置き場所
    /// （例: `~/.config/open-cursor/settings.json`）
    pub fn default_location() -> Result<Self> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(base.join("open-cursor").join("settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: &std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    /// 既定値の上にファイル内容をマージして読み込む
    ///
    /// * ファイルが無ければ純粋な既定値
    /// * 欠けているキーは既定値で補完（`serde(default)`）
    /// * 未知のキーは `extra` に保持され保存時に書き戻される
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(&e))?;
        serde_json::from_str(&text).map_err(|e| ConfigError::InvalidFile {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(&e))?;
        }

        let text = serde_json::to_string_pretty(settings).map_err(|e| ConfigError::InvalidFile {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::write(&self.path, text).map_err(|e| self.io_error(&e))
    }
}
