//! 起動コンテキスト
//!
//! 1回の起動ごとに構築される一時レコード。状態は持たず、
//! 設定レコードと組になってコマンド/URL解決の入力になる

use std::path::Path;

/// テンプレート置換へ渡す起動時情報
///
/// 行・桁は 1 始まり。エディタ側の 0 始まりカーソルは
/// [`with_editor_cursor`](LaunchContext::with_editor_cursor) で変換する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    /// ボールトルートの絶対パス（呼び出し側が非空を保証）
    pub vault_path: String,
    /// ボールト相対のファイルパス（対象なしのときは空）
    pub file_path: String,
    /// ファイルの親フォルダ（file_path から導出、なければ空）
    pub folder_path: String,
    /// カーソル行（1始まり）
    pub line: u32,
    /// カーソル桁（1始まり）
    pub ch: u32,
}

impl LaunchContext {
    pub fn new<S: Into<String>>(vault_path: S) -> Self {
        Self {
            vault_path: vault_path.into(),
            file_path: String::new(),
            folder_path: String::new(),
            line: 1,
            ch: 1,
        }
    }

    /// 対象ファイルを設定し、親フォルダを導出する
    pub fn with_file(mut self, file_path: &str) -> Self {
        self.folder_path = Path::new(file_path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.file_path = file_path.to_string();
        self
    }

    /// エディタの 0 始まりカーソル位置を取り込む（1 始まりへ変換）
    pub fn with_editor_cursor(mut self, line: u32, ch: u32) -> Self {
        self.line = line + 1;
        self.ch = ch + 1;
        self
    }

    /// 1 始まりのカーソル位置を直接設定する（0 は 1 に切り上げ）
    pub fn with_cursor(mut self, line: u32, ch: u32) -> Self {
        self.line = line.max(1);
        self.ch = ch.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_defaults() {
        let context = LaunchContext::new("/vault");
        assert_eq!(context.vault_path, "/vault");
        assert_eq!(context.file_path, "");
        assert_eq!(context.folder_path, "");
        assert_eq!(context.line, 1);
        assert_eq!(context.ch, 1);
    }

    #[test]
    fn test_folder_path_derivation() {
        let context = LaunchContext::new("/vault").with_file("notes/daily/today.md");
        assert_eq!(context.file_path, "notes/daily/today.md");
        assert_eq!(context.folder_path, "notes/daily");

        let top_level = LaunchContext::new("/vault").with_file("inbox.md");
        assert_eq!(top_level.folder_path, "");
    }

    #[test]
    fn test_editor_cursor_is_converted_to_one_based() {
        let context = LaunchContext::new("/vault").with_editor_cursor(3, 8);
        assert_eq!(context.line, 4);
        assert_eq!(context.ch, 9);
    }

    #[test]
    fn test_direct_cursor_clamps_to_one() {
        let context = LaunchContext::new("/vault").with_cursor(0, 0);
        assert_eq!(context.line, 1);
        assert_eq!(context.ch, 1);

        let context = LaunchContext::new("/vault").with_cursor(12, 5);
        assert_eq!(context.line, 12);
        assert_eq!(context.ch, 5);
    }
}
