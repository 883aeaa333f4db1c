//! ボールト解決
//!
//! ボールトルートのパス展開と、ローカルディレクトリに実在するかの検証。
//! 実在しない場合は開くアクション自体を no-op にする（エラーにしない）

use crate::error::{OpenCursorError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// ファイルシステム上に実在するボールト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// 指定パス（省略時はカレントディレクトリ）からボールトを解決する
    ///
    /// 解決結果がディレクトリでないときは `None`：ファイルシステムに
    /// 裏付けられていないボールトは開けないため、呼び出し側は何もしない
    pub fn locate(root: Option<&str>) -> Result<Option<Vault>> {
        let candidate = match root {
            Some(raw) => expand_path(raw)?,
            None => env::current_dir()
                .map_err(|e| OpenCursorError::Path(format!("cannot resolve current directory: {}", e)))?,
        };

        if candidate.is_dir() {
            Ok(Some(Vault { root: candidate }))
        } else {
            Ok(None)
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// テンプレート置換に渡す文字列表現
    pub fn root_string(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }
}

/// チルダと環境変数を展開し、絶対パスへ変換する
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| OpenCursorError::Path(format!("cannot expand path {}: {}", raw, e)))?;
    let path = PathBuf::from(expanded.as_ref());

    if path.is_absolute() {
        Ok(path)
    } else {
        let current_dir = env::current_dir()
            .map_err(|e| OpenCursorError::Path(format!("cannot resolve current directory: {}", e)))?;
        Ok(current_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_locate_existing_directory() {
        let dir = tempdir().unwrap();
        let vault = Vault::locate(Some(dir.path().to_str().unwrap()))
            .unwrap()
            .unwrap();
        assert_eq!(vault.root(), dir.path());
    }

    #[test]
    fn test_locate_missing_directory_is_none() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let vault = Vault::locate(Some(missing.to_str().unwrap())).unwrap();
        assert!(vault.is_none());
    }

    #[test]
    fn test_locate_file_is_none() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("note.md");
        std::fs::write(&file, "x").unwrap();
        let vault = Vault::locate(Some(file.to_str().unwrap())).unwrap();
        assert!(vault.is_none());
    }

    #[test]
    fn test_expand_relative_path_is_absolutized() {
        let expanded = expand_path("some/relative/dir").unwrap();
        assert!(expanded.is_absolute());
    }

    #[test]
    fn test_expand_env_variable() {
        std::env::set_var("OPEN_CURSOR_TEST_DIR", "/tmp/vault");
        let expanded = expand_path("$OPEN_CURSOR_TEST_DIR/notes").unwrap();
        assert_eq!(expanded, PathBuf::from("/tmp/vault/notes"));
    }
}
