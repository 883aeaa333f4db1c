//! コマンド・URL解決
//!
//! (設定, 起動コンテキスト) からディスパッチ可能なアクションを組み立てる。
//! 解決は純粋関数で、同じ入力は常に同じ結果を返す

use crate::context::LaunchContext;
use crate::settings::Settings;
use crate::template;
use std::time::Duration;

/// 標準のURLスキーム
pub const URL_SCHEME: &str = "cursor://file/";

/// Insiders ビルド向けの代替URLスキーム
pub const URL_SCHEME_INSIDERS: &str = "cursor-insiders://file/";

/// ワークスペースURLとファイルURLの間の待機時間
///
/// エディタ側の起動／シングルインスタンスのウィンドウ再利用を待つための
/// ヒューリスティックであり、完了確認のあるプロトコルではない
pub const URL_OPEN_DELAY: Duration = Duration::from_millis(200);

/// シェルコマンド文字列を解決する
///
/// テンプレートが空白のみなら既定テンプレートへ差し替えた上で、
/// 5種のプレースホルダを全置換した文字列をそのまま返す。
/// シェルエスケープは行わない（テンプレートの書き手が引用する）
pub fn resolve_shell_command(settings: &Settings, context: &LaunchContext) -> String {
    let line = context.line.to_string();
    let ch = context.ch.to_string();

    template::substitute(
        settings.effective_execute_template(),
        &[
            ("vaultpath", context.vault_path.as_str()),
            ("filepath", context.file_path.as_str()),
            ("folderpath", context.folder_path.as_str()),
            ("line", line.as_str()),
            ("ch", ch.as_str()),
        ],
    )
}

/// URLモードのディスパッチ計画
///
/// `followup` があるときは `first` を開いてから `delay` 待って開く。
/// どちらも発行のみで成否確認はしない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPlan {
    pub first: String,
    pub followup: Option<String>,
    pub delay: Duration,
}

impl UrlPlan {
    /// 発行順のURL列（テスト・表示向け）
    pub fn urls(&self) -> Vec<&str> {
        let mut urls = vec![self.first.as_str()];
        if let Some(followup) = &self.followup {
            urls.push(followup.as_str());
        }
        urls
    }
}

/// URL列を解決する
///
/// * `open_file` が偽: ボールトルートを開くURL 1件
/// * `open_file` が真: ワークスペースURLを先に、遅延後にファイルURL
/// * `use_url_insiders` が真なら全URLを `cursor-insiders://` スキームで生成
///
/// パスはURLエンコードしない（URLセーフである前提の生渡し）
pub fn resolve_urls(settings: &Settings, context: &LaunchContext) -> UrlPlan {
    let scheme = if settings.use_url_insiders {
        URL_SCHEME_INSIDERS
    } else {
        URL_SCHEME
    };
    let primary = format!("{}{}", scheme, context.vault_path);

    if !settings.open_file {
        return UrlPlan {
            first: primary,
            followup: None,
            delay: URL_OPEN_DELAY,
        };
    }

    let workspace = template::substitute(
        settings.effective_workspace_path(),
        &[("vaultpath", context.vault_path.as_str())],
    );

    UrlPlan {
        first: format!("{}{}", scheme, workspace),
        followup: Some(format!("{}/{}", primary, context.file_path)),
        delay: URL_OPEN_DELAY,
    }
}
