//! ディスパッチ層
//!
//! 解決済みのコマンド/URLをOSへ発行する。発行は fire-and-forget：
//! 失敗は固定タグ付きでログへ残すだけで、呼び出し元へは伝播させず、
//! リトライもしない

use crate::error::dispatch::Result;
use crate::error::DispatchError;
use crate::resolver::UrlPlan;
use std::process::{Command, Stdio};
use std::thread;

/// 環境が提供する起動プリミティブの差し替え点
pub trait Launcher {
    /// コマンド文字列をシェル経由で起動する（終了を待たない）
    fn run_shell(&self, command: &str) -> Result<()>;

    /// URLをOSのURLハンドラで開く
    fn open_url(&self, url: &str) -> Result<()>;
}

/// 実際のOSを使う起動実装
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run_shell(&self, command: &str) -> Result<()> {
        let mut shell = shell_command(command);
        shell.stdout(Stdio::null()).stderr(Stdio::null());

        // spawn エラーのみ観測し、終了コードは収集しない
        shell
            .spawn()
            .map(|_| ())
            .map_err(|e| DispatchError::Spawn {
                command: command.to_string(),
                message: e.to_string(),
            })
    }

    fn open_url(&self, url: &str) -> Result<()> {
        open::that(url).map_err(|e| DispatchError::UrlOpen {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}

/// シェルコマンドを発行する
///
/// 失敗はエラーログのみ（UIへは出さない）
pub fn dispatch_shell(launcher: &dyn Launcher, command: &str) {
    log::debug!("exec: {}", command);
    if let Err(error) = launcher.run_shell(command) {
        log::error!("{}", error);
    }
}

/// URL計画を発行する
///
/// 2件目は固定遅延の後に開く。遅延は呼び出し元スレッド上の単純な
/// 待機で、プロセス終了がそのまま上限になる
pub fn dispatch_urls(launcher: &dyn Launcher, plan: &UrlPlan) {
    log::debug!("open: {}", plan.first);
    if let Err(error) = launcher.open_url(&plan.first) {
        log::error!("{}", error);
    }

    if let Some(followup) = &plan.followup {
        thread::sleep(plan.delay);
        log::debug!("open: {}", followup);
        if let Err(error) = launcher.open_url(followup) {
            log::error!("{}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    /// 呼び出しを記録するテスト用ランチャ
    struct RecordingLauncher {
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl RecordingLauncher {
        fn new(fail: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Launcher for RecordingLauncher {
        fn run_shell(&self, command: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("shell:{}", command));
            if self.fail {
                Err(DispatchError::Spawn {
                    command: command.to_string(),
                    message: "simulated".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn open_url(&self, url: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("url:{}", url));
            if self.fail {
                Err(DispatchError::UrlOpen {
                    url: url.to_string(),
                    message: "simulated".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn plan(followup: Option<&str>) -> UrlPlan {
        UrlPlan {
            first: "cursor://file//v".to_string(),
            followup: followup.map(|s| s.to_string()),
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_shell_dispatch_records_command() {
        let launcher = RecordingLauncher::new(false);
        dispatch_shell(&launcher, r#"cursor "/v""#);
        assert_eq!(launcher.calls(), vec![r#"shell:cursor "/v""#.to_string()]);
    }

    #[test]
    fn test_shell_dispatch_failure_does_not_propagate() {
        let launcher = RecordingLauncher::new(true);
        // ログのみで戻り値もパニックもない
        dispatch_shell(&launcher, "definitely-not-a-command");
        assert_eq!(launcher.calls().len(), 1);
    }

    #[test]
    fn test_urls_dispatched_in_order() {
        let launcher = RecordingLauncher::new(false);
        dispatch_urls(&launcher, &plan(Some("cursor://file//v/n.md")));
        assert_eq!(
            launcher.calls(),
            vec![
                "url:cursor://file//v".to_string(),
                "url:cursor://file//v/n.md".to_string(),
            ]
        );
    }

    #[test]
    fn test_single_url_plan_dispatches_once() {
        let launcher = RecordingLauncher::new(false);
        dispatch_urls(&launcher, &plan(None));
        assert_eq!(launcher.calls().len(), 1);
    }

    #[test]
    fn test_first_url_failure_still_dispatches_followup() {
        let launcher = RecordingLauncher::new(true);
        dispatch_urls(&launcher, &plan(Some("cursor://file//v/n.md")));
        assert_eq!(launcher.calls().len(), 2);
    }
}
