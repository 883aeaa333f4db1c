use anyhow::Context;
use open_cursor::{
    dispatch, error, logging, resolve_shell_command, resolve_urls, JsonSettingsStore,
    LaunchContext, OpenCursorError, Settings, SettingsStore, SystemLauncher, Vault,
};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = parse_args(&args)?;

    logging::init(invocation.verbose);

    match &invocation.action {
        Action::Help => {
            print_help();
            Ok(())
        }
        Action::Version => {
            println!("open-cursor {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Action::Open => run_open(&settings_store(&invocation)?, &invocation),
        Action::Config(config_action) => run_config(&settings_store(&invocation)?, config_action),
    }
}

fn settings_store(invocation: &Invocation) -> anyhow::Result<JsonSettingsStore> {
    match &invocation.settings_path {
        Some(path) => Ok(JsonSettingsStore::new(path.clone())),
        None => JsonSettingsStore::default_location()
            .context("could not determine the settings location"),
    }
}

/// ボールト/ファイルを Cursor で開く
fn run_open(store: &JsonSettingsStore, invocation: &Invocation) -> anyhow::Result<()> {
    let settings = store.load().context("failed to load settings")?;

    // ローカルディレクトリに裏付けられていないボールトは開けない → no-op
    let Some(vault) = Vault::locate(invocation.vault.as_deref())? else {
        log::info!("vault is not backed by a local directory; nothing to open");
        return Ok(());
    };

    let mut context = LaunchContext::new(vault.root_string());
    if let Some(file) = &invocation.file {
        context = context.with_file(file);
    }
    if invocation.line.is_some() || invocation.ch.is_some() {
        context = context.with_cursor(
            invocation.line.unwrap_or(1),
            invocation.ch.unwrap_or(1),
        );
    }

    let use_shell = match invocation.mode {
        DispatchMode::Shell => true,
        DispatchMode::Url => false,
        DispatchMode::Settings => settings.ribbon_command_uses_cursor,
    };

    let launcher = SystemLauncher;
    if use_shell {
        let command = resolve_shell_command(&settings, &context);
        dispatch::dispatch_shell(&launcher, &command);
    } else {
        let plan = resolve_urls(&settings, &context);
        dispatch::dispatch_urls(&launcher, &plan);
    }

    Ok(())
}

/// 設定サーフェス：表示・取得・設定・リセット
///
/// `set` と `reset` は変更直後に必ず永続化する
fn run_config(store: &JsonSettingsStore, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = store.load().context("failed to load settings")?;
            for key in open_cursor::settings::FIELD_KEYS {
                if let Some(value) = settings.get_field(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
        ConfigAction::Get(key) => {
            let settings = store.load().context("failed to load settings")?;
            let value = settings
                .get_field(key)
                .ok_or_else(|| OpenCursorError::Usage(format!("unknown settings key: {}", key)))?;
            println!("{}", value);
        }
        ConfigAction::Set(key, value) => {
            let mut settings = store.load().context("failed to load settings")?;
            settings
                .set_field(key, value)
                .map_err(OpenCursorError::from)?;
            store
                .save(&settings)
                .context("failed to save settings")?;
        }
        ConfigAction::Reset => {
            store
                .save(&Settings::default())
                .context("failed to save settings")?;
            log::info!("settings reset to defaults");
        }
    }

    Ok(())
}

/// ディスパッチ方式の選択
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchMode {
    /// 設定の `ribbonCommandUsesCursor` に従う
    Settings,
    Shell,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Open,
    Config(ConfigAction),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigAction {
    Show,
    Get(String),
    Set(String, String),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    action: Action,
    mode: DispatchMode,
    vault: Option<String>,
    file: Option<String>,
    line: Option<u32>,
    ch: Option<u32>,
    settings_path: Option<PathBuf>,
    verbose: bool,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            action: Action::Open,
            mode: DispatchMode::Settings,
            vault: None,
            file: None,
            line: None,
            ch: None,
            settings_path: None,
            verbose: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Invocation, OpenCursorError> {
    let mut invocation = Invocation::default();

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => invocation.action = Action::Help,
            "--version" | "-V" => invocation.action = Action::Version,
            "--verbose" | "-v" => invocation.verbose = true,
            "--shell" => invocation.mode = DispatchMode::Shell,
            "--url" => invocation.mode = DispatchMode::Url,
            "--vault" => {
                invocation.vault = Some(expect_value(&mut iter, "--vault")?);
            }
            "--line" => {
                invocation.line = Some(expect_number(&mut iter, "--line")?);
            }
            "--ch" => {
                invocation.ch = Some(expect_number(&mut iter, "--ch")?);
            }
            "--settings" => {
                invocation.settings_path = Some(PathBuf::from(expect_value(&mut iter, "--settings")?));
            }
            "config" => {
                let rest: Vec<&String> = iter.by_ref().collect();
                invocation.action = Action::Config(parse_config_action(&rest)?);
            }
            other if other.starts_with('-') => {
                return Err(OpenCursorError::Usage(format!("unknown option: {}", other)));
            }
            file => {
                if invocation.file.is_some() {
                    return Err(OpenCursorError::Usage(format!(
                        "unexpected extra argument: {}",
                        file
                    )));
                }
                invocation.file = Some(file.to_string());
            }
        }
    }

    Ok(invocation)
}

fn parse_config_action(rest: &[&String]) -> Result<ConfigAction, OpenCursorError> {
    match rest {
        [] => Ok(ConfigAction::Show),
        [sub] if sub.as_str() == "show" => Ok(ConfigAction::Show),
        [sub] if sub.as_str() == "reset" => Ok(ConfigAction::Reset),
        [sub, key] if sub.as_str() == "get" => Ok(ConfigAction::Get((*key).clone())),
        [sub, key, value] if sub.as_str() == "set" => {
            Ok(ConfigAction::Set((*key).clone(), (*value).clone()))
        }
        _ => Err(OpenCursorError::Usage(
            "usage: open-cursor config [show | get <key> | set <key> <value> | reset]".to_string(),
        )),
    }
}

fn expect_value(
    iter: &mut std::iter::Peekable<std::slice::Iter<'_, String>>,
    option: &str,
) -> Result<String, OpenCursorError> {
    match iter.next() {
        Some(value) => Ok(value.clone()),
        None => Err(OpenCursorError::Usage(format!(
            "{} requires a value",
            option
        ))),
    }
}

fn expect_number(
    iter: &mut std::iter::Peekable<std::slice::Iter<'_, String>>,
    option: &str,
) -> Result<u32, OpenCursorError> {
    let value = expect_value(iter, option)?;
    value.parse().map_err(|_| {
        OpenCursorError::Usage(format!("{} expects a number, got: {}", option, value))
    })
}

fn print_help() {
    println!("open-cursor - open a note vault in the Cursor editor");
    println!();
    println!("USAGE:");
    println!("    open-cursor [OPTIONS] [FILE]");
    println!("    open-cursor config [show | get <key> | set <key> <value> | reset]");
    println!();
    println!("OPTIONS:");
    println!("    --vault <path>      vault root (default: current directory)");
    println!("    --shell             open via the shell command template");
    println!("    --url               open via the cursor:// URL scheme");
    println!("    --line <n>          cursor line, 1-based");
    println!("    --ch <n>            cursor column, 1-based");
    println!("    --settings <path>   alternate settings file");
    println!("    -v, --verbose       log resolved commands before dispatch");
    println!("    -h, --help          print this help");
    println!("    -V, --version       print the version");
    println!();
    println!("FILE is the vault-relative path substituted for {{{{filepath}}}}.");
    println!("Without --shell or --url the mode follows the ribbonCommandUsesCursor setting.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let invocation = parse_args(&[]).unwrap();
        assert_eq!(invocation.action, Action::Open);
        assert_eq!(invocation.mode, DispatchMode::Settings);
        assert!(invocation.file.is_none());
    }

    #[test]
    fn test_parse_open_with_file_and_cursor() {
        let invocation =
            parse_args(&args(&["--url", "--line", "4", "--ch", "9", "notes/today.md"])).unwrap();
        assert_eq!(invocation.mode, DispatchMode::Url);
        assert_eq!(invocation.line, Some(4));
        assert_eq!(invocation.ch, Some(9));
        assert_eq!(invocation.file.as_deref(), Some("notes/today.md"));
    }

    #[test]
    fn test_parse_config_set() {
        let invocation = parse_args(&args(&["config", "set", "openFile", "false"])).unwrap();
        assert_eq!(
            invocation.action,
            Action::Config(ConfigAction::Set(
                "openFile".to_string(),
                "false".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_config_defaults_to_show() {
        let invocation = parse_args(&args(&["config"])).unwrap();
        assert_eq!(invocation.action, Action::Config(ConfigAction::Show));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_missing_option_value_is_rejected() {
        assert!(parse_args(&args(&["--vault"])).is_err());
        assert!(parse_args(&args(&["--line", "four"])).is_err());
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(parse_args(&args(&["a.md", "b.md"])).is_err());
    }
}
