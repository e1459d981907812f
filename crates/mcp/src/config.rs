#![forbid(unsafe_code)]

use std::path::PathBuf;
use wf_runner::DEFAULT_TIMEOUT_MS;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 600_000;

pub(crate) const ENV_PROJECT_ROOT: &str = "WF_PROJECT_ROOT";
pub(crate) const ENV_BR_BIN: &str = "WF_BR_BIN";
pub(crate) const ENV_BR_TIMEOUT_MS: &str = "WF_BR_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) project_root: PathBuf,
    pub(crate) br_bin: Option<String>,
    pub(crate) br_timeout_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Version,
    Stdio,
    ValidateTools,
    PrintTools,
    SystemPrompt,
    Call { tool: String, payload: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cli {
    pub(crate) config: Config,
    pub(crate) command: Command,
}

pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout_ms(raw: &str, source: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map(|v| v.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS))
        .map_err(|_| format!("{source} must be a non-negative integer (got {raw:?})"))
}

/// Parses argv (without the program name). Flags win over environment variables, which win
/// over defaults. `env` is injected so tests do not depend on the process environment.
pub(crate) fn parse_cli(
    args: &[String],
    env: impl Fn(&str) -> Option<String>,
) -> Result<Cli, String> {
    let mut project_root: Option<PathBuf> = None;
    let mut br_bin: Option<String> = None;
    let mut br_timeout_ms: Option<u64> = None;
    let mut mode: Option<Command> = None;
    let mut positional = Vec::<String>::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(help_cli()),
            "-V" | "--version" => mode = Some(Command::Version),
            "--project-root" => {
                project_root = Some(PathBuf::from(value_for("--project-root")?));
            }
            "--br-bin" => br_bin = Some(value_for("--br-bin")?),
            "--br-timeout-ms" => {
                let raw = value_for("--br-timeout-ms")?;
                br_timeout_ms = Some(parse_timeout_ms(&raw, "--br-timeout-ms")?);
            }
            "--stdio" => mode = Some(Command::Stdio),
            "--validate-tools" => mode = Some(Command::ValidateTools),
            "--print-tools" => mode = Some(Command::PrintTools),
            "--system-prompt" => mode = Some(Command::SystemPrompt),
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            _ => positional.push(arg.clone()),
        }
    }

    let command = match (mode, positional.len()) {
        (Some(mode), 0) => mode,
        (Some(_), _) => return Err("positional arguments are only accepted in call mode".into()),
        (None, 2) => {
            let payload = positional.pop().unwrap_or_default();
            let tool = positional.pop().unwrap_or_default();
            Command::Call { tool, payload }
        }
        (None, _) => return Err("Usage: wf_mcp <toolName> '<jsonPayload>'".into()),
    };

    let project_root = match project_root.or_else(|| env(ENV_PROJECT_ROOT).map(PathBuf::from)) {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| format!("cannot read current dir: {e}"))?,
    };
    let br_timeout_ms = match br_timeout_ms {
        Some(v) => v,
        None => match env(ENV_BR_TIMEOUT_MS) {
            Some(raw) => parse_timeout_ms(&raw, ENV_BR_TIMEOUT_MS)?,
            None => DEFAULT_TIMEOUT_MS,
        },
    };

    Ok(Cli {
        config: Config {
            project_root,
            br_bin: br_bin.or_else(|| env(ENV_BR_BIN)),
            br_timeout_ms,
        },
        command,
    })
}

fn help_cli() -> Cli {
    Cli {
        config: Config {
            project_root: PathBuf::from("."),
            br_bin: None,
            br_timeout_ms: DEFAULT_TIMEOUT_MS,
        },
        command: Command::Help,
    }
}
