#![forbid(unsafe_code)]

mod catalog;
mod config;
mod dispatch;
mod entry;
mod error;
mod logging;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use config::{Cli, Command};
use dispatch::Dispatcher;
use error::DispatchError;
use server::McpServer;
use std::process::ExitCode;

// Protocol negotiation: echo the widely deployed baseline.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "wf-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage() -> &'static str {
    "wf_mcp — workflow tool dispatcher (phase approval gate + docs store)\n\n\
USAGE:\n\
  wf_mcp [OPTIONS] <toolName> '<jsonPayload>'\n\
  wf_mcp [OPTIONS] --stdio\n\
  wf_mcp [OPTIONS] --validate-tools | --print-tools | --system-prompt\n\
\n\
OPTIONS:\n\
  --project-root DIR    Project root (docs/, openai/, templates/) [env: WF_PROJECT_ROOT]\n\
  --br-bin PATH         br executable [env: WF_BR_BIN, default: PATH lookup]\n\
  --br-timeout-ms MS    Per-command br timeout [env: WF_BR_TIMEOUT_MS, default: 30000]\n\
  -h, --help            Print this help and exit\n\
  -V, --version         Print version and exit\n\
\n\
NOTES:\n\
  - Logs go to stderr; filter with WF_LOG (e.g. WF_LOG=debug).\n\
  - Tools: workflow_diagnose, workflow_brainstorm, workflow_plan, workflow_beads,\n\
    workflow_execute, workflow_review, workflow_compound, workflow_docs.\n"
}

fn version_line() -> String {
    format!("wf_mcp {SERVER_VERSION}")
}

fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn call_once(dispatcher: &Dispatcher, tool: &str, payload: &str) -> Result<(), DispatchError> {
    let input: serde_json::Value = serde_json::from_str(payload)?;
    let result = dispatcher.dispatch(tool, &input)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), DispatchError> {
    let dispatcher = Dispatcher::from_config(&cli.config);
    match cli.command {
        Command::Call { tool, payload } => call_once(&dispatcher, &tool, &payload),
        Command::Stdio => {
            let mut server = McpServer::new(dispatcher);
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            entry::run_stdio(&mut server, stdin.lock(), stdout.lock())
                .map_err(|err| DispatchError::Transport(err.to_string()))
        }
        Command::ValidateTools => {
            let entries = catalog::load_tools(dispatcher.project_root())?;
            let count = catalog::validate_tools(&entries)?;
            println!(
                "Validated {count} OpenAI function tools in {}",
                catalog::TOOLS_PATH
            );
            Ok(())
        }
        Command::PrintTools => {
            let tools = serde_json::json!({ "tools": tools::tool_definitions() });
            println!("{}", serde_json::to_string_pretty(&tools)?);
            Ok(())
        }
        Command::SystemPrompt => {
            let prompt = catalog::load_system_prompt(dispatcher.project_root())?;
            print!("{prompt}");
            Ok(())
        }
        Command::Help | Command::Version => Ok(()),
    }
}

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cli = match config::parse_cli(&args, config::env_var) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };
    match cli.command {
        Command::Help => {
            print!("{}", usage());
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("{}", version_line());
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    logging::init();
    tracing::debug!(root = %cli.config.project_root.display(), "wf_mcp: start");
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(code = err.code(), "wf_mcp: failed");
            eprintln!("{}", single_line(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}
