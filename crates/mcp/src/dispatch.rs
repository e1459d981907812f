#![forbid(unsafe_code)]

use crate::DispatchError;
use crate::config::Config;
use crate::tools;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use wf_core::phase::ToolName;
use wf_runner::BrRunner;

pub(crate) const DOCS_DIR: &str = "docs";

/// Routes a tool call to the docs store or the phase gate. Holds no per-request state.
#[derive(Clone, Debug)]
pub(crate) struct Dispatcher {
    project_root: PathBuf,
    runner: BrRunner,
}

impl Dispatcher {
    pub(crate) fn new(project_root: impl Into<PathBuf>, runner: BrRunner) -> Self {
        Self {
            project_root: project_root.into(),
            runner,
        }
    }

    pub(crate) fn from_config(config: &Config) -> Self {
        Self::new(
            config.project_root.clone(),
            BrRunner::from_config(config.br_bin.clone(), config.br_timeout_ms),
        )
    }

    pub(crate) fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub(crate) fn docs_root(&self) -> PathBuf {
        self.project_root.join(DOCS_DIR)
    }

    pub(crate) fn runner(&self) -> &BrRunner {
        &self.runner
    }

    /// Non-object inputs are treated as `{}`.
    pub(crate) fn dispatch(&self, tool_name: &str, input: &Value) -> Result<Value, DispatchError> {
        let tool = ToolName::parse(tool_name)
            .ok_or_else(|| DispatchError::UnsupportedTool(tool_name.to_string()))?;
        let empty = Map::new();
        let args = input.as_object().unwrap_or(&empty);

        tracing::debug!(tool = tool.as_str(), "dispatch");
        match tool {
            ToolName::Docs => tools::docs::handle(self, args),
            ToolName::Phase(phase) => Ok(tools::phase::handle(self, phase, args)),
        }
    }
}
