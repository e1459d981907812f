#![forbid(unsafe_code)]

use crate::DispatchError;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use wf_core::phase::ToolName;

pub(crate) const PROMPT_PATH: &str = "templates/OPENAI_AGENT.md";
pub(crate) const TOOLS_PATH: &str = "openai/tools.json";

fn schema(message: impl Into<String>) -> DispatchError {
    DispatchError::Schema(message.into())
}

pub(crate) fn load_system_prompt(project_root: &Path) -> Result<String, DispatchError> {
    let path = project_root.join(PROMPT_PATH);
    std::fs::read_to_string(&path).map_err(|source| DispatchError::io("read", &path, source))
}

/// Reads the tool catalog. Both a bare array and `{ "tools": [...] }` are accepted.
pub(crate) fn load_tools(project_root: &Path) -> Result<Vec<Value>, DispatchError> {
    let path = project_root.join(TOOLS_PATH);
    let raw =
        std::fs::read_to_string(&path).map_err(|source| DispatchError::io("read", &path, source))?;
    tool_entries(serde_json::from_str(&raw)?)
}

pub(crate) fn tool_entries(parsed: Value) -> Result<Vec<Value>, DispatchError> {
    match parsed {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut root) => match root.remove("tools") {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Err(schema("tools.json must contain a tools array")),
        },
        _ => Err(schema("tools.json root must be an array or an object")),
    }
}

fn non_empty_str<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Checks every entry is an OpenAI function tool and that all eight tools are present.
/// Returns the number of entries validated.
pub(crate) fn validate_tools(entries: &[Value]) -> Result<usize, DispatchError> {
    let mut names = BTreeSet::new();
    for entry in entries {
        let Some(tool) = entry.as_object() else {
            return Err(schema("Each tool entry must be an object"));
        };
        if tool.get("type").and_then(Value::as_str) != Some("function") {
            return Err(schema("Each tool entry must use type='function'"));
        }
        let Some(function) = tool.get("function").and_then(Value::as_object) else {
            return Err(schema("Each tool entry must contain a function object"));
        };
        let Some(name) = non_empty_str(function, "name") else {
            return Err(schema("Tool function.name is required"));
        };
        if non_empty_str(function, "description").is_none() {
            return Err(schema(format!("Tool {name} description is required")));
        }
        if !function.get("parameters").is_some_and(Value::is_object) {
            return Err(schema(format!("Tool {name} must include parameters schema")));
        }
        names.insert(name.to_string());
    }

    for required in ToolName::all() {
        if !names.contains(required.as_str()) {
            return Err(schema(format!("Missing required tool: {}", required.as_str())));
        }
    }
    Ok(entries.len())
}
