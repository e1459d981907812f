#![forbid(unsafe_code)]

use serde_json::{Value, json};
use wf_core::phase::{Phase, ToolName};

fn flag(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

fn phase_description(phase: Phase) -> &'static str {
    match phase {
        Phase::Diagnose => {
            "Diagnose a problem before designing a fix. Reads ready work from br and, when a symptom is given, searches br for it."
        }
        Phase::Brainstorm => {
            "Explore design options and write the chosen design to docs/designs. No approval needed."
        }
        Phase::Plan => {
            "Turn an approved design into a plan in docs/plans. Blocked until the user says 'design approved'."
        }
        Phase::Beads => {
            "Break an approved plan into br issues. Blocked until the user says 'plan approved'."
        }
        Phase::Execute => {
            "Work through ready br issues. Blocked until the user says 'beads approved'."
        }
        Phase::Review => "Review finished work against the plan and design. No approval needed.",
        Phase::Compound => {
            "Capture learnings in docs/learnings and list in-progress br issues."
        }
    }
}

fn phase_parameters(phase: Phase) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "context".to_string(),
        json!({ "type": "string", "description": "Free-form notes for this phase." }),
    );
    match phase {
        Phase::Diagnose => {
            properties.insert(
                "symptom".to_string(),
                json!({ "type": "string", "description": "Observed symptom to search br for." }),
            );
        }
        Phase::Plan => {
            properties.insert(
                "design_approved".to_string(),
                flag("True only after the user said 'design approved'."),
            );
        }
        Phase::Beads => {
            properties.insert(
                "plan_approved".to_string(),
                flag("True only after the user said 'plan approved'."),
            );
        }
        Phase::Execute => {
            properties.insert(
                "beads_approved".to_string(),
                flag("True only after the user said 'beads approved'."),
            );
        }
        Phase::Brainstorm | Phase::Review | Phase::Compound => {}
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": [],
        "additionalProperties": true
    })
}

fn docs_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "action": { "type": "string", "enum": ["find", "summarize", "update"] },
            "query": { "type": "string", "description": "find: case-insensitive substring." },
            "path": { "type": "string", "description": "Path relative to docs/." },
            "content": { "type": "string", "description": "update: full replacement content." },
            "max_results": { "type": "integer", "minimum": 1, "maximum": 500 },
            "max_file_bytes": { "type": "integer", "minimum": 1024, "maximum": 4194304 },
            "max_summary_chars": { "type": "integer", "minimum": 200, "maximum": 8000 },
            "include_content": { "type": "boolean" }
        },
        "required": ["action"],
        "additionalProperties": false
    })
}

fn function_tool(name: &str, description: &str, parameters: Value) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": name,
            "description": description,
            "parameters": parameters
        }
    })
}

/// OpenAI function-calling definitions for all eight tools, phases first in pipeline order.
pub(crate) fn tool_definitions() -> Vec<Value> {
    ToolName::all()
        .into_iter()
        .map(|tool| match tool {
            ToolName::Phase(phase) => function_tool(
                tool.as_str(),
                phase_description(phase),
                phase_parameters(phase),
            ),
            ToolName::Docs => function_tool(
                tool.as_str(),
                "Find, summarize or update workflow documents under docs/. Paths cannot leave docs/.",
                docs_parameters(),
            ),
        })
        .collect()
}

/// MCP `tools/list` shape: `{name, description, inputSchema}`.
pub(crate) fn mcp_tool_list() -> Vec<Value> {
    tool_definitions()
        .into_iter()
        .filter_map(|entry| {
            let function = entry.get("function")?;
            Some(json!({
                "name": function.get("name")?,
                "description": function.get("description")?,
                "inputSchema": function.get("parameters")?
            }))
        })
        .collect()
}
