#![forbid(unsafe_code)]

use crate::dispatch::Dispatcher;
use crate::{flag_is_true, optional_str};
use serde_json::{Map, Value, json};
use wf_core::approval::{ApprovalFlags, ApprovalState, approval_gate};
use wf_core::phase::{Phase, ToolName};

pub(crate) const GUIDANCE: &str =
    "Use docs/designs, docs/plans, and docs/learnings for durable workflow artifacts.";

const SKIP_BLOCKED: &str = "approval_gate_blocked";
const SKIP_NO_COMMANDS: &str = "no_commands_for_phase";

fn approval_flags(args: &Map<String, Value>) -> ApprovalFlags {
    ApprovalFlags {
        design_approved: flag_is_true(args, "design_approved"),
        plan_approved: flag_is_true(args, "plan_approved"),
        beads_approved: flag_is_true(args, "beads_approved"),
    }
}

/// `br` argument lists a phase reads before answering, in issuance order.
pub(crate) fn br_commands(phase: Phase, args: &Map<String, Value>) -> Vec<Vec<String>> {
    let ready = || vec!["ready".to_string()];
    match phase {
        Phase::Diagnose => {
            let mut commands = vec![ready()];
            if let Some(symptom) = optional_str(args, "symptom")
                && !symptom.trim().is_empty()
            {
                commands.push(vec!["search".to_string(), symptom.to_string()]);
            }
            commands
        }
        Phase::Beads | Phase::Execute => vec![ready()],
        Phase::Compound => vec![vec![
            "list".to_string(),
            "--status".to_string(),
            "in_progress".to_string(),
        ]],
        Phase::Brainstorm | Phase::Plan | Phase::Review => Vec::new(),
    }
}

fn approval_json(state: &ApprovalState) -> Value {
    json!({
        "phase": state.phase.as_str(),
        "allowed": state.allowed,
        "required_signal": state.required_signal,
        "reason": state.reason,
    })
}

fn skipped(reason: &str) -> Value {
    json!({ "invoked": false, "skipped_reason": reason })
}

/// Phase tools: approval gate first, then the `br` reads. A blocked gate runs nothing.
pub(crate) fn handle(dispatcher: &Dispatcher, phase: Phase, args: &Map<String, Value>) -> Value {
    let approval = approval_gate(phase, approval_flags(args));

    let br = if !approval.allowed {
        tracing::debug!(phase = phase.as_str(), "phase: gate blocked");
        skipped(SKIP_BLOCKED)
    } else {
        let commands = br_commands(phase, args);
        if commands.is_empty() {
            skipped(SKIP_NO_COMMANDS)
        } else {
            let results = dispatcher
                .runner()
                .run_all(&commands, dispatcher.project_root());
            json!({ "invoked": true, "commands": commands, "results": results })
        }
    };

    json!({
        "tool": ToolName::Phase(phase).as_str(),
        "phase": phase.as_str(),
        "approval": approval_json(&approval),
        "br": br,
        "guidance": GUIDANCE,
    })
}
