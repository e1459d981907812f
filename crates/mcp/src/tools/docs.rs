#![forbid(unsafe_code)]

use crate::DispatchError;
use crate::dispatch::Dispatcher;
use crate::{flag_is_true, optional_number, optional_str};
use serde::Serialize;
use serde_json::{Map, Value};
use wf_core::limits::{MAX_FILE_BYTES, MAX_RESULTS, MAX_SUMMARY_CHARS};
use wf_storage::DocStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DocsAction {
    Find,
    Summarize,
    Update,
}

impl DocsAction {
    fn parse(args: &Map<String, Value>) -> Result<Self, DispatchError> {
        match args.get("action") {
            Some(Value::String(action)) => match action.as_str() {
                "find" => Ok(Self::Find),
                "summarize" => Ok(Self::Summarize),
                "update" => Ok(Self::Update),
                other => Err(DispatchError::UnsupportedAction(other.to_string())),
            },
            Some(other) => Err(DispatchError::UnsupportedAction(other.to_string())),
            None => Err(DispatchError::UnsupportedAction("<none>".to_string())),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Summarize => "summarize",
            Self::Update => "update",
        }
    }
}

#[derive(Serialize)]
struct ActionReport<T: Serialize> {
    action: &'static str,
    #[serde(flatten)]
    report: T,
}

fn tagged<T: Serialize>(action: DocsAction, report: T) -> Result<Value, DispatchError> {
    Ok(serde_json::to_value(ActionReport {
        action: action.as_str(),
        report,
    })?)
}

/// `workflow_docs`: the action is checked before the docs root is touched, so a bad action
/// never creates `docs/`.
pub(crate) fn handle(
    dispatcher: &Dispatcher,
    args: &Map<String, Value>,
) -> Result<Value, DispatchError> {
    let action = DocsAction::parse(args)?;
    let store = DocStore::open(dispatcher.docs_root())?;

    match action {
        DocsAction::Find => {
            let query = optional_str(args, "query").unwrap_or_default();
            let max_results = MAX_RESULTS.clamp(optional_number(args, "max_results"));
            let max_file_bytes = MAX_FILE_BYTES.clamp(optional_number(args, "max_file_bytes"));
            tagged(action, store.find(query, max_results, max_file_bytes)?)
        }
        DocsAction::Summarize => {
            let max_chars = MAX_SUMMARY_CHARS.clamp(optional_number(args, "max_summary_chars"));
            let summary = store.summarize(
                optional_str(args, "path"),
                max_chars,
                flag_is_true(args, "include_content"),
            )?;
            tagged(action, summary)
        }
        DocsAction::Update => {
            let report = store.update(optional_str(args, "path"), optional_str(args, "content"))?;
            tagged(action, report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wf_runner::BrRunner;
    use wf_storage::StoreError;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn unknown_actions_fail_before_creating_the_docs_root() {
        let dir = tempfile::tempdir().expect("temp dir");
        let d = Dispatcher::new(dir.path(), BrRunner::default());

        let err = handle(&d, &args(json!({ "action": "delete" }))).expect_err("unsupported");
        assert_eq!(err.to_string(), "Unsupported workflow_docs action: delete");
        let err = handle(&d, &args(json!({}))).expect_err("unsupported");
        assert_eq!(err.to_string(), "Unsupported workflow_docs action: <none>");
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn escapes_and_missing_fields_surface_store_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let d = Dispatcher::new(dir.path(), BrRunner::default());

        let err = handle(
            &d,
            &args(json!({ "action": "update", "path": "../../etc/x", "content": "x" })),
        )
        .expect_err("escape");
        assert!(matches!(err, DispatchError::Store(StoreError::PathEscape { .. })));
        assert_eq!(err.code(), "PATH_ESCAPE");

        let err = handle(&d, &args(json!({ "action": "update", "path": "a.md" })))
            .expect_err("content");
        assert!(matches!(err, DispatchError::Store(StoreError::MissingContent)));

        let err = handle(&d, &args(json!({ "action": "summarize" }))).expect_err("path");
        assert_eq!(err.to_string(), "workflow_docs.summarize requires path");

        let err = handle(&d, &args(json!({ "action": "find", "query": "  " }))).expect_err("query");
        assert!(matches!(err, DispatchError::Store(StoreError::InvalidQuery)));
    }

    #[test]
    fn options_are_clamped_and_flags_are_strict() {
        let dir = tempfile::tempdir().expect("temp dir");
        let d = Dispatcher::new(dir.path(), BrRunner::default());
        let long = "word ".repeat(200);
        handle(
            &d,
            &args(json!({ "action": "update", "path": "long.md", "content": long })),
        )
        .expect("update");

        let out = handle(
            &d,
            &args(json!({
                "action": "summarize",
                "path": "long.md",
                "max_summary_chars": 5,
                "include_content": "true"
            })),
        )
        .expect("summarize");
        assert_eq!(out["summary"].as_str().expect("summary").chars().count(), 200);
        assert!(out.get("content").is_none());

        let out = handle(
            &d,
            &args(json!({ "action": "summarize", "path": "long.md", "include_content": true })),
        )
        .expect("summarize");
        assert_eq!(out["content"], json!(long));
        assert_eq!(out["action"], json!("summarize"));
    }

    #[test]
    fn find_reports_counts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let d = Dispatcher::new(dir.path(), BrRunner::default());
        for name in ["one.md", "two.md", "three.md"] {
            handle(
                &d,
                &args(json!({ "action": "update", "path": name, "content": "shared text" })),
            )
            .expect("update");
        }
        let out = handle(
            &d,
            &args(json!({ "action": "find", "query": "SHARED", "max_results": 0 })),
        )
        .expect("find");
        assert_eq!(out["action"], json!("find"));
        assert_eq!(out["query"], json!("SHARED"));
        assert_eq!(out["total_matches"], json!(1));
        assert_eq!(out["matches"].as_array().map(Vec::len), Some(1));
    }
}
