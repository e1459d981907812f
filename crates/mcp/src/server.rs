#![forbid(unsafe_code)]

use crate::dispatch::Dispatcher;
use crate::{JsonRpcRequest, catalog, json_rpc_error, json_rpc_response, tool_call_result};
use serde_json::{Value, json};

pub(crate) const SYSTEM_PROMPT_NAME: &str = "workflow_system";

pub(crate) struct McpServer {
    initialized: bool,
    dispatcher: Dispatcher,
}

impl McpServer {
    pub(crate) fn new(dispatcher: Dispatcher) -> Self {
        Self {
            initialized: false,
            dispatcher,
        }
    }

    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();

        if method == "initialize" {
            return Some(json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": crate::MCP_VERSION,
                    "serverInfo": { "name": crate::SERVER_NAME, "version": crate::SERVER_VERSION },
                    "capabilities": { "tools": {}, "prompts": {} }
                }),
            ));
        }

        if !self.initialized && method != "notifications/initialized" {
            return Some(json_rpc_error(request.id, -32002, "Server not initialized"));
        }

        match method {
            "notifications/initialized" => {
                self.initialized = true;
                None
            }
            "ping" => Some(json_rpc_response(request.id, json!({}))),
            "resources/list" => Some(json_rpc_response(request.id, json!({ "resources": [] }))),
            "tools/list" => Some(json_rpc_response(
                request.id,
                json!({ "tools": crate::tools::mcp_tool_list() }),
            )),
            "tools/call" => Some(self.call_tool(request.id, request.params)),
            "prompts/list" => Some(json_rpc_response(
                request.id,
                json!({
                    "prompts": [{
                        "name": SYSTEM_PROMPT_NAME,
                        "description": "System prompt for the workflow agent."
                    }]
                }),
            )),
            "prompts/get" => Some(self.get_prompt(request.id, request.params)),
            _ => Some(json_rpc_error(
                request.id,
                -32601,
                &format!("Method not found: {method}"),
            )),
        }
    }

    fn call_tool(&self, id: Option<Value>, params: Option<Value>) -> Value {
        let Some(params) = params.as_ref().and_then(Value::as_object) else {
            return json_rpc_error(id, -32602, "params must be an object");
        };
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return json_rpc_error(id, -32602, "params.name must be a string");
        };
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let result = self.dispatcher.dispatch(name, &args);
        if let Err(err) = &result {
            tracing::debug!(tool = name, code = err.code(), error = %err, "tools/call failed");
        }
        json_rpc_response(id, tool_call_result(result))
    }

    fn get_prompt(&self, id: Option<Value>, params: Option<Value>) -> Value {
        let name = params
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str);
        if name != Some(SYSTEM_PROMPT_NAME) {
            return json_rpc_error(
                id,
                -32602,
                &format!("Unknown prompt (expected {SYSTEM_PROMPT_NAME})"),
            );
        }
        match catalog::load_system_prompt(self.dispatcher.project_root()) {
            Ok(text) => json_rpc_response(
                id,
                json!({
                    "description": "System prompt for the workflow agent.",
                    "messages": [{
                        "role": "user",
                        "content": { "type": "text", "text": text }
                    }]
                }),
            ),
            Err(err) => json_rpc_error(id, -32603, &err.to_string()),
        }
    }
}
