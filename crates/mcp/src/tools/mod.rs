#![forbid(unsafe_code)]

mod definitions;
pub(crate) mod docs;
pub(crate) mod phase;

pub(crate) use definitions::{mcp_tool_list, tool_definitions};
