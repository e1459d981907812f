#![forbid(unsafe_code)]

mod args;
mod jsonrpc;

pub(crate) use args::*;
pub(crate) use jsonrpc::*;
