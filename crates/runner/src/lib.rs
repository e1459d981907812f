#![forbid(unsafe_code)]

mod bin_detect;
mod process;

pub use process::{BrRunner, CommandResult};

/// Logical name of the issue-tracker executable; also used as the command label.
pub const BR_BIN: &str = "br";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
