#![forbid(unsafe_code)]

mod find;
mod summarize;
mod update;
mod walk;
