#![forbid(unsafe_code)]

pub mod approval;
pub mod limits;
pub mod paths;
pub mod phase;
