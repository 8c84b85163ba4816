#![forbid(unsafe_code)]

pub mod sentinel_cli;
