//! Top-level command orchestration behind the CLI.
pub mod apply;
