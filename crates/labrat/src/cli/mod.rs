//! CLI module for labrat.
//!
//! Each subcommand lives in its own module with an Args struct and a
//! `run` entry point. Shared table and JSON output helpers are in
//! [`output`].

pub mod output;

pub mod archive;
pub mod calc;
pub mod config;
pub mod organize;
pub mod project;
pub mod seq;
