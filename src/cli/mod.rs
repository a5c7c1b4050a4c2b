//! CLI module for regform
//!
//! Provides command-line interface for:
//! - decode: payload in, validated form out as JSON
//! - encode: JSON record in, payload out (test fixtures)
//! - check: payload in, validity out

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, decode, encode, run, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_record, read_input, write_error, write_line, write_response};
