//! CLI argument definitions using clap
//!
//! Commands:
//! - regform decode [--input <path>]
//! - regform encode [--input <path>]
//! - regform check [--input <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// regform - decode and validate registration form QR payloads
#[derive(Parser, Debug)]
#[command(name = "regform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a scanned payload and print the form as JSON
    Decode {
        /// Payload file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Encode a JSON record into a payload, without validation
    Encode {
        /// JSON record file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Decode a payload and report only whether it is valid
    Check {
        /// Payload file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
