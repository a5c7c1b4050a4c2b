//! CLI command implementations
//!
//! Commands are thin: read input, call the form pipeline, log the outcome,
//! print one JSON line. All validation lives in `crate::form`.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use crate::form::{decode_form, encode_form, DecodeError, DecodedForm};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{parse_record, read_input, write_error, write_line, write_response};

/// Parse arguments, load config and dispatch
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    let config = Config::load_or_default(cli.config.as_deref())?;

    Logger::set_min_severity(config.severity()?);
    if let Some(path) = &cli.config {
        log_event_with_fields(Event::ConfigLoaded, &[("path", path.display().to_string().as_str())]);
    }

    run_command(cli.command, &config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    match cmd {
        Command::Decode { input } => decode(input.as_deref(), config),
        Command::Encode { input } => encode(input.as_deref()),
        Command::Check { input } => check(input.as_deref(), config),
    }
}

/// Decode a payload and print the form, including `date_parsed`
pub fn decode(input: Option<&Path>, config: &Config) -> CliResult<()> {
    let payload = read_input(input)?;
    decode_payload(&payload, config, &mut io::stdout().lock())
}

/// Encode a JSON record into a payload line
pub fn encode(input: Option<&Path>) -> CliResult<()> {
    let bytes = read_input(input)?;
    encode_record(&bytes, &mut io::stdout().lock())
}

/// Decode a payload and print only its validity
pub fn check(input: Option<&Path>, config: &Config) -> CliResult<()> {
    let payload = read_input(input)?;
    check_payload(&payload, config, &mut io::stdout().lock())
}

pub(crate) fn decode_payload<W: Write>(payload: &[u8], config: &Config, out: &mut W) -> CliResult<()> {
    match decode_logged(payload) {
        Ok(decoded) => {
            let data = serde_json::to_value(&decoded)?;
            write_response(out, data, config.pretty)
        }
        Err(e) => reject(out, &e, config),
    }
}

pub(crate) fn check_payload<W: Write>(payload: &[u8], config: &Config, out: &mut W) -> CliResult<()> {
    match decode_logged(payload) {
        Ok(_) => write_response(out, json!({ "valid": true }), config.pretty),
        Err(e) => reject(out, &e, config),
    }
}

pub(crate) fn encode_record<W: Write>(bytes: &[u8], out: &mut W) -> CliResult<()> {
    let record = parse_record(bytes)?;
    let payload = encode_form(&record);

    // base64 output is always ASCII
    let line = String::from_utf8_lossy(&payload);
    write_line(out, &line)?;

    log_event_with_fields(Event::EncodeComplete, &[("bytes", payload.len().to_string().as_str())]);
    Ok(())
}

fn decode_logged(payload: &[u8]) -> Result<DecodedForm, DecodeError> {
    log_event_with_fields(Event::DecodeStart, &[("bytes", payload.len().to_string().as_str())]);

    let result = decode_form(payload);
    match &result {
        Ok(decoded) => {
            log_event_with_fields(Event::FormAccepted, &[("date", decoded.date_parsed().to_string().as_str())])
        }
        Err(e) => log_event_with_fields(
            Event::FormRejected,
            &[("code", e.code()), ("message", e.to_string().as_str())],
        ),
    }
    result
}

/// Print the error response, then fail the command
fn reject<W: Write>(out: &mut W, err: &DecodeError, config: &Config) -> CliResult<()> {
    write_error(out, err.code(), &err.to_string(), config.pretty)?;
    Err(CliError::decode_failed(err.to_string()))
}
