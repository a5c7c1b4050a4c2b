//! Input and JSON output handling for the CLI
//!
//! - Input: a whole file, or all of stdin
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Map, Value};

use super::errors::{CliError, CliResult};

/// Read raw input bytes from `path`, or stdin when `None`
pub fn read_input(path: Option<&Path>) -> CliResult<Vec<u8>> {
    let bytes = match path {
        Some(path) => fs::read(path)
            .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?,
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(bytes)
}

/// Parse input bytes as a single JSON object
pub fn parse_record(bytes: &[u8]) -> CliResult<Map<String, Value>> {
    match serde_json::from_slice(bytes)? {
        Value::Object(record) => Ok(record),
        _ => Err(CliError::io_error("Expected a JSON object")),
    }
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value, pretty: bool) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_value(out, &response, pretty)
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str, pretty: bool) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_value(out, &response, pretty)
}

/// Write a raw line
pub fn write_line<W: Write>(out: &mut W, line: &str) -> CliResult<()> {
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

fn write_value<W: Write>(out: &mut W, value: &Value, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
