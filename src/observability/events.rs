//! Observable events
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` key of a log line.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// A payload was read and decoding begins
    DecodeStart,
    /// Payload decoded into a valid form
    FormAccepted,
    /// Payload rejected by the decode pipeline
    FormRejected,
    /// Fixture payload written
    EncodeComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DecodeStart => "DECODE_START",
            Event::FormAccepted => "FORM_ACCEPTED",
            Event::FormRejected => "FORM_REJECTED",
            Event::EncodeComplete => "ENCODE_COMPLETE",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DecodeStart => Severity::Trace,
            Event::FormRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
