//! Registration form subsystem
//!
//! Turns the payload of a scanned registration QR code into a typed,
//! validated form.
//!
//! # Design Principles
//!
//! - No field is trusted before the whole record passes the schema
//! - Schemas are static tables, built once and shared read-only
//! - Every failure is one `DecodeError`; no partial records
//! - Decoding is pure: no I/O, no logging, no shared mutable state

mod date;
mod decoder;
mod errors;
mod record;
mod types;
mod validator;

pub use date::{DateError, ParsedDate};
pub use decoder::{decode_form, encode_form, FormDecoder};
pub use errors::{
    DecodeCause, DecodeError, DecodeErrorKind, DecodeResult, SchemaError, SchemaResult,
    ValidationFailure, Violation,
};
pub use record::{DecodedForm, Payment, RegistrationForm};
pub use types::{registration_fields, FieldDef, FieldRule, RecordSchema};
pub use validator::validate;
