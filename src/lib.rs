//! regform - decode and validate registration form QR payloads
//!
//! A payload is base64 over a UTF-8 JSON object. `form::decode_form` turns
//! it into a `DecodedForm` or a single `DecodeError`.

pub mod cli;
pub mod form;
pub mod observability;

pub use form::{decode_form, encode_form, DecodeError, DecodeErrorKind, DecodedForm, RecordSchema};
