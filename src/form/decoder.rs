//! QR payload decode pipeline
//!
//! raw bytes -> base64 -> UTF-8 -> JSON object -> schema check -> date parse
//!
//! Each stage either hands its output to the next or ends the call with a
//! `DecodeError`. Nothing is partially returned and nothing is retried.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};

use super::date::ParsedDate;
use super::errors::{DecodeCause, DecodeResult};
use super::record::{DecodedForm, RegistrationForm};
use super::types::RecordSchema;
use super::validator::{json_type_name, validate};

/// Decode pipeline bound to one schema.
///
/// Holds only a shared reference, so a single schema can back decoders on
/// any number of threads.
///
/// Accepted records always become a `RegistrationForm`, so the schema must
/// keep every row of `registration_fields()` that the form requires. It may
/// tighten rules or add rows. A schema that drops a required form field lets
/// records through validation that the form then rejects as structurally
/// malformed.
#[derive(Debug, Clone, Copy)]
pub struct FormDecoder<'a> {
    schema: &'a RecordSchema,
}

impl<'a> FormDecoder<'a> {
    pub fn new(schema: &'a RecordSchema) -> Self {
        Self { schema }
    }

    /// Decodes a scanned payload into a validated form.
    ///
    /// Surrounding ASCII whitespace is ignored; any other byte outside the
    /// base64 alphabet is an encoding error.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the pipeline:
    /// - FORM_ENCODING_ERROR: bad base64 or bad UTF-8
    /// - FORM_STRUCTURAL_PARSE_ERROR: not JSON, or not an object
    /// - FORM_SCHEMA_VIOLATION: missing field or broken field rule
    /// - FORM_DATE_PARSE_ERROR: `date` is not a real day
    pub fn decode(&self, payload: &[u8]) -> DecodeResult<DecodedForm> {
        let record = parse_record(payload)?;

        validate(&record, self.schema)?;

        let form: RegistrationForm = serde_json::from_value(Value::Object(record))?;

        let date_parsed = ParsedDate::parse(&form.date).map_err(|source| DecodeCause::Date {
            value: form.date.clone(),
            source,
        })?;

        Ok(DecodedForm::new(form, date_parsed))
    }

    /// Validates an untyped record without the transport layers.
    pub fn check(&self, record: &Map<String, Value>) -> DecodeResult<()> {
        validate(record, self.schema)?;
        Ok(())
    }
}

/// Decodes a payload against the built-in registration schema.
pub fn decode_form(payload: &[u8]) -> DecodeResult<DecodedForm> {
    FormDecoder::new(RecordSchema::registration()).decode(payload)
}

/// Builds a payload from a record: compact JSON, UTF-8, standard base64.
///
/// Performs no validation; the output is only as valid as its input.
pub fn encode_form(record: &Map<String, Value>) -> Vec<u8> {
    let json = Value::Object(record.clone()).to_string();
    STANDARD.encode(json).into_bytes()
}

/// Reverses the transport encoding, stopping short of validation.
fn parse_record(payload: &[u8]) -> DecodeResult<Map<String, Value>> {
    let bytes = STANDARD.decode(payload.trim_ascii())?;
    let text = std::str::from_utf8(&bytes)?;
    let value: Value = serde_json::from_str(text)?;

    match value {
        Value::Object(record) => Ok(record),
        other => Err(DecodeCause::NotAnObject(json_type_name(&other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::errors::DecodeErrorKind;
    use crate::form::record::Payment;
    use crate::form::types::{registration_fields, FieldDef, FieldRule};
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn hannah() -> Map<String, Value> {
        object(json!({
            "version": "alpha",
            "payment": "regular",
            "firstname": "Hannah",
            "lastname": "Acker",
            "email": "h.acker@example.com",
            "pgp": "0x1111111111111111",
            "addr1": "Hauptstrasse 1",
            "addr2": "12345 Entenhausen",
            "country": "DE",
            "date": "29.3.2018"
        }))
    }

    fn raw(text: &str) -> Vec<u8> {
        STANDARD.encode(text).into_bytes()
    }

    #[test]
    fn test_decode_valid_form() {
        let decoded = decode_form(&encode_form(&hannah())).unwrap();
        let form = decoded.form();
        assert_eq!(form.firstname, "Hannah");
        assert_eq!(form.payment, Payment::Regular);
        assert_eq!(form.addr3, None);
        assert_eq!(decoded.date_parsed(), ParsedDate { day: 29, month: 3, year: 2018 });
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let mut record = hannah();
        record.insert("addr3".into(), json!("c/o Frank Nord"));
        record.insert("c/o".into(), json!("unused"));

        let decoded = decode_form(&encode_form(&record)).unwrap();
        assert_eq!(decoded.form().to_record(), record);
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut record = hannah();
        record.insert("version".into(), json!("foobar"));

        let err = decode_form(&encode_form(&record)).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::SchemaViolation);
        assert_eq!(err.field(), Some("version"));
        assert!(err.to_string().starts_with("decode failed:"));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = decode_form(&[0xFF, 0x41, 0x41, 0x41]).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Encoding);

        let err = decode_form(b"not base64!").unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Encoding);
    }

    #[test]
    fn test_bad_padding_rejected() {
        let mut payload = encode_form(&hannah());
        while payload.last() == Some(&b'=') {
            payload.pop();
        }
        payload.push(b'=');
        payload.push(b'=');
        payload.push(b'=');
        assert_eq!(decode_form(&payload).unwrap_err().kind(), DecodeErrorKind::Encoding);
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let payload = STANDARD.encode([0xC3, 0x28]).into_bytes();
        let err = decode_form(&payload).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::Encoding);
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let mut payload = b"  ".to_vec();
        payload.extend(encode_form(&hannah()));
        payload.extend(b"\r\n");
        assert!(decode_form(&payload).is_ok());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = decode_form(&raw("{\"version\": ")).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::StructuralParse);
    }

    #[test]
    fn test_non_object_rejected() {
        for text in ["[1, 2]", "\"alpha\"", "null", "42"] {
            let err = decode_form(&raw(text)).unwrap_err();
            assert_eq!(err.kind(), DecodeErrorKind::StructuralParse, "payload {}", text);
        }
        let err = decode_form(&raw("[]")).unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_impossible_date_rejected() {
        let mut record = hannah();
        record.insert("date".into(), json!("31.4.2018"));

        let err = decode_form(&encode_form(&record)).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::DateParse);
        assert!(err.to_string().contains("31.4.2018"));
    }

    #[test]
    fn test_schema_checked_before_date() {
        let mut record = hannah();
        record.insert("date".into(), json!("31.4.2018"));
        record.remove("email");

        let err = decode_form(&encode_form(&record)).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::SchemaViolation);
        assert_eq!(err.field(), Some("email"));
    }

    #[test]
    fn test_check_record() {
        let decoder = FormDecoder::new(RecordSchema::registration());
        assert!(decoder.check(&hannah()).is_ok());

        let mut record = hannah();
        record.insert("country".into(), json!("de"));
        assert_eq!(
            decoder.check(&record).unwrap_err().kind(),
            DecodeErrorKind::SchemaViolation
        );
    }

    #[test]
    fn test_stricter_schema_narrows_accepted_forms() {
        let fields = registration_fields()
            .into_iter()
            .map(|def| match def.name {
                "country" => FieldDef::required("country", FieldRule::Pattern("DE|AT|CH")),
                _ => def,
            })
            .collect();
        let schema = RecordSchema::new("alpha-dach", fields).unwrap();
        let decoder = FormDecoder::new(&schema);

        assert!(decoder.decode(&encode_form(&hannah())).is_ok());

        let mut record = hannah();
        record.insert("country".into(), json!("FR"));
        assert!(decode_form(&encode_form(&record)).is_ok());

        let err = decoder.decode(&encode_form(&record)).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::SchemaViolation);
        assert_eq!(err.field(), Some("country"));
    }

    #[test]
    fn test_year_zero_rejected_after_schema() {
        let mut record = hannah();
        record.insert("date".into(), json!("1.1.0000"));

        let err = decode_form(&encode_form(&record)).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::DateParse);
    }

    #[test]
    fn test_encode_does_not_validate() {
        let payload = encode_form(&object(json!({"version": "foobar"})));
        let text = STANDARD.decode(&payload).unwrap();
        assert_eq!(text, br#"{"version":"foobar"}"#);
    }
}
