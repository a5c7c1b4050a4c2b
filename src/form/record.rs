//! Typed registration records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::date::ParsedDate;

/// Membership fee category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payment {
    Regular,
    Reduced,
}

impl Payment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Payment::Regular => "regular",
            Payment::Reduced => "reduced",
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration form fields, with the wire field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub version: String,
    pub payment: Payment,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Empty, or `0x` followed by 16 lowercase hex digits
    pub pgp: String,
    pub addr1: String,
    pub addr2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr3: Option<String>,
    /// Two-letter country code
    pub country: String,
    pub date: String,
    /// Keys the schema does not know about, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistrationForm {
    /// Rebuilds the untyped key/value record this form was decoded from.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = self.extra.clone();

        put(&mut record, "version", &self.version);
        put(&mut record, "payment", self.payment.as_str());
        put(&mut record, "firstname", &self.firstname);
        put(&mut record, "lastname", &self.lastname);
        put(&mut record, "email", &self.email);
        put(&mut record, "pgp", &self.pgp);
        put(&mut record, "addr1", &self.addr1);
        put(&mut record, "addr2", &self.addr2);
        if let Some(addr3) = &self.addr3 {
            put(&mut record, "addr3", addr3);
        }
        put(&mut record, "country", &self.country);
        put(&mut record, "date", &self.date);

        record
    }
}

fn put(record: &mut Map<String, Value>, key: &str, value: &str) {
    record.insert(key.to_string(), Value::String(value.to_string()));
}

/// A fully validated form plus its parsed date.
///
/// Only the decode pipeline constructs this; holding one means every rule of
/// the schema held.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedForm {
    #[serde(flatten)]
    form: RegistrationForm,
    date_parsed: ParsedDate,
}

impl DecodedForm {
    pub(crate) fn new(form: RegistrationForm, date_parsed: ParsedDate) -> Self {
        Self { form, date_parsed }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn date_parsed(&self) -> ParsedDate {
        self.date_parsed
    }
}
