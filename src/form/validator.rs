//! Record validation against a `RecordSchema`
//!
//! Validation semantics:
//! - every required field is present
//! - every known field that is present holds a string satisfying its rule
//! - unknown keys are ignored
//!
//! Violations are reported in a fixed order: missing required fields first,
//! then value violations, each in schema order. Validation never mutates the
//! record.

use serde_json::{Map, Value};

use super::errors::{ValidationFailure, Violation};
use super::types::{CompiledField, FieldRule, RecordSchema};

/// Validates `record` against `schema`.
///
/// # Errors
///
/// Returns a `ValidationFailure` listing every broken rule.
pub fn validate(record: &Map<String, Value>, schema: &RecordSchema) -> Result<(), ValidationFailure> {
    let mut violations = Vec::new();

    for name in schema.required_fields() {
        if !record.contains_key(name) {
            violations.push(Violation::missing_field(name));
        }
    }

    for field in schema.compiled() {
        if let Some(value) = record.get(field.def.name) {
            if let Some(violation) = check_value(field, value) {
                violations.push(violation);
            }
        }
    }

    match ValidationFailure::from_violations(violations) {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

/// Checks one present value against its field rule.
fn check_value(field: &CompiledField, value: &Value) -> Option<Violation> {
    let name = field.def.name;
    let s = match value.as_str() {
        Some(s) => s,
        None => return Some(Violation::type_mismatch(name, json_type_name(value))),
    };

    let ok = match &field.def.rule {
        FieldRule::Literal(lit) => s == *lit,
        FieldRule::OneOf(options) => options.contains(&s),
        FieldRule::Length { min, max } => {
            let len = s.chars().count();
            len >= *min && len <= *max
        }
        FieldRule::Pattern(_) => field.regex.as_ref().is_some_and(|re| re.is_match(s)),
    };

    if ok {
        None
    } else {
        Some(Violation::new(name, field.def.rule.describe(), format!("'{}'", s)))
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
