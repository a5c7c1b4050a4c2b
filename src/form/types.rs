//! Field descriptors and record schemas
//!
//! A schema is a table of `FieldDef` rows. Adding a field to the form means
//! adding one row; the validator has no per-field code.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::{SchemaError, SchemaResult};

/// Constraint on the string value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must equal this literal
    Literal(&'static str),
    /// Value must equal one of these options
    OneOf(&'static [&'static str]),
    /// Value length in characters must be within `min..=max`
    Length { min: usize, max: usize },
    /// Whole value must match this regular expression
    Pattern(&'static str),
}

impl FieldRule {
    /// Human-readable description used in violation messages
    pub fn describe(&self) -> String {
        match self {
            FieldRule::Literal(lit) => format!("literal '{}'", lit),
            FieldRule::OneOf(options) => format!("one of [{}]", options.join(", ")),
            FieldRule::Length { min, max } => format!("{} to {} characters", min, max),
            FieldRule::Pattern(pattern) => format!("match /{}/", pattern),
        }
    }
}

/// One schema row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub rule: FieldRule,
    pub required: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            rule,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            rule,
            required: false,
        }
    }
}

/// Compiled field: the definition plus its anchored regex, if any
#[derive(Debug, Clone)]
pub(crate) struct CompiledField {
    pub(crate) def: FieldDef,
    pub(crate) regex: Option<Regex>,
}

/// Immutable set of field rules a record must satisfy.
///
/// Built once and shared read-only; `Sync`, so one instance can serve any
/// number of threads.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    version: &'static str,
    fields: Vec<CompiledField>,
}

impl RecordSchema {
    /// Builds a schema, checking the definition itself.
    ///
    /// # Errors
    ///
    /// - duplicate field names
    /// - a pattern that does not compile
    /// - a length rule with `min > max`
    pub fn new(version: &'static str, defs: Vec<FieldDef>) -> SchemaResult<Self> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(defs.len());

        for def in defs {
            if !seen.insert(def.name) {
                return Err(SchemaError::DuplicateField(def.name.to_string()));
            }

            let regex = match &def.rule {
                FieldRule::Pattern(pattern) => {
                    let anchored = format!("^(?:{})$", pattern);
                    let regex = Regex::new(&anchored).map_err(|e| SchemaError::InvalidPattern {
                        field: def.name.to_string(),
                        reason: e.to_string(),
                    })?;
                    Some(regex)
                }
                FieldRule::Length { min, max } if min > max => {
                    return Err(SchemaError::InvalidLength {
                        field: def.name.to_string(),
                        min: *min,
                        max: *max,
                    });
                }
                _ => None,
            };

            fields.push(CompiledField { def, regex });
        }

        Ok(Self { version, fields })
    }

    /// The built-in registration form schema (form version "alpha")
    pub fn registration() -> &'static RecordSchema {
        static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            RecordSchema::new("alpha", registration_fields())
                .expect("built-in registration schema is well-formed")
        })
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Field definitions in schema order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().map(|f| &f.def)
    }

    /// Names of required fields in schema order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.def.required)
            .map(|f| f.def.name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.def.name == name).map(|f| &f.def)
    }

    pub(crate) fn compiled(&self) -> &[CompiledField] {
        &self.fields
    }
}

const PAYMENT_OPTIONS: &[&str] = &["regular", "reduced"];

const NAME: FieldRule = FieldRule::Length { min: 1, max: 30 };

/// Rows of the registration form
pub fn registration_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::required("version", FieldRule::Literal("alpha")),
        FieldDef::required("payment", FieldRule::OneOf(PAYMENT_OPTIONS)),
        FieldDef::required("firstname", NAME),
        FieldDef::required("lastname", NAME),
        FieldDef::required("email", FieldRule::Pattern(r".+@.+\..+")),
        FieldDef::required("pgp", FieldRule::Pattern(r"(0x[a-f0-9]{16})?")),
        FieldDef::required("addr1", NAME),
        FieldDef::required("addr2", NAME),
        FieldDef::optional("addr3", FieldRule::Length { min: 0, max: 30 }),
        FieldDef::required("country", FieldRule::Pattern(r"[A-Z]{2}")),
        FieldDef::required("date", FieldRule::Pattern(r"[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4}")),
    ]
}
