//! Submit-time validation of student records.
//!
//! Every field of [`STUDENT_SCHEMA`] is checked and all failures are collected;
//! a record is accepted only when none fail.

use crate::record::StudentRecord;
use crate::schema::{Field, Rule, STUDENT_SCHEMA};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

// `\d` in the regex crate matches any Unicode digit; the rule is ASCII only.
static TEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("ten-digit pattern is valid"));

static LOOSE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Field-keyed validation failures, ordered by schema position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    /// An empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Message for the field with wire key `key`, if it failed.
    pub fn get_key(&self, key: &str) -> Option<&'static str> {
        Field::from_key(key).and_then(|field| self.get(field))
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failed fields in schema order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Checks `record` against the student schema.
///
/// # Errors
/// Returns every failing field with its message. The id is never checked.
pub fn validate(record: &StudentRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for spec in &STUDENT_SCHEMA {
        if !spec.rule.accepts(record.get(spec.field)) {
            errors.insert(spec.field, spec.message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl Rule {
    /// Returns `true` when `value` satisfies the rule.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::Number => parse_number(value).is_some(),
            Rule::PositiveNumber => parse_number(value).is_some_and(|n| n > 0.0),
            Rule::TenDigits => is_ten_digits(value),
            Rule::Email => !value.trim().is_empty() && is_loose_email(value),
        }
    }
}

/// Parses a numeric form value. Surrounding whitespace is allowed; blank,
/// non-numeric, NaN and infinite values are not.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Exactly ten ASCII digits.
pub fn is_ten_digits(value: &str) -> bool {
    TEN_DIGITS.is_match(value)
}

/// Something, an `@`, something, a dot, something.
pub fn is_loose_email(value: &str) -> bool {
    LOOSE_EMAIL.is_match(value)
}
