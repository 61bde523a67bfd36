use serde::{Deserialize, Serialize};

/// One editable attribute of a [`StudentRecord`](crate::StudentRecord).
///
/// Declaration order is display order; `Ord` follows it, so maps keyed by
/// `Field` iterate in the same order the form renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Class,
    Section,
    RollNumber,
    Age,
    Gender,
    Address,
    PhoneNumber,
    Email,
    MotherName,
    FatherName,
    EmergencyContact,
}

impl Field {
    /// Every field, in schema order.
    pub const ALL: [Field; 12] = [
        Field::Name,
        Field::Class,
        Field::Section,
        Field::RollNumber,
        Field::Age,
        Field::Gender,
        Field::Address,
        Field::PhoneNumber,
        Field::Email,
        Field::MotherName,
        Field::FatherName,
        Field::EmergencyContact,
    ];

    /// Wire key used in JSON, form posts and document-store field maps.
    pub const fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Class => "class",
            Field::Section => "section",
            Field::RollNumber => "rollNumber",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::PhoneNumber => "phoneNumber",
            Field::Email => "email",
            Field::MotherName => "motherName",
            Field::FatherName => "fatherName",
            Field::EmergencyContact => "emergencyContact",
        }
    }

    /// Looks a field up by its wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Human-readable label, used as the input placeholder.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Class => "Class",
            Field::Section => "Section",
            Field::RollNumber => "Roll Number",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::Address => "Address",
            Field::PhoneNumber => "Phone Number",
            Field::Email => "Email",
            Field::MotherName => "Mother Name",
            Field::FatherName => "Father Name",
            Field::EmergencyContact => "Emergency Contact",
        }
    }

    /// The schema row describing this field.
    pub fn spec(self) -> &'static FieldSpec {
        &STUDENT_SCHEMA[self as usize]
    }
}

/// How a field is presented as an HTML input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Number,
    Email,
}

impl InputKind {
    /// Value for the `type` attribute of the rendered `<input>`.
    pub const fn html_type(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Email => "email",
        }
    }
}

/// The check applied to a field on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Non-empty after trimming whitespace.
    Required,
    /// Parses as a finite number.
    Number,
    /// Parses as a finite number greater than zero.
    PositiveNumber,
    /// Exactly ten ASCII digits, nothing else.
    TenDigits,
    /// Loose `local@domain.tld` shape.
    Email,
}

/// A row of the student schema: which field, how it renders, how it validates,
/// and the message shown beneath it when the rule fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub kind: InputKind,
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldSpec {
    const fn new(field: Field, kind: InputKind, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            kind,
            rule,
            message,
        }
    }
}

/// The ordered student schema. Index `i` describes `Field::ALL[i]`.
pub const STUDENT_SCHEMA: [FieldSpec; 12] = [
    FieldSpec::new(Field::Name, InputKind::Text, Rule::Required, "Name is required."),
    FieldSpec::new(Field::Class, InputKind::Text, Rule::Required, "Class is required."),
    FieldSpec::new(Field::Section, InputKind::Text, Rule::Required, "Section is required."),
    FieldSpec::new(
        Field::RollNumber,
        InputKind::Number,
        Rule::Number,
        "Roll number must be a valid number.",
    ),
    FieldSpec::new(
        Field::Age,
        InputKind::Number,
        Rule::PositiveNumber,
        "Age must be a positive number.",
    ),
    FieldSpec::new(Field::Gender, InputKind::Text, Rule::Required, "Gender is required."),
    FieldSpec::new(Field::Address, InputKind::Text, Rule::Required, "Address is required."),
    FieldSpec::new(
        Field::PhoneNumber,
        InputKind::Text,
        Rule::TenDigits,
        "Phone number must be a valid 10-digit number.",
    ),
    FieldSpec::new(Field::Email, InputKind::Email, Rule::Email, "Email must be valid."),
    FieldSpec::new(
        Field::MotherName,
        InputKind::Text,
        Rule::Required,
        "Mother's name is required.",
    ),
    FieldSpec::new(
        Field::FatherName,
        InputKind::Text,
        Rule::Required,
        "Father's name is required.",
    ),
    FieldSpec::new(
        Field::EmergencyContact,
        InputKind::Text,
        Rule::TenDigits,
        "Emergency contact must be a valid 10-digit number.",
    ),
];
