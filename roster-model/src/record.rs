use crate::ids::StudentId;
use crate::schema::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untyped string-keyed field map, as exchanged with the document store.
pub type FieldMap = BTreeMap<String, String>;

/// A single student's data.
///
/// Every attribute is a string, matching the transport representation. Missing
/// attributes deserialize as empty strings; the rules in
/// [`validate`](crate::validate) decide whether a record may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub section: String,
    pub roll_number: String,
    pub age: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub mother_name: String,
    pub father_name: String,
    pub emergency_contact: String,
}

impl StudentRecord {
    /// An unsaved record with every field empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` once the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Reads one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Class => &self.class_name,
            Field::Section => &self.section,
            Field::RollNumber => &self.roll_number,
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::PhoneNumber => &self.phone_number,
            Field::Email => &self.email,
            Field::MotherName => &self.mother_name,
            Field::FatherName => &self.father_name,
            Field::EmergencyContact => &self.emergency_contact,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Class => &mut self.class_name,
            Field::Section => &mut self.section,
            Field::RollNumber => &mut self.roll_number,
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Address => &mut self.address,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Email => &mut self.email,
            Field::MotherName => &mut self.mother_name,
            Field::FatherName => &mut self.father_name,
            Field::EmergencyContact => &mut self.emergency_contact,
        }
    }

    /// Overwrites one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns a copy carrying `id`.
    #[must_use]
    pub fn with_id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }

    /// The field map sent to the document store. Never contains the id.
    pub fn to_fields(&self) -> FieldMap {
        Field::ALL
            .into_iter()
            .map(|field| (field.key().to_string(), self.get(field).to_string()))
            .collect()
    }

    /// Rebuilds a record from a stored document.
    ///
    /// Keys the schema does not know are ignored and missing keys become empty
    /// strings, so documents written by older clients still load.
    pub fn from_fields(id: Option<StudentId>, fields: &FieldMap) -> Self {
        let mut record = Self {
            id,
            ..Self::default()
        };
        for field in Field::ALL {
            if let Some(value) = fields.get(field.key()) {
                record.set(field, value.clone());
            }
        }
        record
    }

    /// Same fields, ignoring the id.
    pub fn same_fields(&self, other: &StudentRecord) -> bool {
        Field::ALL
            .into_iter()
            .all(|field| self.get(field) == other.get(field))
    }
}
