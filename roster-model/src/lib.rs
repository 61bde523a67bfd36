//! Student record model for Roster.
//!
//! Defines the types every other Roster crate depends on:
//! - [`StudentRecord`]: the single domain entity (string-typed fields, optional id)
//! - [`StudentId`]: the identifier assigned by the document store
//! - [`Field`] and [`STUDENT_SCHEMA`]: the ordered field table that drives both
//!   validation and form rendering
//! - [`validate`]: the submit-time rule check producing [`ValidationErrors`]

mod ids;
mod record;
mod schema;
mod validate;

pub use ids::StudentId;
pub use record::{FieldMap, StudentRecord};
pub use schema::{Field, FieldSpec, InputKind, Rule, STUDENT_SCHEMA};
pub use validate::{ValidationErrors, is_loose_email, is_ten_digits, parse_number, validate};

/// Name of the document-store collection holding student records.
pub const STUDENTS_COLLECTION: &str = "students";
