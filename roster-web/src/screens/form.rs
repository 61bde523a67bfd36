//! The student modal.
//!
//! # States
//! - closed
//! - open for create (empty record, editable)
//! - open for edit (pre-filled, editable)
//! - open for view (pre-filled, read-only)
//!
//! Submitting in view mode closes the form without validating or saving.
//! Submitting otherwise validates every field; a rejected submission keeps the
//! form open with its data and the field-keyed errors.
//!
//! An accepted submission is handed to the form's owner, which persists it and
//! closes the form once the store confirms. Without an owner,
//! [`StudentForm::submit_direct`] creates the record itself.

use roster_gateway::{RecordStore, StoreError};
use roster_model::{Field, STUDENTS_COLLECTION, StudentId, StudentRecord, ValidationErrors, validate};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
    View,
}

impl FormMode {
    pub const fn title(self) -> &'static str {
        match self {
            FormMode::Create => "Add Student",
            FormMode::Edit => "Edit Student",
            FormMode::View => "View Student",
        }
    }

    pub const fn submit_label(self) -> &'static str {
        match self {
            FormMode::Create => "Submit",
            FormMode::Edit => "Save",
            FormMode::View => "Close",
        }
    }

    pub const fn is_read_only(self) -> bool {
        matches!(self, FormMode::View)
    }
}

/// Outcome of [`StudentForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The form was not open.
    NotOpen,
    /// View mode: closed, nothing validated or saved.
    Dismissed,
    /// Validation failed; the form is still open.
    Rejected(ValidationErrors),
    /// The full field set, including the id when editing. The form is still
    /// open until its owner closes it.
    Accepted(StudentRecord),
}

#[derive(Debug, Clone)]
struct OpenForm {
    mode: FormMode,
    draft: StudentRecord,
    errors: ValidationErrors,
}

#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    open: Option<OpenForm>,
}

impl StudentForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the form, discarding any previous draft and errors.
    ///
    /// Create mode always starts from an empty record; `initial` is ignored.
    pub fn open(&mut self, mode: FormMode, initial: Option<StudentRecord>) {
        let draft = match mode {
            FormMode::Create => StudentRecord::empty(),
            FormMode::Edit | FormMode::View => initial.unwrap_or_default(),
        };
        debug!("Opening student form in {:?} mode", mode);
        self.open = Some(OpenForm {
            mode,
            draft,
            errors: ValidationErrors::new(),
        });
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.open.as_ref().map(|form| form.mode)
    }

    /// The record being shown or edited.
    pub fn draft(&self) -> Option<&StudentRecord> {
        self.open.as_ref().map(|form| &form.draft)
    }

    /// Errors from the last rejected submission.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.open.as_ref().map(|form| &form.errors)
    }

    /// Changes one field of the draft. Returns `false` when the form is
    /// closed or read-only.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        match &mut self.open {
            Some(form) if !form.mode.is_read_only() => {
                form.draft.set(field, value);
                true
            }
            _ => false,
        }
    }

    /// Validates and hands back the draft. See [`Submission`].
    pub fn submit(&mut self) -> Submission {
        let Some(form) = &mut self.open else {
            return Submission::NotOpen;
        };

        if form.mode.is_read_only() {
            self.open = None;
            return Submission::Dismissed;
        }

        match validate(&form.draft) {
            Ok(()) => {
                form.errors = ValidationErrors::new();
                Submission::Accepted(form.draft.clone())
            }
            Err(errors) => {
                debug!("Student form rejected: {}", errors);
                form.errors = errors.clone();
                Submission::Rejected(errors)
            }
        }
    }

    /// Submits and, when accepted, creates the record through `store`.
    ///
    /// Closes the form once the store confirms. A failed create is logged
    /// and returned; the form stays open so the user can retry.
    pub async fn submit_direct(&mut self, store: &dyn RecordStore) -> Result<Submission, StoreError> {
        let record = match self.submit() {
            Submission::Accepted(record) => record,
            other => return Ok(other),
        };

        match store.create(STUDENTS_COLLECTION, &record.to_fields()).await {
            Ok(id) => {
                info!("Student {} created from form", id);
                self.close();
                Ok(Submission::Accepted(record.with_id(StudentId::new(id))))
            }
            Err(e) => {
                error!("Error adding student: {e}");
                Err(e)
            }
        }
    }
}
