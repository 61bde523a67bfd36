use super::form::{FormMode, StudentForm, Submission};
use super::notice::Notice;
use roster_gateway::{RecordStore, StoreError, StoreResult};
use roster_model::{STUDENTS_COLLECTION, StudentId, StudentRecord};
use std::sync::Arc;
use tracing::{info, warn};

pub const DELETE_SUCCEEDED: &str = "Student deleted successfully.";
pub const DELETE_FAILED: &str = "Error deleting student.";
pub const SAVE_FAILED: &str = "Error saving student.";
pub const LOAD_FAILED: &str = "Error loading students.";

/// The roster list with its modal form.
///
/// Holds the in-memory list fetched from the store on first render. Every
/// mutation goes to the store first and touches the list only once the store
/// confirms, so a failed call leaves the list as it was.
pub struct StudentsScreen {
    store: Arc<dyn RecordStore>,
    students: Vec<StudentRecord>,
    loaded: bool,
    selected: Option<StudentRecord>,
    is_editing: bool,
    form: StudentForm,
    notice: Option<Notice>,
}

impl StudentsScreen {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            students: Vec::new(),
            loaded: false,
            selected: None,
            is_editing: false,
            form: StudentForm::new(),
            notice: None,
        }
    }

    /// Fetches the collection once. A failed fetch leaves the list empty,
    /// shows [`LOAD_FAILED`] and is retried on the next call.
    pub async fn ensure_loaded(&mut self) -> bool {
        if self.loaded {
            return true;
        }

        match self.store.list(STUDENTS_COLLECTION).await {
            Ok(docs) => {
                self.students = docs
                    .into_iter()
                    .map(|doc| StudentRecord::from_fields(Some(StudentId::new(doc.id)), &doc.fields))
                    .collect();
                self.loaded = true;
                info!(
                    "Loaded {} students from {}",
                    self.students.len(),
                    self.store.provider_name()
                );
                true
            }
            Err(e) => {
                warn!("Error loading students: {e}");
                self.notice = Some(Notice::error(LOAD_FAILED));
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn find(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.id.as_ref() == Some(id))
    }

    pub fn selected(&self) -> Option<&StudentRecord> {
        self.selected.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_modal_open(&self) -> bool {
        self.form.is_open()
    }

    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut StudentForm {
        &mut self.form
    }

    /// The current notice, unless it has expired.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired())
    }

    /// Drops the notice once its time is up.
    pub fn clear_expired_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Opens the form read-only on the record with `id`.
    pub fn view(&mut self, id: &StudentId) -> bool {
        self.open_existing(id, false)
    }

    /// Opens the form editable on the record with `id`.
    pub fn edit(&mut self, id: &StudentId) -> bool {
        self.open_existing(id, true)
    }

    fn open_existing(&mut self, id: &StudentId, editing: bool) -> bool {
        let Some(record) = self.find(id).cloned() else {
            return false;
        };
        let mode = if editing { FormMode::Edit } else { FormMode::View };
        self.form.open(mode, Some(record.clone()));
        self.selected = Some(record);
        self.is_editing = editing;
        true
    }

    /// Opens an empty form. Only view and edit set the editing flag.
    pub fn create(&mut self) {
        self.selected = None;
        self.is_editing = false;
        self.form.open(FormMode::Create, None);
    }

    /// Closes the form and clears the selection.
    pub fn close_form(&mut self) {
        self.form.close();
        self.selected = None;
        self.is_editing = false;
    }

    /// Submits the open form and saves it when it validates.
    ///
    /// `Accepted` carries the record as saved, store id included. A save
    /// failure is returned as the store's error; the form stays open and
    /// [`SAVE_FAILED`] is shown.
    pub async fn submit_form(&mut self) -> StoreResult<Submission> {
        let submission = self.form.submit();
        match submission {
            Submission::Accepted(record) => Ok(Submission::Accepted(self.save(record).await?)),
            Submission::Dismissed => {
                self.close_form();
                Ok(Submission::Dismissed)
            }
            other => Ok(other),
        }
    }

    /// Persists `record`: an update when it carries an id, a create otherwise.
    ///
    /// On success the list is updated in place (or appended to) and the form
    /// closes. On failure the list is untouched, the form stays open and
    /// [`SAVE_FAILED`] is shown.
    pub async fn save(&mut self, record: StudentRecord) -> StoreResult<StudentRecord> {
        let fields = record.to_fields();

        let saved = match record.id.clone() {
            Some(id) => {
                if let Err(e) = self.store.update(STUDENTS_COLLECTION, id.as_str(), &fields).await {
                    return Err(self.save_failed(e));
                }
                if let Some(slot) = self.students.iter_mut().find(|s| s.id.as_ref() == Some(&id)) {
                    *slot = record.clone();
                }
                info!("Student {} updated", id);
                record
            }
            None => {
                let id = match self.store.create(STUDENTS_COLLECTION, &fields).await {
                    Ok(id) => id,
                    Err(e) => return Err(self.save_failed(e)),
                };
                info!("Student {} created", id);
                let saved = record.with_id(StudentId::new(id));
                self.students.push(saved.clone());
                saved
            }
        };

        self.close_form();
        Ok(saved)
    }

    fn save_failed(&mut self, e: StoreError) -> StoreError {
        warn!("Error saving student: {e}");
        self.notice = Some(Notice::error(SAVE_FAILED));
        e
    }

    /// Deletes the record with `id`.
    ///
    /// Shows [`DELETE_SUCCEEDED`] and drops the record from the list once the
    /// store confirms; shows [`DELETE_FAILED`] and keeps the list otherwise.
    /// Returns whether the store confirmed.
    pub async fn delete(&mut self, id: &StudentId) -> bool {
        match self.store.delete(STUDENTS_COLLECTION, id.as_str()).await {
            Ok(()) => {
                self.students.retain(|s| s.id.as_ref() != Some(id));
                self.notice = Some(Notice::success(DELETE_SUCCEEDED));
                info!("Student {} deleted", id);
                true
            }
            Err(e) => {
                warn!("Error deleting student {}: {e}", id);
                self.notice = Some(Notice::error(DELETE_FAILED));
                false
            }
        }
    }
}
