use pretty_assertions::assert_eq;
use roster_gateway::{MemoryRecordStore, RecordStore};
use roster_model::{Field, StudentId, StudentRecord};
use roster_web::screens::{FormMode, StudentForm, Submission};

fn asha() -> StudentRecord {
    StudentRecord::empty()
        .with(Field::Name, "Asha")
        .with(Field::Class, "5")
        .with(Field::Section, "B")
        .with(Field::RollNumber, "12")
        .with(Field::Age, "10")
        .with(Field::Gender, "F")
        .with(Field::Address, "12 Elm St")
        .with(Field::PhoneNumber, "9876543210")
        .with(Field::Email, "a@b.com")
        .with(Field::MotherName, "X")
        .with(Field::FatherName, "Y")
        .with(Field::EmergencyContact, "9123456780")
}

fn fill(form: &mut StudentForm, record: &StudentRecord) {
    for field in Field::ALL {
        assert!(form.edit(field, record.get(field)));
    }
}

// ── Modes ───────────────────────────────────────────────────────

#[test]
fn mode_titles_and_labels() {
    assert_eq!(FormMode::Create.title(), "Add Student");
    assert_eq!(FormMode::Edit.title(), "Edit Student");
    assert_eq!(FormMode::View.title(), "View Student");
    assert_eq!(FormMode::Create.submit_label(), "Submit");
    assert_eq!(FormMode::Edit.submit_label(), "Save");
    assert!(FormMode::View.is_read_only());
    assert!(!FormMode::Edit.is_read_only());
}

#[test]
fn new_form_is_closed() {
    let mut form = StudentForm::new();
    assert!(!form.is_open());
    assert!(form.draft().is_none());
    assert!(!form.edit(Field::Name, "x"));
    assert_eq!(form.submit(), Submission::NotOpen);
}

#[test]
fn create_mode_starts_empty_even_with_initial_data() {
    let mut form = StudentForm::new();
    form.open(FormMode::Create, Some(asha().with_id(StudentId::new("s1"))));
    assert_eq!(form.mode(), Some(FormMode::Create));
    assert_eq!(form.draft(), Some(&StudentRecord::empty()));
}

#[test]
fn reopening_discards_previous_draft_and_errors() {
    let mut form = StudentForm::new();
    form.open(FormMode::Create, None);
    form.edit(Field::Name, "half typed");
    assert!(matches!(form.submit(), Submission::Rejected(_)));

    form.open(FormMode::Create, None);
    assert_eq!(form.draft(), Some(&StudentRecord::empty()));
    assert!(form.errors().unwrap().is_empty());
}

// ── Submit ──────────────────────────────────────────────────────

#[test]
fn view_mode_submit_dismisses_without_validation() {
    let mut form = StudentForm::new();
    form.open(FormMode::View, Some(StudentRecord::empty().with_id(StudentId::new("s1"))));

    assert!(!form.edit(Field::Name, "changed"));
    assert_eq!(form.submit(), Submission::Dismissed);
    assert!(!form.is_open());
}

#[test]
fn empty_create_is_rejected_with_every_field() {
    let mut form = StudentForm::new();
    form.open(FormMode::Create, None);

    let Submission::Rejected(errors) = form.submit() else {
        panic!("expected rejection");
    };
    assert_eq!(errors.len(), 12);
    assert_eq!(errors.get(Field::Name), Some("Name is required."));
    assert!(form.is_open());
    assert_eq!(form.errors(), Some(&errors));
}

#[test]
fn rejected_submit_keeps_entered_data() {
    let mut form = StudentForm::new();
    form.open(FormMode::Create, None);
    fill(&mut form, &asha());
    form.edit(Field::PhoneNumber, "12345");

    let Submission::Rejected(errors) = form.submit() else {
        panic!("expected rejection");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::PhoneNumber]);
    assert_eq!(form.draft().unwrap().name, "Asha");
    assert_eq!(form.draft().unwrap().phone_number, "12345");
}

#[test]
fn accepted_edit_carries_id_and_clears_errors() {
    let mut form = StudentForm::new();
    let original = asha().with_id(StudentId::new("s1"));
    form.open(FormMode::Edit, Some(original.clone()));
    form.edit(Field::Age, "");
    assert!(matches!(form.submit(), Submission::Rejected(_)));

    form.edit(Field::Age, "11");
    let Submission::Accepted(record) = form.submit() else {
        panic!("expected acceptance");
    };
    assert_eq!(record.id, original.id);
    assert_eq!(record.age, "11");
    assert!(form.errors().unwrap().is_empty());
    // the owner closes the form after persisting
    assert!(form.is_open());
}

// ── Direct save ─────────────────────────────────────────────────

#[tokio::test]
async fn submit_direct_creates_and_closes() {
    let store = MemoryRecordStore::new();
    let mut form = StudentForm::new();
    form.open(FormMode::Create, None);
    fill(&mut form, &asha());

    let Submission::Accepted(saved) = form.submit_direct(&store).await.unwrap() else {
        panic!("expected acceptance");
    };
    assert!(saved.is_persisted());
    assert!(!form.is_open());

    let docs = store.list("students").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(Some(StudentId::new(docs[0].id.as_str())), saved.id);
}

#[tokio::test]
async fn submit_direct_failure_keeps_form_open() {
    let store = MemoryRecordStore::new();
    store.set_offline(true);
    let mut form = StudentForm::new();
    form.open(FormMode::Create, None);
    fill(&mut form, &asha());

    assert!(form.submit_direct(&store).await.is_err());
    assert!(form.is_open());
    assert_eq!(form.draft().unwrap().name, "Asha");
}

#[tokio::test]
async fn submit_direct_does_not_persist_invalid_data() {
    let store = MemoryRecordStore::new();
    let mut form = StudentForm::new();
    form.open(FormMode::Create, None);

    let outcome = form.submit_direct(&store).await.unwrap();
    assert!(matches!(outcome, Submission::Rejected(_)));
    assert!(store.calls().await.is_empty());
}
