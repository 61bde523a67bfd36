use pretty_assertions::assert_eq;
use roster_gateway::{Fields, MemoryRecordStore, RecordStore, StoreCall};
use roster_model::{Field, StudentId, StudentRecord};
use roster_web::screens::{
    DELETE_FAILED, DELETE_SUCCEEDED, FormMode, LOAD_FAILED, NOTICE_TTL, NoticeKind, SAVE_FAILED,
    StudentsScreen, Submission,
};
use std::sync::Arc;
use std::time::Duration;

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

async fn seeded(ids: &[&str]) -> (Arc<MemoryRecordStore>, StudentsScreen) {
    let store = Arc::new(MemoryRecordStore::new());
    for id in ids {
        let fields: Fields = asha().with(Field::Name, *id).to_fields();
        store.seed("students", *id, fields).await;
    }
    let mut screen = StudentsScreen::new(store.clone());
    assert!(screen.ensure_loaded().await);
    (store, screen)
}

fn ids(screen: &StudentsScreen) -> Vec<String> {
    screen
        .students()
        .iter()
        .map(|s| s.id.clone().unwrap().into_inner())
        .collect()
}

// ── Loading ─────────────────────────────────────────────────────

#[tokio::test]
async fn loads_once_with_ids() {
    let (store, mut screen) = seeded(&["s1", "s2"]).await;
    assert_eq!(ids(&screen), vec!["s1", "s2"]);
    assert_eq!(screen.students()[0].name, "s1");

    screen.ensure_loaded().await;
    let lists = store
        .calls()
        .await
        .into_iter()
        .filter(|c| matches!(c, StoreCall::List { .. }))
        .count();
    assert_eq!(lists, 1);
}

#[tokio::test]
async fn failed_load_shows_notice_and_retries() {
    let store = Arc::new(MemoryRecordStore::new());
    store.seed("students", "s1", asha().to_fields()).await;
    store.set_offline(true);
    let mut screen = StudentsScreen::new(store.clone());

    assert!(!screen.ensure_loaded().await);
    assert!(screen.students().is_empty());
    assert_eq!(screen.notice().map(|n| n.text), Some(LOAD_FAILED));

    store.set_offline(false);
    assert!(screen.ensure_loaded().await);
    assert_eq!(ids(&screen), vec!["s1"]);
}

// ── Opening the modal ───────────────────────────────────────────

#[tokio::test]
async fn view_opens_read_only_on_selection() {
    let (_, mut screen) = seeded(&["s1"]).await;
    assert!(screen.view(&StudentId::new("s1")));

    assert!(screen.is_modal_open());
    assert!(!screen.is_editing());
    assert_eq!(screen.form().mode(), Some(FormMode::View));
    assert_eq!(screen.selected().unwrap().id, Some(StudentId::new("s1")));
}

#[tokio::test]
async fn edit_opens_prefilled() {
    let (_, mut screen) = seeded(&["s1"]).await;
    assert!(screen.edit(&StudentId::new("s1")));

    assert!(screen.is_editing());
    assert_eq!(screen.form().mode(), Some(FormMode::Edit));
    assert_eq!(screen.form().draft().unwrap().name, "s1");
}

#[tokio::test]
async fn unknown_id_does_not_open() {
    let (_, mut screen) = seeded(&["s1"]).await;
    assert!(!screen.view(&StudentId::new("nope")));
    assert!(!screen.edit(&StudentId::new("nope")));
    assert!(!screen.is_modal_open());
}

#[tokio::test]
async fn create_clears_selection() {
    let (_, mut screen) = seeded(&["s1"]).await;
    screen.view(&StudentId::new("s1"));
    screen.create();

    assert!(screen.selected().is_none());
    assert!(!screen.is_editing());
    assert_eq!(screen.form().mode(), Some(FormMode::Create));
    assert_eq!(screen.form().draft(), Some(&StudentRecord::empty()));
}

#[tokio::test]
async fn view_then_submit_closes_without_store_calls() {
    let (store, mut screen) = seeded(&["s1"]).await;
    screen.view(&StudentId::new("s1"));

    assert_eq!(screen.submit_form().await.unwrap(), Submission::Dismissed);
    assert!(!screen.is_modal_open());
    assert!(store.calls().await.iter().all(|c| !c.is_mutation()));
}

#[tokio::test]
async fn cancel_discards_edits() {
    let (store, mut screen) = seeded(&["s1"]).await;
    screen.edit(&StudentId::new("s1"));
    screen.form_mut().edit(Field::Name, "Changed");
    screen.close_form();

    assert!(!screen.is_modal_open());
    assert_eq!(screen.students()[0].name, "s1");
    assert!(store.calls().await.iter().all(|c| !c.is_mutation()));
}

// ── Saving ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_appends_with_store_id() {
    let (store, mut screen) = seeded(&[]).await;
    screen.create();
    for field in Field::ALL {
        screen.form_mut().edit(field, asha().get(field));
    }

    let Submission::Accepted(saved) = screen.submit_form().await.unwrap() else {
        panic!("valid create was not accepted");
    };
    assert!(!screen.is_modal_open());
    assert_eq!(screen.students().len(), 1);

    let docs = store.list("students").await.unwrap();
    assert_eq!(ids(&screen), vec![docs[0].id.clone()]);
    assert_eq!(saved.id, Some(StudentId::new(docs[0].id.as_str())));
    assert_eq!(screen.students()[0].name, "Asha");
}

#[tokio::test]
async fn invalid_create_makes_no_store_call() {
    let (store, mut screen) = seeded(&[]).await;
    screen.create();

    assert!(matches!(screen.submit_form().await, Ok(Submission::Rejected(_))));
    assert!(screen.is_modal_open());
    assert!(screen.students().is_empty());
    assert!(store.calls().await.iter().all(|c| !c.is_mutation()));
}

#[tokio::test]
async fn edit_replaces_in_place_and_keeps_order() {
    let (store, mut screen) = seeded(&["s1", "s2", "s3"]).await;
    screen.edit(&StudentId::new("s2"));
    screen.form_mut().edit(Field::Age, "11");

    assert!(matches!(screen.submit_form().await, Ok(Submission::Accepted(_))));
    assert_eq!(ids(&screen), vec!["s1", "s2", "s3"]);
    assert_eq!(screen.students()[1].age, "11");
    assert!(
        store.calls().await.contains(&StoreCall::Update {
            collection: "students".into(),
            id: "s2".into()
        })
    );

    let docs = store.list("students").await.unwrap();
    assert_eq!(docs[1].fields["age"], "11");
    assert!(!docs[1].fields.contains_key("id"));
}

#[tokio::test]
async fn failed_save_keeps_list_and_form() {
    let (store, mut screen) = seeded(&["s1"]).await;
    screen.edit(&StudentId::new("s1"));
    screen.form_mut().edit(Field::Age, "11");
    store.set_offline(true);

    assert!(screen.submit_form().await.is_err());
    assert!(screen.is_modal_open());
    assert_eq!(screen.students()[0].age, "10");
    let notice = screen.notice().unwrap();
    assert_eq!(notice.text, SAVE_FAILED);
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[tokio::test]
async fn save_of_vanished_record_fails() {
    let (store, mut screen) = seeded(&["s1"]).await;
    store.delete("students", "s1").await.unwrap();
    let err = screen.save(asha().with_id(StudentId::new("s1"))).await;
    assert!(err.is_err());
    assert_eq!(screen.notice().map(|n| n.text), Some(SAVE_FAILED));
}

// ── Deleting ────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_and_notifies() {
    let (_, mut screen) = seeded(&["s1", "s2", "s3"]).await;

    assert!(screen.delete(&StudentId::new("s2")).await);
    assert_eq!(ids(&screen), vec!["s1", "s3"]);
    let notice = screen.notice().unwrap();
    assert_eq!(notice.text, DELETE_SUCCEEDED);
    assert_eq!(notice.kind, NoticeKind::Success);
}

#[tokio::test]
async fn delete_of_unknown_id_leaves_list() {
    let (_, mut screen) = seeded(&["s1"]).await;
    assert!(screen.delete(&StudentId::new("nope")).await);
    assert_eq!(ids(&screen), vec!["s1"]);
}

#[tokio::test]
async fn failed_delete_keeps_list() {
    let (store, mut screen) = seeded(&["s1", "s2", "s3"]).await;
    store.set_offline(true);

    assert!(!screen.delete(&StudentId::new("s2")).await);
    assert_eq!(ids(&screen), vec!["s1", "s2", "s3"]);
    assert_eq!(screen.notice().map(|n| n.text), Some(DELETE_FAILED));
}

// ── Notice expiry ───────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn notice_clears_after_three_seconds() {
    let (_, mut screen) = seeded(&["s1"]).await;
    screen.delete(&StudentId::new("s1")).await;

    tokio::time::advance(Duration::from_millis(2999)).await;
    assert!(screen.notice().is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(screen.notice().is_none());
    screen.clear_expired_notice();
    assert!(screen.notice().is_none());
    assert_eq!(NOTICE_TTL, Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn new_notice_restarts_the_timer() {
    let (_, mut screen) = seeded(&["s1", "s2"]).await;
    screen.delete(&StudentId::new("s1")).await;
    tokio::time::advance(Duration::from_secs(2)).await;

    screen.delete(&StudentId::new("s2")).await;
    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(screen.notice().is_some());
}
