use roster_model::{Field, InputKind, Rule, STUDENT_SCHEMA};

#[test]
fn schema_rows_follow_field_order() {
    for (index, spec) in STUDENT_SCHEMA.iter().enumerate() {
        assert_eq!(spec.field, Field::ALL[index]);
        assert_eq!(spec.field.spec(), spec);
    }
}

#[test]
fn every_field_has_a_message() {
    for spec in &STUDENT_SCHEMA {
        assert!(!spec.message.is_empty(), "{:?} has no message", spec.field);
    }
}

#[test]
fn numeric_fields_render_as_number_inputs() {
    assert_eq!(Field::RollNumber.spec().kind, InputKind::Number);
    assert_eq!(Field::Age.spec().kind, InputKind::Number);
    assert_eq!(Field::Email.spec().kind, InputKind::Email);
    assert_eq!(Field::PhoneNumber.spec().kind, InputKind::Text);
    assert_eq!(InputKind::Number.html_type(), "number");
}

#[test]
fn rules_match_field_semantics() {
    assert_eq!(Field::RollNumber.spec().rule, Rule::Number);
    assert_eq!(Field::Age.spec().rule, Rule::PositiveNumber);
    assert_eq!(Field::PhoneNumber.spec().rule, Rule::TenDigits);
    assert_eq!(Field::EmergencyContact.spec().rule, Rule::TenDigits);
    assert_eq!(Field::Email.spec().rule, Rule::Email);
    assert_eq!(Field::Gender.spec().rule, Rule::Required);
}

#[test]
fn keys_round_trip() {
    for field in Field::ALL {
        assert_eq!(Field::from_key(field.key()), Some(field));
    }
    assert_eq!(Field::from_key("id"), None);
    assert_eq!(Field::from_key("RollNumber"), None);
}

#[test]
fn labels_are_spaced_title_case() {
    assert_eq!(Field::RollNumber.label(), "Roll Number");
    assert_eq!(Field::EmergencyContact.label(), "Emergency Contact");
    assert_eq!(Field::Name.label(), "Name");
}

#[test]
fn field_serde_uses_wire_key() {
    let json = serde_json::to_string(&Field::PhoneNumber).unwrap();
    assert_eq!(json, "\"phoneNumber\"");
}
