use tests::models::*;

use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabula::diff::{compare, compare_sets};
use tabula::{Change, ChangeKind, Value};

#[test]
fn single_field_change() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let before = Customer::new(1, "Ada");
    let mut after = before.clone();
    after.email = Some("ada@example.com".to_string());

    let changes = compare(&before, &after, &mapping);

    assert_eq!(
        changes,
        [Change {
            kind: ChangeKind::Modified,
            field_name: "email".to_string(),
            column_name: "email_address".to_string(),
            original: Value::Null,
            current: Value::from("ada@example.com"),
        }]
    );
}

#[test]
fn identical_records() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let record = Customer::new(1, "Ada");
    assert!(compare(&record, &record.clone(), &mapping).is_empty());
}

#[test]
fn unmapped_fields_are_ignored() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let before = Customer::new(1, "Ada");
    let mut after = before.clone();
    after.display_name = "Ada L.".to_string();
    after.scratch.push("x".to_string());

    assert!(compare(&before, &after, &mapping).is_empty());
}

#[test]
fn shared_fields_compare_by_identity() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let tags = Arc::new(vec!["vip".to_string()]);

    let mut before = Customer::new(1, "Ada");
    before.tags = Some(tags.clone());

    let mut after = before.clone();
    assert!(compare(&before, &after, &mapping).is_empty());

    after.tags = Some(Arc::new(tags.as_ref().clone()));
    let changes = compare(&before, &after, &mapping);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].column_name, "tags");
}

#[test]
fn set_addition_and_deletion() {
    tests::init_tracing();
    let mapping = tabula::mapping::<Customer>().unwrap();

    let originals = [Customer::new(1, "a"), Customer::new(2, "b")];
    let currents = [Customer::new(1, "a"), Customer::new(3, "c")];

    let changes = compare_sets(&originals, &currents, &mapping).unwrap();

    assert_eq!(
        changes,
        [
            Change {
                kind: ChangeKind::Deleted,
                field_name: "Record Deleted".to_string(),
                column_name: "customers".to_string(),
                original: Value::I64(2),
                current: Value::Null,
            },
            Change {
                kind: ChangeKind::Added,
                field_name: "New Record Added".to_string(),
                column_name: "customers".to_string(),
                original: Value::Null,
                current: Value::I64(3),
            },
        ]
    );
}

#[test]
fn set_modifications_precede_additions() {
    let mapping = tabula::mapping::<Customer>().unwrap();

    let originals = [Customer::new(1, "a"), Customer::new(2, "b")];
    let currents = [
        Customer::new(7, "new"),
        Customer::new(2, "b2"),
        Customer::new(1, "a"),
    ];

    let changes = compare_sets(&originals, &currents, &mapping).unwrap();
    let kinds: Vec<_> = changes.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, [ChangeKind::Modified, ChangeKind::Added]);

    assert_eq!(changes[0].field_name, "name");
    assert_eq!(changes[0].original, "b");
    assert_eq!(changes[0].current, "b2");
    assert_eq!(changes[1].current, Value::I64(7));
}

#[test]
fn set_duplicate_keys_collapse() {
    let mapping = tabula::mapping::<Customer>().unwrap();

    let originals = [Customer::new(1, "first"), Customer::new(1, "second")];
    let currents = [Customer::new(1, "second")];

    assert!(compare_sets(&originals, &currents, &mapping)
        .unwrap()
        .is_empty());
}

#[test]
fn set_requires_single_key() {
    let memos = [Memo::default()];
    let err = compare_sets(&memos, &memos, &tabula::mapping::<Memo>().unwrap()).unwrap_err();
    assert!(err.is_missing_key());

    let placements = [Placement::default()];
    let err = compare_sets(
        &placements,
        &placements,
        &tabula::mapping::<Placement>().unwrap(),
    )
    .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn set_ignores_null_keys() {
    let mapping = tabula::mapping::<Ticket>().unwrap();

    let originals = [Ticket::new(None, "draft"), Ticket::new(Some(1), "a")];
    let currents = [
        Ticket::new(None, "other draft"),
        Ticket::new(Some(1), "a"),
        Ticket::new(Some(5), "e"),
    ];

    let changes = compare_sets(&originals, &currents, &mapping).unwrap();

    assert_eq!(changes.len(), 1);
    assert!(changes[0].is_added());
    assert_eq!(changes[0].current, Value::I64(5));
}
