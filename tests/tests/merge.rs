use tests::models::*;

use pretty_assertions::assert_eq;
use tabula::convert::{merge_into, to_table};
use tabula::{Column, MergeStats, Row, Table, Type, Value};

fn seeded() -> Table {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let records = [
        Customer::new(1, "A"),
        Customer::new(2, "B"),
        Customer::new(3, "C"),
    ];
    to_table(&records, &mapping).unwrap()
}

fn column(table: &Table, name: &str) -> Vec<Value> {
    table
        .rows()
        .iter()
        .map(|row| row.get(name).cloned().unwrap_or_default())
        .collect()
}

#[test]
fn upsert_updates_existing_and_appends_new() {
    tests::init_tracing();
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = seeded();

    let stats = merge_into(
        &[Customer::new(2, "B2"), Customer::new(4, "D")],
        &mut table,
        &mapping,
    )
    .unwrap();

    assert_eq!(
        stats,
        MergeStats {
            inserted: 1,
            updated: 1,
            skipped: 0,
        }
    );
    assert_eq!(
        column(&table, "id"),
        [Value::I64(1), Value::I64(2), Value::I64(3), Value::I64(4)]
    );
    assert_eq!(
        column(&table, "name"),
        [
            Value::from("A"),
            Value::from("B2"),
            Value::from("C"),
            Value::from("D")
        ]
    );
}

#[test]
fn merge_into_empty_table_sets_key_column() {
    let mapping = tabula::mapping::<Customer>().unwrap();

    let mut table = Table::new("customers");
    for column in seeded().columns() {
        table.add_column(column.clone()).unwrap();
    }

    let stats = merge_into(&[Customer::new(9, "Z")], &mut table, &mapping).unwrap();

    assert_eq!(stats.inserted, 1);
    assert_eq!(table.key_column(), Some("id"));
}

#[test]
fn unmapped_columns_are_left_alone() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = seeded();
    table
        .add_column(Column::new("notes", Type::String, true))
        .unwrap();
    table.rows_mut()[0].set("notes", "keep me");

    merge_into(
        &[Customer::new(1, "A2"), Customer::new(5, "E")],
        &mut table,
        &mapping,
    )
    .unwrap();

    assert_eq!(table.rows()[0].get("notes").unwrap(), "keep me");
    assert_eq!(table.rows()[0].get("name").unwrap(), "A2");
    assert_eq!(table.rows()[3].get("notes"), Some(&Value::Null));
}

#[test]
fn rows_without_a_key_are_not_matched() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = seeded();
    table.push_row(Row::new().with("name", "orphan")).unwrap();

    let stats = merge_into(&[Customer::new(3, "C2")], &mut table, &mapping).unwrap();

    assert_eq!(stats.updated, 1);
    assert_eq!(table.len(), 4);
    assert_eq!(table.rows()[3].get("name").unwrap(), "orphan");
}

#[test]
fn mismatched_key_column() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = seeded();
    table.set_key_column("name").unwrap();

    let err = merge_into(&[Customer::new(1, "A")], &mut table, &mapping).unwrap_err();
    assert!(err.is_invalid_table());
    assert!(err.to_string().contains("key column is `name`"));
}

#[test]
fn missing_key_column() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = Table::new("customers");
    table
        .add_column(Column::new("name", Type::String, false))
        .unwrap();

    let err = merge_into(&[Customer::new(1, "A")], &mut table, &mapping).unwrap_err();
    assert!(err.is_invalid_table());
    assert_eq!(
        err.to_string(),
        "invalid table `customers`: missing key column `id`"
    );
}

#[test]
fn missing_mapped_column_leaves_table_untouched() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = Table::new("customers");
    table.add_column(Column::new("id", Type::I64, false)).unwrap();
    table.push_row(Row::new().with("id", 1_i64)).unwrap();

    let err = merge_into(&[Customer::new(1, "A")], &mut table, &mapping).unwrap_err();
    assert!(err.is_invalid_table());
    assert_eq!(table.key_column(), None);
    assert_eq!(table.len(), 1);
}

#[test]
fn keyless_and_multi_key_types_rejected() {
    let mut table = Table::new("memos");
    let err = merge_into(
        &[Memo::default()],
        &mut table,
        &tabula::mapping::<Memo>().unwrap(),
    )
    .unwrap_err();
    assert!(err.is_missing_key());

    let mut table = Table::new("placements");
    let err = merge_into(
        &[Placement::default()],
        &mut table,
        &tabula::mapping::<Placement>().unwrap(),
    )
    .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn null_key_records_are_skipped() {
    tests::init_tracing();
    let mapping = tabula::mapping::<Ticket>().unwrap();
    let mut table = to_table(&[Ticket::new(Some(1), "a")], &mapping).unwrap();
    table.push_row(Row::new().with("subject", "orphan")).unwrap();

    let stats = merge_into(
        &[Ticket::new(None, "x"), Ticket::new(Some(2), "b")],
        &mut table,
        &mapping,
    )
    .unwrap();

    assert_eq!(
        stats,
        MergeStats {
            inserted: 1,
            updated: 0,
            skipped: 1,
        }
    );
    assert_eq!(column(&table, "id"), [Value::I64(1), Value::Null, Value::I64(2)]);
    assert_eq!(
        column(&table, "subject"),
        [Value::from("a"), Value::from("orphan"), Value::from("b")]
    );
}

#[test]
fn narrower_key_cells_match_records() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = Table::new("customers");
    table.add_column(Column::new("id", Type::I32, false)).unwrap();
    for column in seeded().columns().skip(1) {
        table.add_column(column.clone()).unwrap();
    }
    table
        .push_row(Row::new().with("id", 1_i32).with("name", "A"))
        .unwrap();

    let stats = merge_into(&[Customer::new(1, "A2")], &mut table, &mapping).unwrap();

    assert_eq!(stats.updated, 1);
    assert_eq!(stats.inserted, 0);
    assert_eq!(table.len(), 1);
    assert_eq!(column(&table, "name"), [Value::from("A2")]);
}

#[test]
fn unloadable_key_cell_leaves_table_untouched() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut table = Table::new("customers");
    table.add_column(Column::new("id", Type::String, false)).unwrap();
    for column in seeded().columns().skip(1) {
        table.add_column(column.clone()).unwrap();
    }
    table.push_row(Row::new().with("id", "one")).unwrap();

    let err = merge_into(&[Customer::new(1, "A")], &mut table, &mapping).unwrap_err();

    assert!(err.is_type_conversion());
    assert_eq!(
        err.to_string(),
        "row 0 of table `customers`: field `id`: cannot convert String to I64"
    );
    assert_eq!(table.key_column(), None);
    assert_eq!(table.len(), 1);
}
