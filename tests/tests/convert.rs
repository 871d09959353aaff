use tests::models::*;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tabula::convert::{clone_record, clone_records, from_table, to_table};
use tabula::{Column, Row, Table, Type, Value};
use uuid::Uuid;

fn customers() -> Vec<Customer> {
    let mut ada = Customer::new(1, "Ada");
    ada.email = Some("ada@example.com".to_string());
    ada.tier = 'A';
    ada.tags = Some(Arc::new(vec!["vip".to_string()]));

    let mut grace = Customer::new(2, "Grace");
    grace.tier = 'B';

    vec![ada, grace]
}

#[test]
fn records_to_table() {
    tests::init_tracing();
    let mapping = tabula::mapping::<Customer>().unwrap();

    let table = to_table(&customers(), &mapping).unwrap();

    assert_eq!(table.name(), "customers");
    assert_eq!(table.key_column(), Some("id"));
    assert_eq!(table.len(), 2);

    let columns: Vec<_> = table.columns().map(|c| &c.name[..]).collect();
    assert_eq!(columns, ["id", "name", "email_address", "tier", "tags"]);

    let row = &table.rows()[0];
    assert_eq!(row.get("id"), Some(&Value::I64(1)));
    assert_eq!(row.get("email_address").unwrap(), "ada@example.com");
    assert_eq!(row.get("tier"), Some(&Value::Char('A')));
    assert_eq!(table.rows()[1].get("email_address"), Some(&Value::Null));
}

#[test]
fn round_trip() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let records = customers();

    let table = to_table(&records, &mapping).unwrap();
    let loaded = from_table(&table, &mapping).unwrap();

    assert_eq!(loaded, records);
}

#[test]
fn round_trip_renamed_key_and_dates() {
    let mapping = tabula::mapping::<Order>().unwrap();
    let orders = vec![
        Order {
            id: Uuid::new_v4(),
            customer_id: 1,
            placed_on: NaiveDate::from_ymd_opt(2024, 2, 29),
            quantity: 3,
            total: 29.97,
            rush: true,
        },
        Order {
            id: Uuid::new_v4(),
            customer_id: 2,
            ..Order::default()
        },
    ];

    let table = to_table(&orders, &mapping).unwrap();
    assert_eq!(table.name(), "sales_orders");
    assert_eq!(table.key_column(), Some("order_id"));
    assert_eq!(table.column("placed_on").unwrap().ty, Type::Date);

    assert_eq!(from_table(&table, &mapping).unwrap(), orders);
}

#[test]
fn partial_population() {
    let mapping = tabula::mapping::<Customer>().unwrap();

    let mut table = Table::new("customers");
    table.add_column(Column::new("id", Type::I64, false)).unwrap();
    table.add_column(Column::new("name", Type::String, false)).unwrap();
    table.add_column(Column::new("legacy_code", Type::String, true)).unwrap();

    table
        .push_row(Row::new().with("id", 7_i64).with("legacy_code", "X1"))
        .unwrap();

    let loaded = from_table(&table, &mapping).unwrap();
    assert_eq!(loaded, [Customer::new(7, "")]);
}

#[test]
fn char_column_from_one_character_string() {
    let mapping = tabula::mapping::<Customer>().unwrap();

    let mut table = Table::new("customers");
    table.add_column(Column::new("id", Type::I64, false)).unwrap();
    table.add_column(Column::new("tier", Type::String, false)).unwrap();
    table
        .push_row(Row::new().with("id", 1_i64).with("tier", "Z"))
        .unwrap();

    let loaded = from_table(&table, &mapping).unwrap();
    assert_eq!(loaded[0].tier, 'Z');
}

#[test]
fn widened_integers_load() {
    let mapping = tabula::mapping::<Order>().unwrap();

    let mut table = Table::new("sales_orders");
    table.add_column(Column::new("customer_id", Type::I32, false)).unwrap();
    table.add_column(Column::new("quantity", Type::I64, false)).unwrap();
    table
        .push_row(Row::new().with("customer_id", 5_i32).with("quantity", 12_i64))
        .unwrap();

    let loaded = from_table(&table, &mapping).unwrap();
    assert_eq!(loaded[0].customer_id, 5);
    assert_eq!(loaded[0].quantity, 12);
}

#[test]
fn conversion_errors_name_the_cell() {
    let mapping = tabula::mapping::<Order>().unwrap();

    let mut table = Table::new("sales_orders");
    table.add_column(Column::new("quantity", Type::I64, false)).unwrap();
    table.push_row(Row::new().with("quantity", 1_i64)).unwrap();
    table.push_row(Row::new().with("quantity", -1_i64)).unwrap();

    let err = from_table(&table, &mapping).unwrap_err();
    assert!(err.is_type_conversion());
    assert_eq!(
        err.to_string(),
        "row 1 of table `sales_orders`: field `quantity`: cannot convert I64 to U32"
    );
}

#[test]
fn several_keys_rejected() {
    let mapping = tabula::mapping::<Placement>().unwrap();
    let err = to_table(&[Placement::default()], &mapping).unwrap_err();

    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("Placement"));
}

#[test]
fn keyless_table() {
    let mapping = tabula::mapping::<Memo>().unwrap();
    let memos = [Memo {
        body: "call back".to_string(),
    }];

    let table = to_table(&memos, &mapping).unwrap();
    assert_eq!(table.name(), "memos");
    assert_eq!(table.key_column(), None);
}

#[test]
fn clone_is_shallow() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let mut source = customers().remove(0);
    source.scratch.push("not mapped".to_string());

    let mut clone = clone_record(&source, &mapping).unwrap();

    assert_eq!(clone.name, source.name);
    assert_eq!(clone.email, source.email);
    assert!(Arc::ptr_eq(
        clone.tags.as_ref().unwrap(),
        source.tags.as_ref().unwrap()
    ));
    assert!(clone.scratch.is_empty());

    clone.name.push_str(" Lovelace");
    assert_eq!(source.name, "Ada");
}

#[test]
fn clone_collection() {
    let mapping = tabula::mapping::<Customer>().unwrap();
    let records = customers();
    assert_eq!(clone_records(&records, &mapping).unwrap(), records);
}
