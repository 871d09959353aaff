//! Moving records in and out of tables.

use crate::schema::{FieldMapping, Record, TypeMapping};
use crate::stmt::Value;
use crate::table::{Column, Row, Table};
use crate::{Error, Result};

use std::collections::HashMap;
use tracing::{debug, warn};

/// Outcome of [`merge_into`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Records appended as new rows
    pub inserted: usize,

    /// Records that overwrote an existing row
    pub updated: usize,

    /// Records skipped because their key is null
    pub skipped: usize,
}

/// Builds a table with one column per mapped field and one row per record.
///
/// If the type has a key field, the table's key column is set to it.
pub fn to_table<'a, R: 'a>(
    records: impl IntoIterator<Item = &'a R>,
    mapping: &TypeMapping<R>,
) -> Result<Table> {
    let key = mapping.key_field()?;

    let mut table = Table::new(mapping.table_name());
    for field in mapping.fields() {
        table.add_column(Column::new(&field.column, field.ty, field.nullable))?;
    }

    for record in records {
        table.push_row(to_row(record, mapping))?;
    }

    if let Some(key) = key {
        table.set_key_column(&key.column)?;
    }

    debug!(
        table = table.name(),
        rows = table.len(),
        "converted records to table"
    );
    Ok(table)
}

/// Builds one record per row.
///
/// Each record starts from `R::default()`. Fields whose column is missing
/// from the table, or whose cell is `Null`, keep their default.
pub fn from_table<R: Record>(table: &Table, mapping: &TypeMapping<R>) -> Result<Vec<R>> {
    let fields: Vec<_> = mapping
        .fields()
        .iter()
        .filter(|field| table.has_column(&field.column))
        .collect();

    let mut records = Vec::with_capacity(table.len());

    for (index, row) in table.rows().iter().enumerate() {
        let mut record = R::default();

        for field in &fields {
            let Some(value) = row.get(&field.column) else {
                continue;
            };

            if value.is_null() {
                continue;
            }

            load_cell(field, &mut record, value).map_err(|err| {
                err.context(format!("row {index} of table `{}`", table.name()))
            })?;
        }

        records.push(record);
    }

    Ok(records)
}

/// Upserts `records` into `table` by key.
///
/// A record whose key matches an existing row overwrites that row's mapped
/// cells in place. Any other record is appended, and later records with the
/// same key update the appended row. Records with a `Null` key are skipped.
///
/// The table must contain every mapped column, and every non-null key cell
/// must load into the key field. If the table has no key column yet it is set
/// from the mapping; otherwise it must match. Nothing is modified when a
/// check fails.
pub fn merge_into<'a, R: Record>(
    records: impl IntoIterator<Item = &'a R>,
    table: &mut Table,
    mapping: &TypeMapping<R>,
) -> Result<MergeStats> {
    let key = mapping.require_key()?;

    if !table.has_column(&key.column) {
        return Err(Error::invalid_table(
            table.name(),
            format!("missing key column `{}`", key.column),
        ));
    }

    if let Some(field) = mapping
        .fields()
        .iter()
        .find(|field| !table.has_column(&field.column))
    {
        return Err(Error::invalid_table(
            table.name(),
            format!("missing column `{}`", field.column),
        ));
    }

    let set_key_column = match table.key_column() {
        None => true,
        Some(existing) if existing == key.column => false,
        Some(existing) => {
            return Err(Error::invalid_table(
                table.name(),
                format!(
                    "key column is `{existing}` but `{}` is keyed by `{}`",
                    mapping.type_name(),
                    key.column
                ),
            ));
        }
    };

    // Key cells go through the key field's loader, so `I32(1)` under an `i64`
    // key hashes as `I64(1)`. The first row holding a key wins.
    let mut lookup: HashMap<Value, usize> = HashMap::with_capacity(table.len());
    for (index, row) in table.rows().iter().enumerate() {
        let Some(cell) = row.get(&key.column).filter(|cell| !cell.is_null()) else {
            continue;
        };

        let mut scratch = R::default();
        load_cell(key, &mut scratch, cell).map_err(|err| {
            err.context(format!("row {index} of table `{}`", table.name()))
        })?;
        lookup.entry(key.get(&scratch)).or_insert(index);
    }

    if set_key_column {
        table.set_key_column(&key.column)?;
    }

    let mut stats = MergeStats::default();

    for record in records {
        let key_value = key.get(record);

        if key_value.is_null() {
            warn!(
                table = table.name(),
                key = key.column.as_str(),
                "skipping record with null key"
            );
            stats.skipped += 1;
            continue;
        }

        match lookup.get(&key_value) {
            Some(&index) => {
                let row = &mut table.rows_mut()[index];
                for field in mapping.fields() {
                    row.set(&field.column, field.get(record));
                }
                stats.updated += 1;
            }
            None => {
                let index = table.push_row(to_row(record, mapping))?;
                lookup.insert(key_value, index);
                stats.inserted += 1;
            }
        }
    }

    debug!(
        table = table.name(),
        inserted = stats.inserted,
        updated = stats.updated,
        skipped = stats.skipped,
        "merged records into table"
    );
    Ok(stats)
}

/// Copies every mapped field of `record` into a fresh `R::default()`.
///
/// The copy is shallow: `Arc` fields share their allocation with the source.
pub fn clone_record<R: Record>(record: &R, mapping: &TypeMapping<R>) -> Result<R> {
    let mut clone = R::default();
    for field in mapping.fields() {
        field.set(&mut clone, field.get(record))?;
    }
    Ok(clone)
}

/// [`clone_record`] over a collection, preserving order.
pub fn clone_records<'a, R: Record>(
    records: impl IntoIterator<Item = &'a R>,
    mapping: &TypeMapping<R>,
) -> Result<Vec<R>> {
    records
        .into_iter()
        .map(|record| clone_record(record, mapping))
        .collect()
}

fn to_row<R>(record: &R, mapping: &TypeMapping<R>) -> Row {
    let mut row = Row::new();
    for field in mapping.fields() {
        row.set(&field.column, field.get(record));
    }
    row
}

fn load_cell<R>(field: &FieldMapping<R>, record: &mut R, value: &Value) -> Result<()> {
    // Fixed-width character columns often come back as one-character strings.
    let value = match value.as_single_char() {
        Some(ch) if field.ty.is_char() => Value::Char(ch),
        _ => value.clone(),
    };

    field.set(record, value)
}
