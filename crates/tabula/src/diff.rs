//! Field-level and key-level differences between record snapshots.

use crate::schema::{FieldMapping, TypeMapping};
use crate::stmt::Value;
use crate::Result;

use indexmap::IndexMap;
use tracing::{debug, warn};

/// What happened to a field or record between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A field holds a different value
    Modified,

    /// The record only exists in the current snapshot
    Added,

    /// The record only exists in the original snapshot
    Deleted,
}

/// One difference between two snapshots.
///
/// Whole-record additions and deletions use the [`Change::ADDED`] and
/// [`Change::DELETED`] field names, carry the table name as the column and
/// the record's key on the side where it exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub kind: ChangeKind,
    pub field_name: String,
    pub column_name: String,
    pub original: Value,
    pub current: Value,
}

impl Change {
    /// Field name used for record additions.
    pub const ADDED: &'static str = "New Record Added";

    /// Field name used for record deletions.
    pub const DELETED: &'static str = "Record Deleted";

    pub fn modified(
        field_name: impl Into<String>,
        column_name: impl Into<String>,
        original: Value,
        current: Value,
    ) -> Self {
        Self {
            kind: ChangeKind::Modified,
            field_name: field_name.into(),
            column_name: column_name.into(),
            original,
            current,
        }
    }

    /// A record present only in the current snapshot.
    pub fn added(table: impl Into<String>, key: Value) -> Self {
        Self {
            kind: ChangeKind::Added,
            field_name: Self::ADDED.to_string(),
            column_name: table.into(),
            original: Value::Null,
            current: key,
        }
    }

    /// A record present only in the original snapshot.
    pub fn deleted(table: impl Into<String>, key: Value) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            field_name: Self::DELETED.to_string(),
            column_name: table.into(),
            original: key,
            current: Value::Null,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.kind == ChangeKind::Modified
    }

    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }

    pub fn is_deleted(&self) -> bool {
        self.kind == ChangeKind::Deleted
    }
}

/// Returns a [`ChangeKind::Modified`] change for every mapped field whose
/// value differs, in field order.
///
/// `Arc` fields compare by pointer, so two records holding equal but
/// separately allocated values differ.
pub fn compare<R>(original: &R, current: &R, mapping: &TypeMapping<R>) -> Vec<Change> {
    mapping
        .fields()
        .iter()
        .filter_map(|field| {
            let before = field.get(original);
            let after = field.get(current);

            (before != after).then(|| Change::modified(&field.name, &field.column, before, after))
        })
        .collect()
}

/// Compares two collections of records matched by key.
///
/// Changes for keys in the original collection come first, in its order:
/// a deletion if the key is gone, otherwise the field changes. Additions for
/// new keys follow, in the current collection's order. Records with a `Null`
/// key are ignored and a repeated key replaces the earlier record.
pub fn compare_sets<'a, R: 'a>(
    originals: impl IntoIterator<Item = &'a R>,
    currents: impl IntoIterator<Item = &'a R>,
    mapping: &TypeMapping<R>,
) -> Result<Vec<Change>> {
    let key = mapping.require_key()?;

    let originals = index_by_key(originals, key, mapping, "original");
    let currents = index_by_key(currents, key, mapping, "current");

    let mut changes = vec![];

    for (key_value, original) in &originals {
        match currents.get(key_value) {
            Some(current) => changes.extend(compare(*original, *current, mapping)),
            None => changes.push(Change::deleted(mapping.table_name(), key_value.clone())),
        }
    }

    for (key_value, _) in &currents {
        if !originals.contains_key(key_value) {
            changes.push(Change::added(mapping.table_name(), key_value.clone()));
        }
    }

    debug!(
        ty = mapping.type_name(),
        originals = originals.len(),
        currents = currents.len(),
        changes = changes.len(),
        "compared record sets"
    );
    Ok(changes)
}

fn index_by_key<'a, R>(
    records: impl IntoIterator<Item = &'a R>,
    key: &FieldMapping<R>,
    mapping: &TypeMapping<R>,
    side: &str,
) -> IndexMap<Value, &'a R> {
    let mut lookup = IndexMap::new();

    for record in records {
        let key_value = key.get(record);

        if key_value.is_null() {
            warn!(
                ty = mapping.type_name(),
                side, "ignoring record with null key"
            );
            continue;
        }

        if lookup.insert(key_value, record).is_some() {
            warn!(
                ty = mapping.type_name(),
                side, "duplicate key, keeping the later record"
            );
        }
    }

    lookup
}
