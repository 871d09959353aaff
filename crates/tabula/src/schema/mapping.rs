use super::{Descriptor, FieldAccessor, FieldMapping, Record};
use crate::{Error, Result};

use std::any::{type_name, TypeId};
use std::collections::HashSet;
use std::fmt;

/// The compiled mapping between a record type and its table.
///
/// Built once per type from [`Record::describe`] and shared through the
/// registry. Fields without a column are left out; the remaining fields keep
/// their declaration order.
pub struct TypeMapping<R> {
    /// Identifies the record type
    ty: TypeId,

    /// Rust type name, used in error messages
    type_name: &'static str,

    /// Name of the table
    table: String,

    /// Mapped fields in declaration order
    fields: Vec<FieldMapping<R>>,

    /// Indices into `fields` of every field flagged as key
    keys: Vec<usize>,
}

impl<R: Record> TypeMapping<R> {
    /// Builds the mapping from `R`'s descriptor.
    pub fn build() -> Result<Self> {
        Self::from_descriptor(R::describe())
    }

    /// Builds a mapping from an explicit descriptor.
    ///
    /// Fails when a computed field also names a column, when a mapped field
    /// has no setter, or when two fields share a column. More than one key
    /// field is accepted here and reported by the operations that need the
    /// key.
    pub fn from_descriptor(descriptor: Descriptor<R>) -> Result<Self> {
        let type_name = type_name::<R>();
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        let mut keys = vec![];
        let mut columns = HashSet::new();

        for field in descriptor.fields {
            if field.computed {
                if let Some(column) = &field.column {
                    return Err(Error::invalid_schema(
                        type_name,
                        format!(
                            "field `{}` is computed but maps to column `{column}`",
                            field.name
                        ),
                    ));
                }
            }

            let Some(column) = field.column else {
                continue;
            };

            let Some(set) = field.set else {
                return Err(Error::invalid_schema(
                    type_name,
                    format!("field `{}` has no setter", field.name),
                ));
            };

            if !columns.insert(column.clone()) {
                return Err(Error::invalid_schema(
                    type_name,
                    format!("column `{column}` is mapped by more than one field"),
                ));
            }

            if field.key {
                keys.push(fields.len());
            }

            fields.push(FieldMapping {
                name: field.name,
                column,
                ty: field.ty,
                nullable: field.nullable,
                key: field.key,
                accessor: FieldAccessor::new(field.get, set),
            });
        }

        Ok(Self {
            ty: TypeId::of::<R>(),
            type_name,
            table: descriptor.table_name,
            fields,
            keys,
        })
    }
}

impl<R> TypeMapping<R> {
    pub fn type_id(&self) -> TypeId {
        self.ty
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[FieldMapping<R>] {
        &self.fields
    }

    /// Finds a mapped field by field name.
    pub fn field(&self, name: &str) -> Option<&FieldMapping<R>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Finds a mapped field by column name.
    pub fn column(&self, column: &str) -> Option<&FieldMapping<R>> {
        self.fields.iter().find(|field| field.column == column)
    }

    /// Returns the key field, if the type has one.
    ///
    /// Fails if more than one field is flagged as key.
    pub fn key_field(&self) -> Result<Option<&FieldMapping<R>>> {
        match self.keys[..] {
            [] => Ok(None),
            [index] => Ok(Some(&self.fields[index])),
            _ => {
                let names: Vec<_> = self
                    .keys
                    .iter()
                    .map(|&index| format!("`{}`", self.fields[index].name))
                    .collect();

                Err(Error::invalid_schema(
                    self.type_name,
                    format!("more than one key field: {}", names.join(", ")),
                ))
            }
        }
    }

    /// Returns the key field, failing if the type has none or several.
    pub fn require_key(&self) -> Result<&FieldMapping<R>> {
        self.key_field()?
            .ok_or_else(|| Error::missing_key(self.type_name))
    }
}

impl<R> fmt::Debug for TypeMapping<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMapping")
            .field("type_name", &self.type_name)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .finish()
    }
}
