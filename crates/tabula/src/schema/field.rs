use crate::stmt::{Type, Value};
use crate::{Error, Result};

use std::any::{type_name, Any};
use std::fmt;

/// Getter and setter bound to one field of `R`.
pub struct FieldAccessor<R> {
    get: fn(&R) -> Value,
    set: fn(&mut R, Value) -> Result<()>,
}

/// How one field of `R` maps to a column.
pub struct FieldMapping<R> {
    /// The field name
    pub name: String,

    /// The column the field is stored in
    pub column: String,

    /// Declared column type, with `Option` unwrapped
    pub ty: Type,

    /// True if the field is an `Option`
    pub nullable: bool,

    /// True if the field is the record's key
    pub key: bool,

    pub accessor: FieldAccessor<R>,
}

impl<R> FieldAccessor<R> {
    pub fn new(get: fn(&R) -> Value, set: fn(&mut R, Value) -> Result<()>) -> Self {
        Self { get, set }
    }

    pub fn get(&self, record: &R) -> Value {
        (self.get)(record)
    }

    /// Assigns `value` to the field.
    ///
    /// `Null` clears an `Option` field and is a conversion error on any other
    /// field.
    pub fn set(&self, record: &mut R, value: Value) -> Result<()> {
        (self.set)(record, value)
    }
}

impl<R: 'static> FieldAccessor<R> {
    /// Reads the field of a type-erased record.
    pub fn get_dyn(&self, record: &dyn Any) -> Result<Value> {
        let Some(record) = record.downcast_ref::<R>() else {
            return Err(Error::type_mismatch(type_name::<R>()));
        };
        Ok(self.get(record))
    }

    /// Writes the field of a type-erased record.
    pub fn set_dyn(&self, record: &mut dyn Any, value: Value) -> Result<()> {
        let Some(record) = record.downcast_mut::<R>() else {
            return Err(Error::type_mismatch(type_name::<R>()));
        };
        self.set(record, value)
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldAccessor<R> {}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor").finish_non_exhaustive()
    }
}

impl<R> FieldMapping<R> {
    pub fn get(&self, record: &R) -> Value {
        self.accessor.get(record)
    }

    /// Assigns `value` to the field, adding the field name to any error.
    pub fn set(&self, record: &mut R, value: Value) -> Result<()> {
        self.accessor
            .set(record, value)
            .map_err(|err| err.context(format!("field `{}`", self.name)))
    }
}

impl<R> fmt::Debug for FieldMapping<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .field("key", &self.key)
            .finish()
    }
}
