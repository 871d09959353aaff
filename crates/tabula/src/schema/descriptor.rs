use crate::stmt::{Primitive, Type, Value};
use crate::Result;

/// A record type that can be mapped to a table.
///
/// Usually implemented with `#[derive(tabula::Record)]`. A hand-written
/// implementation only has to return a [`Descriptor`].
pub trait Record: Default + 'static {
    /// Describes the record's table and fields.
    ///
    /// Called once per type by the registry; the result is compiled into a
    /// [`TypeMapping`](super::TypeMapping) and cached.
    ///
    /// The registry holds its lock while this runs, so an implementation must
    /// not request a mapping from the registry (for example through
    /// [`crate::mapping`]). Doing so deadlocks.
    fn describe() -> Descriptor<Self>;
}

/// Static schema metadata for one record type.
pub struct Descriptor<R> {
    /// Name of the table the records are stored in.
    pub table_name: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor<R>>,
}

/// Static schema metadata for one field.
pub struct FieldDescriptor<R> {
    /// The field name
    pub name: String,

    /// Column the field is stored in. Fields without a column are not mapped.
    pub column: Option<String>,

    /// Declared column type. For `Option<T>` fields this is `T`'s type.
    pub ty: Type,

    /// True if the field can hold `None`.
    pub nullable: bool,

    /// True if the field identifies the record.
    pub key: bool,

    /// True if the field is derived from other fields and never stored.
    pub computed: bool,

    /// Reads the field.
    pub get: fn(&R) -> Value,

    /// Writes the field. `None` for read-only fields.
    pub set: Option<fn(&mut R, Value) -> Result<()>>,
}

impl<R> Descriptor<R> {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            fields: vec![],
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldDescriptor<R>) -> Self {
        self.fields.push(field);
        self
    }
}

impl<R> FieldDescriptor<R> {
    /// A writable field of type `T` stored in a column named after the field.
    pub fn new<T: Primitive>(
        name: impl Into<String>,
        get: fn(&R) -> Value,
        set: fn(&mut R, Value) -> Result<()>,
    ) -> Self {
        let name = name.into();

        Self {
            column: Some(name.clone()),
            name,
            ty: T::TYPE,
            nullable: T::NULLABLE,
            key: false,
            computed: false,
            get,
            set: Some(set),
        }
    }

    /// Stores the field in `column` instead.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Leaves the field out of the table.
    pub fn unmapped(mut self) -> Self {
        self.column = None;
        self
    }

    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.set = None;
        self
    }
}
