use crate::stmt::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The name of the column
    pub name: String,

    /// The column type. `Option` fields contribute their inner type.
    pub ty: Type,

    /// Whether or not the column accepts `Null`
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: Type, nullable: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable,
        }
    }
}
