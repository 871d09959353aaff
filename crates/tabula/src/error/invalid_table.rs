use super::Error;

/// Error when a table's shape does not fit the requested operation.
///
/// Raised when a merge target lacks the key column or a mapped column, when
/// the table's recorded key column disagrees with the mapping, or when a row
/// names a column the table does not have.
#[derive(Debug)]
pub(super) struct InvalidTable {
    table: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidTable {}

impl core::fmt::Display for InvalidTable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid table `{}`: {}", self.table, self.message)
    }
}

impl Error {
    /// Creates an invalid table error.
    pub fn invalid_table(table: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidTable(InvalidTable {
            table: table.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid table error.
    pub fn is_invalid_table(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidTable(_)))
    }
}
