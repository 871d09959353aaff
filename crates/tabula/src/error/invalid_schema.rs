use super::Error;

/// Error when a record type's schema description is unusable.
///
/// This occurs when:
/// - More than one field is flagged as the key
/// - A field is flagged `computed` but also maps to a column
/// - A mapped field has no setter
/// - Two fields map to the same column
///
/// Building a mapping never caches this error; the next request rebuilds.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    ty: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema for `{}`: {}", self.ty, self.message)
    }
}

impl Error {
    /// Creates an invalid schema error naming the offending record type.
    pub fn invalid_schema(ty: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            ty: ty.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
