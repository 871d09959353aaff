use super::Error;

/// Error when a type-erased accessor receives a record of another type.
#[derive(Debug)]
pub(super) struct TypeMismatch {
    expected: &'static str,
}

impl std::error::Error for TypeMismatch {}

impl core::fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record type mismatch: expected `{}`", self.expected)
    }
}

impl Error {
    /// Creates a record type mismatch error.
    pub fn type_mismatch(expected: &'static str) -> Error {
        Error::from(super::ErrorKind::TypeMismatch(TypeMismatch { expected }))
    }

    /// Returns `true` if this error is a record type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::TypeMismatch(_)))
    }
}
