use super::Error;

/// Error when an identity-keyed operation runs on a record type with no key
/// field.
#[derive(Debug)]
pub(super) struct MissingKey {
    ty: Box<str>,
}

impl std::error::Error for MissingKey {}

impl core::fmt::Display for MissingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "`{}` has no key field", self.ty)
    }
}

impl Error {
    /// Creates a missing key error for the given record type.
    pub fn missing_key(ty: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingKey(MissingKey {
            ty: ty.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing key error.
    pub fn is_missing_key(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingKey(_)))
    }
}
