use super::Error;

/// `get` was called with a document that has no fields.
#[derive(Debug)]
pub(super) struct EmptyFilterError;

impl std::error::Error for EmptyFilterError {}

impl core::fmt::Display for EmptyFilterError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("Expected object with keys")
    }
}

impl Error {
    pub fn empty_filter() -> Error {
        Error::from(super::ErrorKind::EmptyFilter(EmptyFilterError))
    }

    pub fn is_empty_filter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::EmptyFilter(_))
    }
}
