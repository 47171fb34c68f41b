use super::Error;

/// A document cannot be compiled into a statement for the requested operation.
#[derive(Debug)]
pub(super) struct InvalidDocumentError {
    message: Box<str>,
}

impl std::error::Error for InvalidDocumentError {}

impl core::fmt::Display for InvalidDocumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid document: {}", self.message)
    }
}

impl Error {
    pub fn invalid_document(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDocument(InvalidDocumentError {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_document(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidDocument(_))
    }
}
