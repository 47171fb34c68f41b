use super::Error;

/// Table metadata returned by the store cannot back a table mapping.
#[derive(Debug)]
pub(super) struct InvalidMetadataError {
    table: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidMetadataError {}

impl core::fmt::Display for InvalidMetadataError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid metadata for table `{}`: {}",
            self.table, self.message
        )
    }
}

impl Error {
    pub fn invalid_metadata(table: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMetadata(InvalidMetadataError {
            table: table.into().into(),
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_metadata(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidMetadata(_))
    }
}
