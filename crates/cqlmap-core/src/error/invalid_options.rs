use super::Error;

/// Mapping options that contradict each other or the operation.
#[derive(Debug)]
pub(super) struct InvalidOptionsError {
    message: Box<str>,
}

impl std::error::Error for InvalidOptionsError {}

impl core::fmt::Display for InvalidOptionsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid options: {}", self.message)
    }
}

impl Error {
    pub fn invalid_options(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOptions(InvalidOptionsError {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_options(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOptions(_))
    }
}
