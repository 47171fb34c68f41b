use super::Error;

/// An operation addressed a model that was never registered with the mapper.
#[derive(Debug)]
pub(super) struct ModelNotFoundError {
    model: Box<str>,
}

impl std::error::Error for ModelNotFoundError {}

impl core::fmt::Display for ModelNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Table \"{}\" could not be retrieved", self.model)
    }
}

impl Error {
    pub fn model_not_found(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ModelNotFound(ModelNotFoundError {
            model: model.into().into(),
        }))
    }

    pub fn is_model_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModelNotFound(_))
    }
}
