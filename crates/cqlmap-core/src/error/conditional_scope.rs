use super::Error;

/// A conditional write resolved to more than one table.
#[derive(Debug)]
pub(super) struct ConditionalScopeError {
    if_not_exists: bool,
}

impl std::error::Error for ConditionalScopeError {}

impl core::fmt::Display for ConditionalScopeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.if_not_exists {
            f.write_str("Batch with ifNotExists conditions cannot span multiple tables")
        } else {
            f.write_str("Batch with when or ifExists conditions cannot span multiple tables")
        }
    }
}

impl Error {
    /// An `ifNotExists` insert targets more than one table.
    pub fn conditional_scope_if_not_exists() -> Error {
        Error::from(super::ErrorKind::ConditionalScope(ConditionalScopeError {
            if_not_exists: true,
        }))
    }

    /// A write carrying `when` or `ifExists` targets more than one table.
    pub fn conditional_scope_when() -> Error {
        Error::from(super::ErrorKind::ConditionalScope(ConditionalScopeError {
            if_not_exists: false,
        }))
    }

    pub fn is_conditional_scope(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ConditionalScope(_))
    }
}
