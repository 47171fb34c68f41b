use super::Predicate;

/// The lightweight-transaction clause of a write. At most one can apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Condition {
    #[default]
    None,
    IfExists,
    If(Vec<Predicate>),
}

impl Condition {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
