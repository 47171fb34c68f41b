use super::{Condition, Predicate, TableRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: TableRef,

    /// When non-empty only these columns are deleted (set to null) instead of
    /// the whole row.
    pub columns: Vec<String>,

    /// Primary key restriction
    pub filter: Vec<Predicate>,

    pub condition: Condition,
}
