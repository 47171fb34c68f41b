use super::{Assignment, Condition, Predicate, TableRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: TableRef,

    pub assignments: Vec<Assignment>,

    /// Primary key restriction
    pub filter: Vec<Predicate>,

    pub condition: Condition,

    pub ttl: Option<i32>,
}
