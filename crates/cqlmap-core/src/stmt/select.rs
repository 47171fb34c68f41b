use super::{OrderBy, Predicate, TableRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: TableRef,

    /// Projected columns. Never empty: the builder always lists them so rows
    /// can be mapped back to fields.
    pub columns: Vec<String>,

    pub filter: Vec<Predicate>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<i32>,
}
