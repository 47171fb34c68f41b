use super::{TableRef, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: TableRef,

    pub columns: Vec<String>,

    /// One value per entry of `columns`
    pub values: Vec<Value>,

    pub if_not_exists: bool,

    pub ttl: Option<i32>,
}
