use super::{Condition, Delete, Insert, Select, TableRef, Update};

/// A structured CQL statement targeting exactly one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    pub fn table(&self) -> &TableRef {
        match self {
            Self::Select(stmt) => &stmt.table,
            Self::Insert(stmt) => &stmt.table,
            Self::Update(stmt) => &stmt.table,
            Self::Delete(stmt) => &stmt.table,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    /// True when the statement carries a lightweight-transaction clause.
    pub fn is_conditional(&self) -> bool {
        match self {
            Self::Select(_) => false,
            Self::Insert(stmt) => stmt.if_not_exists,
            Self::Update(stmt) => !stmt.condition.is_none(),
            Self::Delete(stmt) => !stmt.condition.is_none(),
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Self::Update(stmt) => Some(&stmt.condition),
            Self::Delete(stmt) => Some(&stmt.condition),
            _ => None,
        }
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
