use super::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// Operand is a [`Value::List`]
    In,
}

/// `column <op> value`, as used in WHERE and IF clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: BinaryOp,
    pub value: Value,
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: BinaryOp::Eq,
            value: value.into(),
        }
    }
}
