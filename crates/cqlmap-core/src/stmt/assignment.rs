use super::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `col = ?`
    Set,
    /// `col = col + ?`
    Append,
    /// `col = ? + col`
    Prepend,
    /// `col = col - ?`
    Remove,
}

/// One entry of an UPDATE's SET clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub op: AssignOp,
    pub value: Value,
}
