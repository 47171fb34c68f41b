use super::{BinaryOp, Value};

/// A query operator carried by a document field instead of a plain value.
///
/// Filter variants restrict reads (and conditional writes); mutation variants
/// are only meaningful in an UPDATE's SET clause. The tag decides the
/// semantics, never the shape of the operand: `SetValue(list)` assigns a list
/// while `Append(list)` concatenates one.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Eq(Value),
    NotEq(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),

    /// Several filters applied to the same column, e.g. a range with both
    /// bounds.
    And(Vec<Operator>),

    Append(Value),
    Prepend(Value),
    Remove(Value),
    Add(Value),
    Subtract(Value),
    SetValue(Value),
}

impl Operator {
    /// The operator's name as written by callers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eq(_) => "eq",
            Self::NotEq(_) => "notEq",
            Self::Gt(_) => "gt",
            Self::Gte(_) => "gte",
            Self::Lt(_) => "lt",
            Self::Lte(_) => "lte",
            Self::In(_) => "in",
            Self::And(_) => "and",
            Self::Append(_) => "append",
            Self::Prepend(_) => "prepend",
            Self::Remove(_) => "remove",
            Self::Add(_) => "add",
            Self::Subtract(_) => "subtract",
            Self::SetValue(_) => "setValue",
        }
    }

    /// Flattens a filter into `(comparison, operand)` pairs, expanding `And`.
    ///
    /// Returns `None` for mutation operators.
    pub fn comparisons(&self) -> Option<Vec<(BinaryOp, Value)>> {
        let mut out = vec![];
        self.push_comparisons(&mut out)?;
        Some(out)
    }

    fn push_comparisons(&self, out: &mut Vec<(BinaryOp, Value)>) -> Option<()> {
        let (op, value) = match self {
            Self::Eq(v) => (BinaryOp::Eq, v.clone()),
            Self::NotEq(v) => (BinaryOp::Ne, v.clone()),
            Self::Gt(v) => (BinaryOp::Gt, v.clone()),
            Self::Gte(v) => (BinaryOp::Ge, v.clone()),
            Self::Lt(v) => (BinaryOp::Lt, v.clone()),
            Self::Lte(v) => (BinaryOp::Le, v.clone()),
            Self::In(items) => (BinaryOp::In, Value::List(items.clone())),
            Self::And(operands) => {
                for operand in operands {
                    operand.push_comparisons(out)?;
                }
                return Some(());
            }
            _ => return None,
        };
        out.push((op, value));
        Some(())
    }
}

pub fn eq(value: impl Into<Value>) -> Operator {
    Operator::Eq(value.into())
}

pub fn not_eq(value: impl Into<Value>) -> Operator {
    Operator::NotEq(value.into())
}

pub fn gt(value: impl Into<Value>) -> Operator {
    Operator::Gt(value.into())
}

pub fn gte(value: impl Into<Value>) -> Operator {
    Operator::Gte(value.into())
}

pub fn lt(value: impl Into<Value>) -> Operator {
    Operator::Lt(value.into())
}

pub fn lte(value: impl Into<Value>) -> Operator {
    Operator::Lte(value.into())
}

pub fn in_<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Operator {
    Operator::In(items.into_iter().map(Into::into).collect())
}

pub fn and(operands: impl IntoIterator<Item = Operator>) -> Operator {
    Operator::And(operands.into_iter().collect())
}

pub fn append(value: impl Into<Value>) -> Operator {
    Operator::Append(value.into())
}

pub fn prepend(value: impl Into<Value>) -> Operator {
    Operator::Prepend(value.into())
}

pub fn remove(value: impl Into<Value>) -> Operator {
    Operator::Remove(value.into())
}

pub fn add(value: impl Into<Value>) -> Operator {
    Operator::Add(value.into())
}

pub fn subtract(value: impl Into<Value>) -> Operator {
    Operator::Subtract(value.into())
}

pub fn set_value(value: impl Into<Value>) -> Operator {
    Operator::SetValue(value.into())
}
