use super::{Operator, Value};

/// The content of a document field: a plain value or a query operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Value(Value),
    Operator(Operator),
}

impl Expr {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Operator(_) => None,
        }
    }
}

impl From<Operator> for Expr {
    fn from(src: Operator) -> Self {
        Self::Operator(src)
    }
}

macro_rules! impl_from_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Expr {
                fn from(src: $ty) -> Self {
                    Self::Value(src.into())
                }
            }
        )*
    };
}

impl_from_value!(
    Value,
    bool,
    i32,
    i64,
    f64,
    String,
    &String,
    &str,
    Vec<u8>,
    Vec<Value>,
    uuid::Uuid
);

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(src: Option<T>) -> Self {
        Self::Value(src.into())
    }
}
