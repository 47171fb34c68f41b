use crate::stmt::{Statement, Value};

/// A compiled statement: CQL text, positional bind parameters, and the
/// structured statement the text was serialized from.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub cql: String,

    /// One value per `?` placeholder, in order
    pub params: Vec<Value>,

    pub stmt: Statement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Execute one statement
    Query(Query),

    /// Execute several write statements as one atomic (logged) batch
    Batch(Vec<Query>),
}

impl Operation {
    pub fn queries(&self) -> &[Query] {
        match self {
            Self::Query(query) => std::slice::from_ref(query),
            Self::Batch(queries) => queries,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
