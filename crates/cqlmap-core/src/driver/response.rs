use crate::stmt::Value;

use indexmap::IndexMap;
use std::sync::Arc;

/// Rows returned by the store for one page, plus the continuation token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub rows: Vec<Row>,

    /// `None` when there are no further pages
    pub page_state: Option<PageState>,
}

impl Response {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            page_state: None,
        }
    }
}

/// One row, keyed by column name in projection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    /// Column the store adds to the result of a conditional write.
    pub const APPLIED: &'static str = "[applied]";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The `[applied]` flag of a conditional write result.
    pub fn applied(&self) -> Option<bool> {
        self.get(Self::APPLIED).and_then(Value::as_bool)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Opaque continuation token for paged reads.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PageState(Arc<[u8]>);

impl PageState {
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(bytes.as_ref().into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for PageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PageState(")?;
        for byte in self.0.iter() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
