use super::{Expr, Value};

use indexmap::IndexMap;

/// A field-name keyed document.
///
/// A field that is absent was not provided: it takes no part in table
/// selection and is left out of the statement. A field set to
/// [`Value::Null`] is provided and means "set to NULL".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: IndexMap<String, Expr>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any previous value for the same name.
    pub fn insert(&mut self, field: impl Into<String>, expr: impl Into<Expr>) -> &mut Self {
        self.fields.insert(field.into(), expr.into());
        self
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.insert(field, expr);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Expr> {
        self.fields.get(field)
    }

    /// Returns the plain value of a field, if present and not an operator.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.get(field).and_then(Expr::as_value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Expr> {
        self.fields.shift_remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Expr)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, E: Into<Expr>> FromIterator<(K, E)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, e)| (k.into(), e.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Expr);
    type IntoIter = indexmap::map::IntoIter<String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
