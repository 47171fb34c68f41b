/// A possibly keyspace-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub keyspace: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(keyspace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.map(str::to_string),
            name: name.into(),
        }
    }
}
