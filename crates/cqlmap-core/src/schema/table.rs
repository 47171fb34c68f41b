use crate::stmt::Direction;

/// Column and key metadata for one table, as reported by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    /// Name of the table
    pub name: String,

    /// All columns, in the order the store reports them
    pub columns: Vec<Column>,

    /// Partition key column names, in key order
    pub partition_key: Vec<String>,

    /// Clustering key columns, in key order, with their declared sort order
    pub clustering_key: Vec<ClusteringColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,

    /// CQL type, e.g. `uuid` or `list<text>`
    pub ty: String,

    /// True for `STATIC` columns, shared by every row of a partition
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringColumn {
    pub name: String,
    pub order: Direction,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            partition_key: vec![],
            clustering_key: vec![],
        }
    }

    pub fn partition_key(mut self, name: &str, ty: &str) -> Self {
        self.partition_key.push(name.to_string());
        self.column(name, ty)
    }

    pub fn clustering_key(mut self, name: &str, ty: &str, order: Direction) -> Self {
        self.clustering_key.push(ClusteringColumn {
            name: name.to_string(),
            order,
        });
        self.column(name, ty)
    }

    pub fn column(mut self, name: &str, ty: &str) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            ty: ty.to_string(),
            is_static: false,
        });
        self
    }

    pub fn static_column(mut self, name: &str, ty: &str) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            ty: ty.to_string(),
            is_static: true,
        });
        self
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.partition_key.iter().any(|k| k == name)
            || self.clustering_key.iter().any(|k| k.name == name)
    }
}
