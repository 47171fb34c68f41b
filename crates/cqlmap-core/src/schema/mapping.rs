use super::{NameMapping, TableMetadata};
use crate::{
    stmt::{Direction, TableRef},
    Error, Result,
};

use indexmap::{IndexMap, IndexSet};
use std::{collections::HashMap, sync::Arc};

/// How one table stores a model: which columns back which fields, and which
/// fields form the primary key.
///
/// All key sets are expressed in field names. The partition key and
/// clustering key fields are always mapped columns of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMapping {
    table: TableRef,

    is_view: bool,

    /// field -> column, in the table's column order
    columns: IndexMap<String, String>,

    /// column -> field
    fields: HashMap<String, String>,

    partition_key: IndexSet<String>,

    clustering_key: Vec<(String, Direction)>,

    static_fields: IndexSet<String>,
}

/// A model and the tables it is denormalized into.
#[derive(Debug, Clone)]
pub struct ModelMapping {
    pub name: String,

    /// In declaration order; earlier tables win selection ties.
    pub tables: Vec<Arc<TableMapping>>,
}

impl TableMapping {
    /// Builds the mapping from store metadata.
    pub fn from_metadata(
        keyspace: Option<&str>,
        metadata: &TableMetadata,
        names: &NameMapping,
        is_view: bool,
    ) -> Result<Self> {
        let mut columns = IndexMap::new();
        let mut fields = HashMap::new();
        let mut static_fields = IndexSet::new();

        for column in &metadata.columns {
            let field = names.field_name(&column.name);

            if fields
                .insert(column.name.clone(), field.clone())
                .is_some()
            {
                return Err(Error::invalid_metadata(
                    &metadata.name,
                    format!("duplicate column `{}`", column.name),
                ));
            }

            if columns.insert(field.clone(), column.name.clone()).is_some() {
                return Err(Error::invalid_metadata(
                    &metadata.name,
                    format!("more than one column maps to field `{field}`"),
                ));
            }

            if column.is_static {
                static_fields.insert(field);
            }
        }

        let key_field = |column: &str| -> Result<String> {
            fields.get(column).cloned().ok_or_else(|| {
                Error::invalid_metadata(
                    &metadata.name,
                    format!("key column `{column}` is not a column of the table"),
                )
            })
        };

        if metadata.partition_key.is_empty() {
            return Err(Error::invalid_metadata(
                &metadata.name,
                "table has no partition key",
            ));
        }

        let partition_key = metadata
            .partition_key
            .iter()
            .map(|column| key_field(column.as_str()))
            .collect::<Result<IndexSet<_>>>()?;

        let clustering_key = metadata
            .clustering_key
            .iter()
            .map(|column| Ok((key_field(column.name.as_str())?, column.order)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            table: TableRef::new(keyspace, &metadata.name),
            is_view,
            columns,
            fields,
            partition_key,
            clustering_key,
            static_fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn table_ref(&self) -> &TableRef {
        &self.table
    }

    /// Materialized views are read candidates only.
    pub fn is_view(&self) -> bool {
        self.is_view
    }

    /// Column backing `field`
    pub fn column(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }

    /// Field stored in `column`
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns.contains_key(field)
    }

    /// Mapped fields, in column order
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Mapped columns, in column order
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.values().map(String::as_str)
    }

    pub fn partition_key(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.partition_key.iter().map(String::as_str)
    }

    pub fn clustering_key(&self) -> &[(String, Direction)] {
        &self.clustering_key
    }

    /// Partition key fields followed by clustering key fields.
    pub fn primary_key(&self) -> impl Iterator<Item = &str> + '_ {
        self.partition_key()
            .chain(self.clustering_key.iter().map(|(field, _)| field.as_str()))
    }

    pub fn is_partition_key(&self, field: &str) -> bool {
        self.partition_key.contains(field)
    }

    pub fn is_clustering_key(&self, field: &str) -> bool {
        self.clustering_key.iter().any(|(f, _)| f == field)
    }

    pub fn is_key(&self, field: &str) -> bool {
        self.is_partition_key(field) || self.is_clustering_key(field)
    }

    pub fn is_static(&self, field: &str) -> bool {
        self.static_fields.contains(field)
    }
}
