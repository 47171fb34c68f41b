use cqlmap_core::schema::{Mappings, NameMapping};

use indexmap::IndexMap;
use serde::Deserialize;

/// How a model is stored.
///
/// Deserializes from the camelCase configuration format:
///
/// ```
/// # use cqlmap::ModelOptions;
/// let options: ModelOptions = serde_json::from_str(r#"{
///     "tables": ["videos", { "name": "videos_by_name", "isView": true }],
///     "mappings": "underscore_to_camel_case",
///     "columns": { "videoid": "id" }
/// }"#).unwrap();
///
/// assert_eq!(options.tables.len(), 2);
/// assert!(options.tables[1].is_view);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelOptions {
    /// Tables the model is denormalized into, in priority order. Empty means
    /// a single table named after the model.
    pub tables: Vec<TableOptions>,

    /// Overrides the mapper's keyspace for this model
    pub keyspace: Option<String>,

    pub mappings: Mappings,

    /// column name -> field name overrides
    pub columns: IndexMap<String, String>,
}

/// One table of a model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TableOptionsRepr")]
pub struct TableOptions {
    pub name: String,

    /// Materialized views are never written to.
    pub is_view: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableOptionsRepr {
    Name(String),
    Table(TableOptionsFields),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableOptionsFields {
    name: String,
    #[serde(default)]
    is_view: bool,
}

impl ModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.tables.push(TableOptions::new(name));
        self
    }

    pub fn view(mut self, name: impl Into<String>) -> Self {
        self.tables.push(TableOptions {
            name: name.into(),
            is_view: true,
        });
        self
    }

    pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    pub fn mappings(mut self, mappings: Mappings) -> Self {
        self.mappings = mappings;
        self
    }

    /// Maps `column` to `field`, bypassing `mappings`.
    pub fn column(mut self, column: impl Into<String>, field: impl Into<String>) -> Self {
        self.columns.insert(column.into(), field.into());
        self
    }

    pub(crate) fn name_mapping(&self) -> NameMapping {
        NameMapping {
            mappings: self.mappings,
            columns: self.columns.clone(),
        }
    }
}

impl TableOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_view: false,
        }
    }
}

impl From<&str> for TableOptions {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<TableOptionsRepr> for TableOptions {
    fn from(repr: TableOptionsRepr) -> Self {
        match repr {
            TableOptionsRepr::Name(name) => Self::new(name),
            TableOptionsRepr::Table(fields) => Self {
                name: fields.name,
                is_view: fields.is_view,
            },
        }
    }
}
