use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde::Deserialize;

/// How column names translate to document field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mappings {
    /// Field names equal column names.
    #[default]
    Default,

    /// `user_id` columns map to `userId` fields.
    UnderscoreToCamelCase,
}

impl Mappings {
    pub fn field_name(&self, column: &str) -> String {
        match self {
            Self::Default => column.to_string(),
            Self::UnderscoreToCamelCase => column.to_lower_camel_case(),
        }
    }
}

/// A [`Mappings`] strategy plus explicit per-column overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameMapping {
    pub mappings: Mappings,

    /// column name -> field name; wins over `mappings`
    pub columns: IndexMap<String, String>,
}

impl NameMapping {
    pub fn new(mappings: Mappings) -> Self {
        Self {
            mappings,
            columns: IndexMap::new(),
        }
    }

    pub fn field_name(&self, column: &str) -> String {
        match self.columns.get(column) {
            Some(field) => field.clone(),
            None => self.mappings.field_name(column),
        }
    }
}
