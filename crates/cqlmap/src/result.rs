use cqlmap_core::{
    driver::{PageState, Response, Row},
    schema::TableMapping,
    stmt::Document,
};
use std::sync::{Arc, OnceLock};

/// Rows returned by a mapper call, exposed as documents.
///
/// Rows are mapped to documents lazily: `first` and `iter` map on demand and
/// `to_array` maps everything once and keeps the result.
#[derive(Debug)]
pub struct ResultSet {
    rows: Vec<Row>,

    /// Table the rows came from. `None` when a write spanned several tables;
    /// column names are then used as field names.
    table: Option<Arc<TableMapping>>,

    page_state: Option<PageState>,

    applied: bool,

    documents: OnceLock<Vec<Document>>,
}

impl ResultSet {
    pub(crate) fn empty() -> Self {
        Self {
            rows: vec![],
            table: None,
            page_state: None,
            applied: true,
            documents: OnceLock::new(),
        }
    }

    pub(crate) fn from_rows(response: Response, table: Arc<TableMapping>) -> Self {
        Self {
            rows: response.rows,
            table: Some(table),
            page_state: response.page_state,
            applied: true,
            documents: OnceLock::new(),
        }
    }

    /// A conditional write answers with an `[applied]` row. When it was not
    /// applied the rest of the row is the current state of the conflicting
    /// row, which is kept as the result.
    pub(crate) fn from_write(response: Response, table: Option<Arc<TableMapping>>) -> Self {
        let applied = response
            .rows
            .first()
            .and_then(Row::applied)
            .unwrap_or(true);

        let rows = response
            .rows
            .into_iter()
            .map(|row| {
                row.iter()
                    .filter(|(column, _)| *column != Row::APPLIED)
                    .map(|(column, value)| (column.to_string(), value.clone()))
                    .collect::<Row>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        Self {
            rows,
            table,
            page_state: response.page_state,
            applied,
            documents: OnceLock::new(),
        }
    }

    /// The first document, if any.
    pub fn first(&self) -> Option<Document> {
        if let Some(documents) = self.documents.get() {
            return documents.first().cloned();
        }

        self.rows.first().map(|row| self.to_document(row))
    }

    /// All documents, mapped once and cached.
    pub fn to_array(&self) -> &[Document] {
        self.documents
            .get_or_init(|| self.rows.iter().map(|row| self.to_document(row)).collect())
    }

    /// Alias of [`ResultSet::to_array`]
    pub fn to_vec(&self) -> Vec<Document> {
        self.to_array().to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = Document> + '_ {
        self.rows.iter().map(|row| self.to_document(row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Opaque token resuming the read after the last row of this page.
    /// `None` once the last page has been read.
    pub fn page_state(&self) -> Option<&PageState> {
        self.page_state.as_ref()
    }

    /// False only when a conditional write was rejected.
    pub fn was_applied(&self) -> bool {
        self.applied
    }

    fn to_document(&self, row: &Row) -> Document {
        row.iter()
            .filter_map(|(column, value)| {
                let field = match &self.table {
                    Some(table) => table.field(column)?,
                    None => column,
                };
                Some((field.to_string(), value.clone()))
            })
            .collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(mut self) -> Self::IntoIter {
        match self.documents.take() {
            Some(documents) => documents.into_iter(),
            None => self
                .rows
                .iter()
                .map(|row| self.to_document(row))
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = Document;
    type IntoIter = Box<dyn Iterator<Item = Document> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
