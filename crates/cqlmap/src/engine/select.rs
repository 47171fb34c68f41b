use super::Action;
use crate::MappingOptions;

use cqlmap_core::{
    schema::{ModelMapping, TableMapping},
    stmt::{Direction, Document},
};
use std::collections::BTreeSet;

/// Everything table selection depends on. Values never matter, only which
/// fields are present, so this doubles as the selection cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Shape {
    action: Action,

    /// Fields present in the document. A field set to null is present.
    present: BTreeSet<String>,

    order_by: Vec<(String, Direction)>,

    fields: Option<BTreeSet<String>>,

    delete_only_columns: bool,
}

/// Returns the indices of the tables matching `shape`, in declaration order.
pub(crate) fn select_tables(model: &ModelMapping, shape: &Shape) -> Vec<usize> {
    model
        .tables
        .iter()
        .enumerate()
        .filter(|(_, table)| shape.matches(table))
        .map(|(index, _)| index)
        .collect()
}

impl Shape {
    pub(crate) fn new(action: Action, doc: &Document, options: &MappingOptions) -> Self {
        Self {
            action,
            present: doc.fields().map(str::to_string).collect(),
            order_by: options
                .order_by
                .iter()
                .map(|(field, direction)| (field.clone(), *direction))
                .collect(),
            fields: options
                .fields
                .as_ref()
                .map(|fields| fields.iter().cloned().collect()),
            delete_only_columns: options.delete_only_columns,
        }
    }

    /// Every field name the shape refers to.
    pub(crate) fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.present
            .iter()
            .chain(self.order_by.iter().map(|(field, _)| field))
            .chain(self.fields.iter().flatten())
            .map(String::as_str)
    }

    pub(crate) fn matches(&self, table: &TableMapping) -> bool {
        match self.action {
            Action::Find | Action::Get => self.is_read_candidate(table, true),
            Action::FindAll => self.is_read_candidate(table, false),
            Action::Insert | Action::Update | Action::Remove => self.is_write_target(table),
        }
    }

    fn has(&self, field: &str) -> bool {
        self.present.contains(field)
    }

    fn is_read_candidate(&self, table: &TableMapping, restricted: bool) -> bool {
        if restricted && !table.partition_key().all(|field| self.has(field)) {
            return false;
        }

        // CQL only restricts key columns without ALLOW FILTERING, so every
        // filtered field must be part of the primary key.
        if !self.present.iter().all(|field| table.is_key(field)) {
            return false;
        }

        if let Some(fields) = &self.fields {
            if !fields.iter().all(|field| table.has_field(field)) {
                return false;
            }
        }

        self.matches_order_by(table)
    }

    /// `order_by` must name a prefix of the clustering key, either all in the
    /// declared order or all reversed.
    fn matches_order_by(&self, table: &TableMapping) -> bool {
        if self.order_by.is_empty() {
            return true;
        }

        let clustering = table.clustering_key();

        if self.order_by.len() > clustering.len() {
            return false;
        }

        let pairs = || self.order_by.iter().zip(clustering);

        if !pairs().all(|((field, _), (key, _))| field == key) {
            return false;
        }

        let natural = pairs().all(|((_, direction), (_, order))| direction == order);
        let reversed = pairs().all(|((_, direction), (_, order))| *direction == order.reverse());

        natural || reversed
    }

    fn is_write_target(&self, table: &TableMapping) -> bool {
        if table.is_view() {
            return false;
        }

        if !table.partition_key().all(|field| self.has(field)) {
            return false;
        }

        let full_key = table
            .clustering_key()
            .iter()
            .all(|(field, _)| self.has(field));

        let mut provided = self
            .present
            .iter()
            .filter(|field| table.has_field(field) && !table.is_key(field))
            .peekable();

        match self.action {
            Action::Insert if full_key => true,
            Action::Update if full_key => provided.peek().is_some(),
            // Without the full clustering key only static columns can be
            // written, and only when the document writes nothing else.
            Action::Insert | Action::Update => {
                provided.peek().is_some() && provided.all(|field| table.is_static(field))
            }
            Action::Remove if !full_key => false,
            Action::Remove if self.delete_only_columns => self
                .fields
                .iter()
                .flatten()
                .all(|field| table.has_field(field) && !table.is_key(field)),
            Action::Remove => true,
            Action::Find | Action::FindAll | Action::Get => false,
        }
    }
}
