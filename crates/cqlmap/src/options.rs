use crate::engine::Action;

use cqlmap_core::{
    driver::{ExecOptions, PageState},
    stmt::{Direction, Document},
    Error, Result,
};
use indexmap::IndexMap;

/// Per-call options recognized by the mapper.
///
/// Fields are public; the builder-style methods are a convenience.
#[derive(Debug, Clone, Default)]
pub struct MappingOptions {
    /// Fields to read (or, with `delete_only_columns`, to delete). A table is
    /// only selected when it maps every one of them.
    pub fields: Option<Vec<String>>,

    /// Field -> direction. Insertion order is the sort priority.
    pub order_by: IndexMap<String, Direction>,

    pub limit: Option<u32>,

    pub if_not_exists: bool,

    pub if_exists: bool,

    /// Conditions of a lightweight transaction, keyed by field
    pub when: Document,

    pub fetch_size: Option<u32>,

    pub page_state: Option<PageState>,

    /// On remove, delete the `fields` columns instead of the row
    pub delete_only_columns: bool,

    /// Time-to-live in seconds for inserted or updated values
    pub ttl: Option<u32>,

    /// Passthrough execution parameters
    pub exec: ExecOptions,
}

impl MappingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by.insert(field.into(), direction);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn when(mut self, when: Document) -> Self {
        self.when = when;
        self
    }

    pub fn fetch_size(mut self, fetch_size: u32) -> Self {
        self.fetch_size = Some(fetch_size);
        self
    }

    pub fn page_state(mut self, page_state: PageState) -> Self {
        self.page_state = Some(page_state);
        self
    }

    pub fn delete_only_columns(mut self) -> Self {
        self.delete_only_columns = true;
        self
    }

    pub fn ttl(mut self, seconds: u32) -> Self {
        self.ttl = Some(seconds);
        self
    }

    pub fn exec(mut self, exec: ExecOptions) -> Self {
        self.exec = exec;
        self
    }

    /// True when the write must be a lightweight transaction.
    pub(crate) fn is_conditional(&self) -> bool {
        self.if_not_exists || self.if_exists || !self.when.is_empty()
    }

    /// Execution options with the paging fields folded in.
    pub(crate) fn exec_options(&self) -> ExecOptions {
        let mut exec = self.exec.clone();
        if self.fetch_size.is_some() {
            exec.fetch_size = self.fetch_size;
        }
        if self.page_state.is_some() {
            exec.page_state = self.page_state.clone();
        }
        exec
    }

    /// Rejects option combinations that cannot be compiled for `action`.
    pub(crate) fn validate(&self, action: Action) -> Result<()> {
        let conditions = [self.if_not_exists, self.if_exists, !self.when.is_empty()]
            .into_iter()
            .filter(|set| *set)
            .count();

        if conditions > 1 {
            return Err(Error::invalid_options(
                "ifNotExists, ifExists and when are mutually exclusive",
            ));
        }

        if self.if_not_exists && action != Action::Insert {
            return Err(Error::invalid_options(format!(
                "ifNotExists is only supported by insert, not {action}"
            )));
        }

        if (self.if_exists || !self.when.is_empty())
            && !matches!(action, Action::Update | Action::Remove)
        {
            return Err(Error::invalid_options(format!(
                "ifExists and when are only supported by update and remove, not {action}"
            )));
        }

        if self.delete_only_columns {
            if action != Action::Remove {
                return Err(Error::invalid_options(
                    "deleteOnlyColumns is only supported by remove",
                ));
            }

            if self.fields.as_ref().map_or(true, Vec::is_empty) {
                return Err(Error::invalid_options(
                    "deleteOnlyColumns requires the fields to delete",
                ));
            }
        }

        Ok(())
    }
}
