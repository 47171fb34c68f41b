mod build;
mod exec;
mod select;
pub(crate) use select::Shape;

use crate::{result::ResultSet, MappingOptions};

use cqlmap_core::{
    driver::{Driver, Query},
    schema::{ModelMapping, TableMapping},
    stmt::{Document, Statement},
    Error, Result,
};
use cqlmap_cql::Serializer;
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};
use tracing::{debug, trace};

/// The mapper operation being planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Action {
    Find,
    FindAll,
    Get,
    Insert,
    Update,
    Remove,
}

impl Action {
    pub(crate) fn is_write(self) -> bool {
        matches!(self, Self::Insert | Self::Update | Self::Remove)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Find => "find",
            Self::FindAll => "findAll",
            Self::Get => "get",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Remove => "remove",
        })
    }
}

/// Plans statements for a model and hands them to the driver.
#[derive(Debug)]
pub(crate) struct Engine {
    pub(crate) driver: Arc<dyn Driver>,
    serializer: Serializer,
}

/// A loaded model mapping plus its memoized table selections.
#[derive(Debug)]
pub(crate) struct ModelEntry {
    pub(crate) mapping: ModelMapping,

    /// Selection only depends on the document shape, so it is computed once
    /// per shape. Only shapes naming mapped fields are kept, which bounds the
    /// map by the model's fields rather than by caller input.
    selections: Mutex<HashMap<Shape, Arc<[usize]>>>,
}

/// The statements a write compiles to, one per target table.
#[derive(Debug, Default)]
pub(crate) struct WritePlan {
    pub(crate) queries: Vec<Query>,
    pub(crate) tables: Vec<Arc<TableMapping>>,
}

impl ModelEntry {
    pub(crate) fn new(mapping: ModelMapping) -> Self {
        Self {
            mapping,
            selections: Mutex::new(HashMap::new()),
        }
    }

    /// Indices of the selected tables, in declaration order.
    pub(crate) fn select(&self, shape: Shape) -> Arc<[usize]> {
        if let Some(selected) = self.selections.lock().unwrap().get(&shape) {
            return selected.clone();
        }

        let selected: Arc<[usize]> = select::select_tables(&self.mapping, &shape).into();

        if shape.field_names().all(|field| self.is_mapped(field)) {
            self.selections
                .lock()
                .unwrap()
                .insert(shape, selected.clone());
        }

        selected
    }

    fn is_mapped(&self, field: &str) -> bool {
        self.mapping.tables.iter().any(|table| table.has_field(field))
    }

    fn table(&self, index: usize) -> &Arc<TableMapping> {
        &self.mapping.tables[index]
    }
}

impl WritePlan {
    pub(crate) fn extend(&mut self, other: WritePlan) {
        self.queries.extend(other.queries);
        self.tables.extend(other.tables);
    }
}

impl Engine {
    pub(crate) fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            serializer: Serializer::new(),
        }
    }

    pub(crate) async fn find(
        &self,
        model: &ModelEntry,
        doc: &Document,
        options: &MappingOptions,
    ) -> Result<ResultSet> {
        self.find_with(model, Action::Find, doc, options).await
    }

    pub(crate) async fn find_all(
        &self,
        model: &ModelEntry,
        options: &MappingOptions,
    ) -> Result<ResultSet> {
        self.find_with(model, Action::FindAll, &Document::new(), options)
            .await
    }

    async fn find_with(
        &self,
        model: &ModelEntry,
        action: Action,
        doc: &Document,
        options: &MappingOptions,
    ) -> Result<ResultSet> {
        options.validate(action)?;
        build::check_read(doc)?;

        let candidates = model.select(Shape::new(action, doc, options));

        let Some(&index) = candidates.first() else {
            debug!(model = %model.mapping.name, %action, "no table matches the document");
            return Ok(ResultSet::empty());
        };

        let table = model.table(index);
        debug!(model = %model.mapping.name, %action, table = table.name(), "selected table");

        let stmt = build::select(table, doc, options, options.limit)?;
        self.exec_select(table.clone(), stmt, &options.exec_options())
            .await
    }

    /// Tries each candidate table in order, returning the first document
    /// found.
    pub(crate) async fn get(
        &self,
        model: &ModelEntry,
        doc: &Document,
        options: &MappingOptions,
    ) -> Result<Option<Document>> {
        options.validate(Action::Get)?;
        build::check_read(doc)?;

        let candidates = model.select(Shape::new(Action::Get, doc, options));
        let exec = options.exec_options();

        for &index in candidates.iter() {
            let table = model.table(index);
            debug!(model = %model.mapping.name, table = table.name(), "get: trying table");

            let stmt = build::select(table, doc, options, Some(1))?;
            let result = self.exec_select(table.clone(), stmt, &exec).await?;

            if let Some(found) = result.first() {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    /// Selects the target tables of a write and compiles one statement per
    /// table. Nothing is sent to the store.
    pub(crate) fn plan_write(
        &self,
        model: &ModelEntry,
        action: Action,
        doc: &Document,
        options: &MappingOptions,
    ) -> Result<WritePlan> {
        debug_assert!(action.is_write());
        options.validate(action)?;

        let targets = model.select(Shape::new(action, doc, options));

        if options.is_conditional() && targets.len() > 1 {
            debug!(
                model = %model.mapping.name,
                %action,
                targets = targets.len(),
                "conditional write spans multiple tables"
            );
            return Err(if options.if_not_exists {
                Error::conditional_scope_if_not_exists()
            } else {
                Error::conditional_scope_when()
            });
        }

        debug!(
            model = %model.mapping.name,
            %action,
            tables = ?targets.iter().map(|&i| model.table(i).name()).collect::<Vec<_>>(),
            "selected write targets"
        );

        let mut plan = WritePlan::default();

        for &index in targets.iter() {
            let table = model.table(index);

            let stmt: Statement = match action {
                Action::Insert => build::insert(table, doc, options)?.into(),
                Action::Update => build::update(table, doc, options)?.into(),
                Action::Remove => build::delete(table, doc, options)?.into(),
                Action::Find | Action::FindAll | Action::Get => {
                    unreachable!("{action} is not a write")
                }
            };

            plan.queries.push(self.compile(stmt));
            plan.tables.push(table.clone());
        }

        Ok(plan)
    }

    fn compile(&self, stmt: Statement) -> Query {
        let query = self.serializer.query(stmt);
        trace!(cql = %query.cql, params = query.params.len(), "compiled statement");
        query
    }
}
