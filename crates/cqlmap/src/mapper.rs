mod builder;
pub use builder::Builder;

mod model_options;
pub use model_options::{ModelOptions, TableOptions};

mod single_flight;
use single_flight::SingleFlight;

use crate::{
    batch::BatchItem,
    engine::{Engine, ModelEntry, WritePlan},
    ModelMapper, ResultSet,
};

use cqlmap_core::{
    driver::{Driver, ExecOptions},
    schema::{ModelMapping, TableMapping, TableMetadata},
    Error, Result,
};
use indexmap::IndexMap;
use std::{borrow::Cow, sync::Arc};
use tracing::debug;

/// Entry point: holds the driver, the registered models and the metadata
/// they resolve to.
///
/// Cloning is cheap; clones share the metadata cache.
#[derive(Debug, Clone)]
pub struct Mapper {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    engine: Engine,

    /// Keyspace used by models that do not name one
    keyspace: Option<String>,

    models: IndexMap<String, ModelOptions>,

    /// Keyed by (keyspace, table)
    tables: SingleFlight<(Option<String>, String), Arc<TableMetadata>>,

    entries: SingleFlight<String, Arc<ModelEntry>>,
}

impl Mapper {
    pub fn builder() -> Builder {
        Builder::default()
    }

    fn new(driver: Arc<dyn Driver>, keyspace: Option<String>, models: IndexMap<String, ModelOptions>) -> Self {
        Self {
            shared: Arc::new(Shared {
                engine: Engine::new(driver),
                keyspace,
                models,
                tables: SingleFlight::new(),
                entries: SingleFlight::new(),
            }),
        }
    }

    /// Returns a mapper for one model. The model is resolved on first use.
    pub fn for_model(&self, name: impl Into<String>) -> ModelMapper {
        ModelMapper::new(self.clone(), name.into())
    }

    /// Executes writes from several items, possibly of several models, as a
    /// single atomic batch.
    ///
    /// Per-item options (conditions, TTL) shape each item's statements;
    /// `options` applies to the batch as a whole.
    pub async fn batch(
        &self,
        items: impl IntoIterator<Item = BatchItem>,
        options: &ExecOptions,
    ) -> Result<ResultSet> {
        let items: Vec<_> = items.into_iter().collect();

        for item in &items {
            self.check_registered(&item.model)?;
        }

        let mut plan = WritePlan::default();

        for item in &items {
            let model = self.model(&item.model).await?;
            plan.extend(
                self.engine()
                    .plan_write(&model, item.action, &item.doc, &item.options)?,
            );
        }

        self.engine().exec_write(plan, options).await
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.shared.engine
    }

    pub(crate) fn check_registered(&self, name: &str) -> Result<()> {
        if self.shared.models.contains_key(name) {
            Ok(())
        } else {
            Err(Error::model_not_found(name))
        }
    }

    /// Resolves a registered model, loading its table metadata on first use.
    pub(crate) async fn model(&self, name: &str) -> Result<Arc<ModelEntry>> {
        let Some(options) = self.shared.models.get(name) else {
            return Err(Error::model_not_found(name));
        };

        self.shared
            .entries
            .get_or_load(&name.to_string(), || self.load_model(name, options))
            .await
    }

    async fn load_model(&self, name: &str, options: &ModelOptions) -> Result<Arc<ModelEntry>> {
        let keyspace = options
            .keyspace
            .as_deref()
            .or(self.shared.keyspace.as_deref());
        let names = options.name_mapping();

        // Without explicit tables the model is stored in the table of the
        // same name.
        let tables = if options.tables.is_empty() {
            Cow::Owned(vec![TableOptions::new(name)])
        } else {
            Cow::Borrowed(&options.tables)
        };

        let mut mappings = Vec::with_capacity(tables.len());

        for table in tables.iter() {
            let metadata = self.table_metadata(keyspace, &table.name).await?;
            let mapping = TableMapping::from_metadata(keyspace, &metadata, &names, table.is_view)?;
            mappings.push(Arc::new(mapping));
        }

        debug!(model = name, tables = mappings.len(), "model mapping loaded");

        Ok(Arc::new(ModelEntry::new(ModelMapping {
            name: name.to_string(),
            tables: mappings,
        })))
    }

    async fn table_metadata(&self, keyspace: Option<&str>, table: &str) -> Result<Arc<TableMetadata>> {
        let key = (keyspace.map(str::to_string), table.to_string());

        self.shared
            .tables
            .get_or_load(&key, || async {
                debug!(keyspace, table, "fetching table metadata");

                let metadata = self
                    .engine()
                    .driver
                    .table_metadata(keyspace, table)
                    .await
                    .inspect_err(|err| debug!(table, error = %err, "metadata fetch failed"))?;

                Ok(Arc::new(metadata))
            })
            .await
    }
}
