use crate::{batch::ModelBatchMapper, engine::Action, Mapper, MappingOptions, ResultSet};

use cqlmap_core::{stmt::Document, Error, Result};
use std::sync::Arc;

/// Reads and writes documents of one model.
///
/// Every operation first resolves the model, which fails with a
/// "could not be retrieved" error when the name was never registered.
#[derive(Debug, Clone)]
pub struct ModelMapper {
    mapper: Mapper,
    name: Arc<str>,
}

impl ModelMapper {
    pub(crate) fn new(mapper: Mapper, name: String) -> Self {
        Self {
            mapper,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the documents matching `doc` from the first table that can
    /// serve the query. Returns an empty result when no table can.
    pub async fn find(&self, doc: &Document, options: &MappingOptions) -> Result<ResultSet> {
        let model = self.mapper.model(&self.name).await?;
        self.mapper.engine().find(&model, doc, options).await
    }

    /// Reads every document, from the first table that serves the options.
    pub async fn find_all(&self, options: &MappingOptions) -> Result<ResultSet> {
        let model = self.mapper.model(&self.name).await?;
        self.mapper.engine().find_all(&model, options).await
    }

    /// Reads a single document, trying each table that can serve `doc` in
    /// order until one returns a row.
    pub async fn get(&self, doc: &Document, options: &MappingOptions) -> Result<Option<Document>> {
        if doc.is_empty() {
            return Err(Error::empty_filter());
        }

        let model = self.mapper.model(&self.name).await?;
        self.mapper.engine().get(&model, doc, options).await
    }

    /// Writes `doc` to every table whose primary key it covers.
    pub async fn insert(&self, doc: &Document, options: &MappingOptions) -> Result<ResultSet> {
        self.write(Action::Insert, doc, options).await
    }

    /// Updates `doc` in every table whose primary key it covers and that
    /// stores at least one of its other fields.
    pub async fn update(&self, doc: &Document, options: &MappingOptions) -> Result<ResultSet> {
        self.write(Action::Update, doc, options).await
    }

    /// Deletes the row addressed by `doc` from every table whose primary key
    /// it covers.
    pub async fn remove(&self, doc: &Document, options: &MappingOptions) -> Result<ResultSet> {
        self.write(Action::Remove, doc, options).await
    }

    /// Builds batch items for this model, to be passed to [`Mapper::batch`].
    pub fn batching(&self) -> ModelBatchMapper {
        ModelBatchMapper::new(self.name.clone())
    }

    async fn write(&self, action: Action, doc: &Document, options: &MappingOptions) -> Result<ResultSet> {
        let model = self.mapper.model(&self.name).await?;
        let engine = self.mapper.engine();

        let plan = engine.plan_write(&model, action, doc, options)?;
        engine.exec_write(plan, &options.exec_options()).await
    }
}
