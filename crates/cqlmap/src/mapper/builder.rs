use super::{Mapper, ModelOptions};

use cqlmap_core::{driver::Driver, err, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Configures a [`Mapper`].
#[derive(Debug, Default)]
pub struct Builder {
    keyspace: Option<String>,
    models: IndexMap<String, ModelOptions>,
}

impl Builder {
    /// Keyspace used by models that do not set their own.
    pub fn keyspace(&mut self, keyspace: impl Into<String>) -> &mut Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    /// Registers a model. Registering the same name again replaces it.
    pub fn model(&mut self, name: impl Into<String>, options: ModelOptions) -> &mut Self {
        self.models.insert(name.into(), options);
        self
    }

    /// Registers every model of a JSON object keyed by model name.
    pub fn models_from_json(&mut self, json: &str) -> Result<&mut Self> {
        let models: IndexMap<String, ModelOptions> =
            serde_json::from_str(json).map_err(|e| err!("invalid model configuration: {e}"))?;

        self.models.extend(models);
        Ok(self)
    }

    pub fn build(&mut self, driver: impl Driver) -> Mapper {
        self.build_with(Arc::new(driver))
    }

    /// Like [`Builder::build`], for a driver that is already shared.
    pub fn build_with(&mut self, driver: Arc<dyn Driver>) -> Mapper {
        Mapper::new(driver, self.keyspace.clone(), self.models.clone())
    }
}
