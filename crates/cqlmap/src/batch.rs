use crate::{engine::Action, MappingOptions};

use cqlmap_core::stmt::Document;
use std::sync::Arc;

/// One write of a [`Mapper::batch`](crate::Mapper::batch) call.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub(crate) model: Arc<str>,
    pub(crate) action: Action,
    pub(crate) doc: Document,
    pub(crate) options: MappingOptions,
}

/// Creates [`BatchItem`]s for one model without executing anything.
#[derive(Debug, Clone)]
pub struct ModelBatchMapper {
    model: Arc<str>,
}

impl ModelBatchMapper {
    pub(crate) fn new(model: Arc<str>) -> Self {
        Self { model }
    }

    pub fn insert(&self, doc: Document, options: MappingOptions) -> BatchItem {
        self.item(Action::Insert, doc, options)
    }

    pub fn update(&self, doc: Document, options: MappingOptions) -> BatchItem {
        self.item(Action::Update, doc, options)
    }

    pub fn remove(&self, doc: Document, options: MappingOptions) -> BatchItem {
        self.item(Action::Remove, doc, options)
    }

    fn item(&self, action: Action, doc: Document, options: MappingOptions) -> BatchItem {
        BatchItem {
            model: self.model.clone(),
            action,
            doc,
            options,
        }
    }
}

impl BatchItem {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }
}
