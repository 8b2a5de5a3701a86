use crate::config::{ColumnMap, SourceConfig};
use crate::csv::load_csv;
use crate::error::{QuizError, Result};
use crate::models::Dataset;
use std::collections::HashMap;
use std::sync::Arc;

/// Named plant lists, each loaded at most once.
#[derive(Debug)]
pub struct Catalog {
    sources: Vec<SourceConfig>,
    default_columns: ColumnMap,
    cache: HashMap<String, Arc<Dataset>>,
}

impl Catalog {
    pub fn new(sources: Vec<SourceConfig>, default_columns: ColumnMap) -> Self {
        Self {
            sources,
            default_columns,
            cache: HashMap::new(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|source| source.name == name)
    }

    pub fn load(&mut self, name: &str) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.cache.get(name) {
            tracing::debug!(source = name, "plant list served from cache");
            return Ok(Arc::clone(dataset));
        }

        let source = self
            .sources
            .iter()
            .find(|source| source.name == name)
            .ok_or_else(|| QuizError::UnknownSource(name.to_string()))?;
        let columns = source.columns.as_ref().unwrap_or(&self.default_columns);

        let dataset = Arc::new(load_csv(
            &source.path,
            &source.name,
            columns,
            source.require_extras,
        )?);
        self.cache.insert(name.to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }
}
