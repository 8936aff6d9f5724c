//! In-memory template store seeded with the built-in templates.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use drvgen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Artifact, DomainValidator as validator, Template},
    error::DrvgenResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store.
#[derive(Clone, Default)]
pub struct BuiltinTemplateStore {
    inner: Arc<RwLock<HashMap<Artifact, Template>>>,
}

impl BuiltinTemplateStore {
    /// Create a new empty store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a store with the built-in templates loaded.
    pub fn new() -> DrvgenResult<Self> {
        let store = Self::empty();
        for template in builtin_templates::all_templates()? {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Insert or replace the template for its artifact.
    pub fn insert(&self, template: Template) -> DrvgenResult<()> {
        validator::validate_template(&template)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(template.artifact(), template);
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for BuiltinTemplateStore {
    fn get(&self, artifact: Artifact) -> DrvgenResult<Template> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .get(&artifact)
            .cloned()
            .ok_or_else(|| ApplicationError::TemplateMissing { artifact }.into())
    }
}
