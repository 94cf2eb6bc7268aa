//! Name-keyed registry of lazily loaded graphs.
//!
//! A registry stores one [`GraphLoader`] per name. Nothing is loaded at
//! registration time; [`Registry::get`] runs the loader on every call. No
//! result is memoized: loaders own their caching (the file loaders read a
//! local cache directory), so two lookups of the same name return
//! independent values.

use std::collections::BTreeMap;
use std::fmt;

use super::graph::GraphData;
use crate::error::{DataError, DataResult};

/// Produces a graph on demand.
pub trait GraphLoader: Send + Sync {
    fn load(&self) -> DataResult<GraphData>;
}

impl<F> GraphLoader for F
where
    F: Fn() -> DataResult<GraphData> + Send + Sync,
{
    fn load(&self) -> DataResult<GraphData> {
        self()
    }
}

/// Named collection of graph loaders.
pub struct Registry {
    name: String,
    loaders: BTreeMap<String, Box<dyn GraphLoader>>,
}

impl Registry {
    /// Empty registry; `name` appears in error messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loaders: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `loader` under `name`.
    ///
    /// # Errors
    ///
    /// [`DataError::DuplicateKey`] if `name` is already registered; the
    /// existing loader is kept.
    pub fn register<L>(&mut self, name: impl Into<String>, loader: L) -> DataResult<()>
    where
        L: GraphLoader + 'static,
    {
        let name = name.into();
        if self.loaders.contains_key(&name) {
            return Err(DataError::DuplicateKey {
                registry: self.name.clone(),
                name,
            });
        }
        tracing::debug!(registry = %self.name, dataset = %name, "registered dataset");
        self.loaders.insert(name, Box::new(loader));
        Ok(())
    }

    /// Register a closure under `name`. See [`Registry::register`].
    pub fn register_fn<F>(&mut self, name: impl Into<String>, loader: F) -> DataResult<()>
    where
        F: Fn() -> DataResult<GraphData> + Send + Sync + 'static,
    {
        self.register(name, loader)
    }

    /// Run the loader registered under `name`.
    pub fn get(&self, name: &str) -> DataResult<GraphData> {
        let loader = self.loaders.get(name).ok_or_else(|| DataError::UnknownKey {
            registry: self.name.clone(),
            name: name.to_string(),
        })?;
        tracing::info!(registry = %self.name, dataset = name, "loading dataset");
        let graph = loader.load()?;
        graph.validate()?;
        Ok(graph)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.loaders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registry({})", self.name)
    }
}
