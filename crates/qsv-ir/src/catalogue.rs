//! Gate catalogue: name → constructor.
//!
//! The [`GateCatalogue`] is the single place where gate names are resolved.
//! Circuits hold it behind an `Arc`, so copies and concurrent readers share
//! one table.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::args::GateArgs;
use crate::error::IrResult;
use crate::gate::{Gate, GateConstructor, GateFactory, constructor_of};

/// Mapping from gate names to constructors.
#[derive(Clone, Default)]
pub struct GateCatalogue {
    gates: FxHashMap<String, GateConstructor>,
}

impl GateCatalogue {
    /// Create a new empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gate type under `name`.
    pub fn register<G: GateFactory>(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        debug!("Registering gate: {}", name);
        self.gates.insert(name, constructor_of::<G>());
        self
    }

    /// Register a gate with a custom constructor.
    pub fn register_constructor(
        &mut self,
        name: impl Into<String>,
        constructor: impl Fn(&GateArgs) -> IrResult<Box<dyn Gate>> + Send + Sync + 'static,
    ) -> &mut Self {
        let name = name.into();
        debug!("Registering gate constructor: {}", name);
        self.gates.insert(name, Arc::new(constructor));
        self
    }

    /// Make `alias` resolve to the same constructor as `existing`.
    ///
    /// Returns `false` (and registers nothing) if `existing` is unknown.
    pub fn alias(&mut self, alias: impl Into<String>, existing: &str) -> bool {
        let Some(constructor) = self.gates.get(existing).cloned() else {
            return false;
        };
        let alias = alias.into();
        debug!("Registering gate alias: {} -> {}", alias, existing);
        self.gates.insert(alias, constructor);
        true
    }

    /// Remove a gate name. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.gates.remove(name).is_some()
    }

    /// Look a gate up by name.
    pub fn get(&self, name: &str) -> Option<&GateConstructor> {
        self.gates.get(name)
    }

    /// Check whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.gates.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.gates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names (aliases included).
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl fmt::Debug for GateCatalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateCatalogue")
            .field("gates", &self.names())
            .finish()
    }
}
