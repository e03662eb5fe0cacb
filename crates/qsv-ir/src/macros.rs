//! Named circuit fragments.
//!
//! A macro is a function that appends operations to a circuit when bound to a
//! target, e.g. a `bell` macro expanding to `h` then `cx`. Macros live in a
//! [`MacroRegistry`] that is attached to circuits explicitly with
//! [`Circuit::with_macros`](crate::Circuit::with_macros); there is no global
//! table.
//!
//! ```rust
//! use std::sync::Arc;
//! use qsv_ir::{CallPolicy, Circuit, GateCatalogue, MacroRegistry};
//!
//! let mut macros = MacroRegistry::new();
//! macros
//!     .register("noop", CallPolicy::Never, |_circuit, _target, _args| Ok(()))
//!     .unwrap();
//!
//! let mut circuit = Circuit::new(GateCatalogue::new()).with_macros(Arc::new(macros));
//! circuit.attribute("noop").unwrap().bind(0).unwrap();
//! assert!(circuit.ops().is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::args::GateArgs;
use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::target::Target;

/// Circuit methods a macro may not shadow.
pub const RESERVED_NAMES: &[&str] = &[
    "attribute",
    "copy",
    "gate",
    "last_result",
    "n_qubits",
    "ops",
    "run",
    "run_history",
    "sample",
];

/// Whether a macro accepts call arguments before being bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallPolicy {
    /// Arguments are rejected.
    #[default]
    Never,
    /// A call is required before binding.
    Must,
    /// A call is allowed but not required.
    Optional,
}

/// Expansion function of a macro.
pub type MacroFn = Arc<dyn Fn(&mut Circuit, &Target, &GateArgs) -> IrResult<()> + Send + Sync>;

/// A registered macro.
#[derive(Clone)]
pub struct MacroDef {
    name: String,
    policy: CallPolicy,
    func: MacroFn,
}

impl MacroDef {
    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call policy.
    pub fn policy(&self) -> CallPolicy {
        self.policy
    }

    /// Expand into `circuit`.
    pub fn expand(&self, circuit: &mut Circuit, target: &Target, args: &GateArgs) -> IrResult<()> {
        (self.func)(circuit, target, args)
    }
}

impl fmt::Debug for MacroDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroDef")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Table of macros keyed by name.
#[derive(Clone, Default)]
pub struct MacroRegistry {
    macros: FxHashMap<String, MacroDef>,
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl MacroRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a macro; fails if the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        policy: CallPolicy,
        func: impl Fn(&mut Circuit, &Target, &GateArgs) -> IrResult<()> + Send + Sync + 'static,
    ) -> IrResult<&mut Self> {
        self.register_with(name, policy, func, false)
    }

    /// Register a macro, optionally replacing an existing one.
    pub fn register_with(
        &mut self,
        name: impl Into<String>,
        policy: CallPolicy,
        func: impl Fn(&mut Circuit, &Target, &GateArgs) -> IrResult<()> + Send + Sync + 'static,
        allow_overwrite: bool,
    ) -> IrResult<&mut Self> {
        let name = name.into();
        if !is_identifier(&name) || RESERVED_NAMES.contains(&name.as_str()) {
            return Err(IrError::InvalidMacroName(name));
        }
        if !allow_overwrite && self.macros.contains_key(&name) {
            return Err(IrError::MacroAlreadyRegistered(name));
        }
        debug!("Registering macro: {} ({:?})", name, policy);
        self.macros.insert(
            name.clone(),
            MacroDef {
                name,
                policy,
                func: Arc::new(func),
            },
        );
        Ok(self)
    }

    /// Look a macro up by name.
    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.macros.get(name)
    }

    /// Remove a macro. Returns whether it was present.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.macros.remove(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("macros", &self.names())
            .finish()
    }
}
