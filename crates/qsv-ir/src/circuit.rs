//! The circuit: an ordered operation log plus run history.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::binder::{Attribute, GateBinder, MacroBinder};
use crate::catalogue::GateCatalogue;
use crate::config::SimulatorConfig;
use crate::engine;
use crate::error::{IrError, IrResult};
use crate::gate::StateVector;
use crate::macros::MacroRegistry;
use crate::operation::{ClassicalOutcome, Counts, OperationRecord};

/// A quantum circuit.
///
/// Operations are appended through [`gate`](Self::gate) or
/// [`attribute`](Self::attribute) and executed in insertion order by
/// [`run`](Self::run). The qubit count grows to cover every index an
/// operation references and never shrinks.
pub struct Circuit {
    /// Gate name resolution table.
    catalogue: Arc<GateCatalogue>,
    /// Optional macro table consulted after the catalogue.
    macros: Option<Arc<MacroRegistry>>,
    /// Operation log, shared copy-on-write with copies of this circuit.
    ops: Arc<Vec<OperationRecord>>,
    /// Number of qubits referenced so far.
    n_qubits: usize,
    /// One outcome per completed run.
    run_history: Vec<ClassicalOutcome>,
    /// Engine settings.
    config: SimulatorConfig,
}

impl Circuit {
    /// Create an empty circuit over `catalogue`.
    pub fn new(catalogue: GateCatalogue) -> Self {
        Self::with_shared_catalogue(Arc::new(catalogue))
    }

    /// Create an empty circuit over an already shared catalogue.
    pub fn with_shared_catalogue(catalogue: Arc<GateCatalogue>) -> Self {
        Self {
            catalogue,
            macros: None,
            ops: Arc::new(Vec::new()),
            n_qubits: 0,
            run_history: Vec::new(),
            config: SimulatorConfig::default(),
        }
    }

    /// Attach a macro registry.
    pub fn with_macros(mut self, macros: Arc<MacroRegistry>) -> Self {
        self.macros = Some(macros);
        self
    }

    /// Replace the engine configuration.
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Reserve at least `n_qubits` qubits without adding an operation.
    pub fn with_qubits(mut self, n_qubits: usize) -> Self {
        self.n_qubits = self.n_qubits.max(n_qubits);
        self
    }

    /// The gate catalogue.
    pub fn catalogue(&self) -> &Arc<GateCatalogue> {
        &self.catalogue
    }

    /// The attached macro registry, if any.
    pub fn macros(&self) -> Option<&Arc<MacroRegistry>> {
        self.macros.as_ref()
    }

    /// The engine configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Number of qubits referenced so far.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Recorded operations in execution order.
    pub fn ops(&self) -> &[OperationRecord] {
        &self.ops
    }

    /// Outcomes of all completed runs, oldest first.
    pub fn run_history(&self) -> &[ClassicalOutcome] {
        &self.run_history
    }

    /// Resolve a gate name against the catalogue.
    pub fn gate(&mut self, name: &str) -> IrResult<GateBinder<'_>> {
        let constructor = self
            .catalogue
            .get(name)
            .cloned()
            .ok_or_else(|| IrError::UnknownGate(name.to_string()))?;
        Ok(GateBinder::new(self, name.to_string(), constructor))
    }

    /// Attribute-style lookup: gates first, then macros.
    pub fn attribute(&mut self, name: &str) -> IrResult<Attribute<'_>> {
        if let Some(constructor) = self.catalogue.get(name).cloned() {
            return Ok(Attribute::Gate(GateBinder::new(
                self,
                name.to_string(),
                constructor,
            )));
        }
        let def = self
            .macros
            .as_ref()
            .and_then(|m| m.get(name))
            .cloned()
            .ok_or_else(|| IrError::UnknownAttribute(name.to_string()))?;
        Ok(Attribute::Macro(MacroBinder::new(self, def)))
    }

    pub(crate) fn push_record(&mut self, record: OperationRecord, needed_qubits: usize) {
        self.n_qubits = self.n_qubits.max(needed_qubits);
        Arc::make_mut(&mut self.ops).push(record);
    }

    /// Copy sharing the catalogue, macros, config and current operations.
    ///
    /// The operation log is copy-on-write: appending to either circuit
    /// afterwards does not affect the other. The copy starts with an empty
    /// run history.
    pub fn copy(&self) -> Circuit {
        Circuit {
            catalogue: Arc::clone(&self.catalogue),
            macros: self.macros.clone(),
            ops: Arc::clone(&self.ops),
            n_qubits: self.n_qubits,
            run_history: Vec::new(),
            config: self.config.clone(),
        }
    }

    /// Evolve `|0…0⟩` through every operation and return the final state.
    ///
    /// On success the classical register is appended to the run history; on
    /// failure the history is left untouched.
    #[instrument(skip(self), fields(n_qubits = self.n_qubits, n_ops = self.ops.len()))]
    pub fn run(&mut self) -> IrResult<StateVector> {
        let run_index = self.run_history.len() as u64;
        let (state, outcome) = engine::evolve(&self.ops, self.n_qubits, &self.config, run_index)?;
        debug!("Run {} finished with register {}", run_index, outcome);
        self.run_history.push(outcome);
        Ok(state)
    }

    /// Run `shots` times and count the classical outcomes.
    pub fn sample(&mut self, shots: u32) -> IrResult<Counts> {
        if shots == 0 {
            return Err(IrError::invalid_argument("sample", "shots must be at least 1"));
        }
        info!("Sampling {} shots on {} qubits", shots, self.n_qubits);
        let mut counts = Counts::new();
        for _ in 0..shots {
            self.run()?;
            if let Some(outcome) = self.run_history.last() {
                counts.record(outcome);
            }
        }
        Ok(counts)
    }

    /// Outcome of the most recent run.
    pub fn last_result(&self) -> IrResult<&ClassicalOutcome> {
        self.run_history.last().ok_or(IrError::NoRunYet)
    }
}

/// Renders the operation log in chain notation, e.g. `h[0].cx[0, 1]`.
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circuit")
            .field("n_qubits", &self.n_qubits)
            .field("ops", &self.ops)
            .field("runs", &self.run_history.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
