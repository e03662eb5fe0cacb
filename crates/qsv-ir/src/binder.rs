//! Fluent construction surface: `name(args)[target]`.
//!
//! [`Circuit::gate`] and [`Circuit::attribute`] hand out binders borrowing the
//! circuit mutably. A binder collects call arguments with `with_args` and is
//! consumed by `bind`, which records the operation and returns the circuit so
//! the next gate can be chained:
//!
//! ```rust
//! # use qsv_ir::{Circuit, GateArgs, IrResult};
//! # fn build(circuit: &mut Circuit) -> IrResult<()> {
//! circuit
//!     .gate("h")?.bind(0)?
//!     .gate("cx")?.bind((0, 1))?
//!     .gate("rz")?.with_args(GateArgs::new().arg(0.5)).bind(1)?;
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::args::GateArgs;
use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::GateConstructor;
use crate::macros::{CallPolicy, MacroDef};
use crate::operation::OperationRecord;
use crate::target::Target;

/// Tag a context-free target error with the gate it was bound for.
fn with_gate_context(err: IrError, name: &str) -> IrError {
    match err {
        IrError::InvalidTarget { gate: None, reason } => IrError::InvalidTarget {
            gate: Some(name.to_string()),
            reason,
        },
        other => other,
    }
}

/// Qubit count a target requires (`max index + 1`).
pub(crate) fn required_qubits(target: &Target, name: &str) -> IrResult<usize> {
    let max = target.max_index().map_err(|e| with_gate_context(e, name))?;
    max.checked_add(1)
        .ok_or_else(|| IrError::invalid_target(name, format!("qubit index {max} is too large")))
}

/// Pending gate application scoped to one circuit and one constructor.
#[must_use = "a gate binder does nothing until `bind` is called"]
pub struct GateBinder<'c> {
    circuit: &'c mut Circuit,
    name: String,
    constructor: GateConstructor,
    args: GateArgs,
}

impl<'c> GateBinder<'c> {
    pub(crate) fn new(circuit: &'c mut Circuit, name: String, constructor: GateConstructor) -> Self {
        Self {
            circuit,
            name,
            constructor,
            args: GateArgs::default(),
        }
    }

    /// Gate name being bound.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store constructor arguments. A later call replaces earlier ones.
    pub fn with_args(mut self, args: GateArgs) -> Self {
        self.args = args;
        self
    }

    /// Record the operation on `target` and return the owning circuit.
    pub fn bind(self, target: impl Into<Target>) -> IrResult<&'c mut Circuit> {
        let target = target.into();
        let needed = required_qubits(&target, &self.name)?;
        debug!("Binding {}[{}]", self.name, target);

        let record = OperationRecord::new(self.name, self.constructor, target, self.args);
        self.circuit.push_record(record, needed);
        Ok(self.circuit)
    }
}

/// Pending macro expansion.
#[must_use = "a macro binder does nothing until `bind` is called"]
pub struct MacroBinder<'c> {
    circuit: &'c mut Circuit,
    def: MacroDef,
    args: GateArgs,
    called: bool,
}

impl<'c> MacroBinder<'c> {
    pub(crate) fn new(circuit: &'c mut Circuit, def: MacroDef) -> Self {
        Self {
            circuit,
            def,
            args: GateArgs::default(),
            called: false,
        }
    }

    /// Macro name being bound.
    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// Store call arguments, subject to the macro's [`CallPolicy`].
    pub fn with_args(mut self, args: GateArgs) -> IrResult<Self> {
        if self.def.policy() == CallPolicy::Never {
            return Err(IrError::MacroNotCallable(self.def.name().to_string()));
        }
        if self.called {
            return Err(IrError::MacroAlreadyCalled(self.def.name().to_string()));
        }
        self.args = args;
        self.called = true;
        Ok(self)
    }

    /// Expand the macro on `target` and return the owning circuit.
    pub fn bind(self, target: impl Into<Target>) -> IrResult<&'c mut Circuit> {
        if self.def.policy() == CallPolicy::Must && !self.called {
            return Err(IrError::MacroCallRequired(self.def.name().to_string()));
        }
        let target = target.into();
        debug!("Expanding macro {}[{}]", self.def.name(), target);
        self.def.expand(self.circuit, &target, &self.args)?;
        Ok(self.circuit)
    }
}

/// Result of an attribute-style lookup: a gate or a macro.
#[must_use = "an attribute does nothing until `bind` is called"]
pub enum Attribute<'c> {
    /// Gate from the catalogue.
    Gate(GateBinder<'c>),
    /// Macro from the attached registry.
    Macro(MacroBinder<'c>),
}

impl<'c> Attribute<'c> {
    /// Name the attribute resolved under.
    pub fn name(&self) -> &str {
        match self {
            Attribute::Gate(b) => b.name(),
            Attribute::Macro(b) => b.name(),
        }
    }

    /// Store call arguments.
    pub fn with_args(self, args: GateArgs) -> IrResult<Self> {
        match self {
            Attribute::Gate(b) => Ok(Attribute::Gate(b.with_args(args))),
            Attribute::Macro(b) => Ok(Attribute::Macro(b.with_args(args)?)),
        }
    }

    /// Bind to `target`, returning the owning circuit.
    pub fn bind(self, target: impl Into<Target>) -> IrResult<&'c mut Circuit> {
        match self {
            Attribute::Gate(b) => b.bind(target),
            Attribute::Macro(b) => b.bind(target),
        }
    }
}
