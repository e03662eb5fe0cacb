//! Inspection-only gate.

use tracing::info;

use qsv_ir::{
    ArgValue, Gate, GateArgs, GateFactory, HelperContext, IrError, IrResult, StateVector, Target,
};

/// Logs the classical register and every non-zero amplitude, labelled by
/// the bits of the target qubits, at `info` level under the `qsv::dbg`
/// target. Never changes the state.
///
/// An optional label may be given as the `label` keyword or the first
/// positional argument: `dbg("after h")[:]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugDisplay {
    label: Option<String>,
}

impl DebugDisplay {
    /// Display without a label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Display tagged with `label`.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    /// The label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Gate for DebugDisplay {
    fn name(&self) -> &str {
        "dbg"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        let qubits = target.qubits(ctx.n_qubits())?;
        let label = self.label.as_deref().unwrap_or("dbg");
        info!(target: "qsv::dbg", "{}: cregs = {:?}, qubits = {:?}", label, ctx.cregs(), qubits);
        for (i, amp) in state.iter().enumerate() {
            if amp.norm_sqr() > 0.0 {
                let bits: String = qubits
                    .iter()
                    .map(|&q| if i & (1 << q) == 0 { '0' } else { '1' })
                    .collect();
                info!(target: "qsv::dbg", "  |{}⟩ [{}] {:+.6} {:+.6}i", bits, i, amp.re, amp.im);
            }
        }
        Ok(state)
    }
}

impl GateFactory for DebugDisplay {
    fn from_args(args: &GateArgs) -> IrResult<Self> {
        match args.get("label", 0) {
            None => Ok(Self::new()),
            Some(ArgValue::Str(label)) => Ok(Self::labelled(label.clone())),
            Some(other) => Err(IrError::invalid_argument(
                "dbg",
                format!("label must be a string, got {other}"),
            )),
        }
    }
}
