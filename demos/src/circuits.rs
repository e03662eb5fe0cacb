//! Circuit builders and macros shared by the demo binaries.

use qsv_ir::{
    ArgValue, CallPolicy, Circuit, IrError, IrResult, MacroRegistry, SimulatorConfig, Target,
};
use tracing::debug;

/// Bell pair on qubits 0 and 1, measured.
pub fn bell(config: SimulatorConfig) -> IrResult<Circuit> {
    let mut circuit = qsv_gates::circuit().with_config(config);
    circuit
        .gate("h")?
        .bind(0)?
        .gate("cx")?
        .bind((0, 1))?
        .gate("measure")?
        .bind(..)?;
    Ok(circuit)
}

/// Qubits selected by a macro target. Open slices run to the end of the
/// register as it stands, widened to cover the target itself.
fn macro_qubits(circuit: &Circuit, target: &Target) -> IrResult<Vec<usize>> {
    let width = circuit.n_qubits().max(target.max_index()? + 1);
    let qubits = target.qubits(width)?;
    debug!("Macro target {} resolved to {:?}", target, qubits);
    Ok(qubits)
}

/// Macros available to chain expressions in the demos.
///
/// - `bell[a, b]`: Hadamard on `a`, then CX from `a` to `b`.
/// - `ghz[q0, q1, …]` or `ghz[s:e]`: GHZ state over the listed qubits.
/// - `layer("g")[…]`: the single-qubit gate `g` on every target qubit. Must be
///   called with the gate name.
pub fn standard_macros() -> IrResult<MacroRegistry> {
    let mut macros = MacroRegistry::new();

    macros.register("bell", CallPolicy::Never, |circuit, target, _| {
        let qubits = macro_qubits(circuit, target)?;
        let [a, b] = qubits.as_slice() else {
            return Err(IrError::invalid_target(
                "bell",
                format!("expected 2 qubits, got {}", qubits.len()),
            ));
        };
        circuit.gate("h")?.bind(*a)?.gate("cx")?.bind((*a, *b))?;
        Ok(())
    })?;

    macros.register("ghz", CallPolicy::Never, |circuit, target, _| {
        let qubits = macro_qubits(circuit, target)?;
        let Some(&first) = qubits.first() else {
            return Err(IrError::invalid_target("ghz", "no qubits selected"));
        };
        circuit.gate("h")?.bind(first)?;
        for pair in qubits.windows(2) {
            circuit.gate("cx")?.bind((pair[0], pair[1]))?;
        }
        Ok(())
    })?;

    macros.register("layer", CallPolicy::Must, |circuit, target, args| {
        let gate = match args.get("gate", 0) {
            Some(ArgValue::Str(name)) => name.clone(),
            _ => {
                return Err(IrError::invalid_argument(
                    "layer",
                    "expected a gate name, e.g. layer(\"h\")",
                ));
            }
        };
        for qubit in macro_qubits(circuit, target)? {
            circuit.gate(&gate)?.bind(qubit)?;
        }
        Ok(())
    })?;

    Ok(macros)
}
