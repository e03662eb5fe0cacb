//! Two-qubit controlled gates.
//!
//! The target is a `(control, target)` tuple. Either side may select several
//! qubits: equal-length sides are paired element-wise and a single qubit is
//! broadcast, so `cx[0, 1:4]` fans out from qubit 0.

use qsv_ir::{Gate, GateArgs, GateFactory, HelperContext, IrError, IrResult, StateVector, Target};

fn pairs(gate: &str, ctx: &HelperContext, target: &Target) -> IrResult<Vec<(usize, usize)>> {
    target.qubit_pairs(ctx.n_qubits()).map_err(|e| match e {
        IrError::InvalidTarget { gate: None, reason } => IrError::invalid_target(gate, reason),
        other => other,
    })
}

/// Controlled-X (CNOT).
#[derive(Debug, Clone, Copy, Default)]
pub struct CXGate;

impl Gate for CXGate {
    fn name(&self) -> &str {
        "cx"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        for (control, tgt) in pairs(self.name(), ctx, target)? {
            let ctrl_mask = 1 << control;
            let tgt_mask = 1 << tgt;
            for &i in ctx.indices() {
                if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                    state.swap(i, i | tgt_mask);
                }
            }
        }
        Ok(state)
    }
}

impl GateFactory for CXGate {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(CXGate)
    }
}

/// Controlled-Z.
#[derive(Debug, Clone, Copy, Default)]
pub struct CZGate;

impl Gate for CZGate {
    fn name(&self) -> &str {
        "cz"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        for (control, tgt) in pairs(self.name(), ctx, target)? {
            let mask = (1 << control) | (1 << tgt);
            for &i in ctx.indices() {
                if i & mask == mask {
                    state[i] = -state[i];
                }
            }
        }
        Ok(state)
    }
}

impl GateFactory for CZGate {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(CZGate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx_eq, ctx, state_of};
    use num_complex::Complex64;

    fn one() -> Complex64 {
        Complex64::new(1.0, 0.0)
    }

    #[test]
    fn test_cx_truth_table() {
        // (input basis index, expected output) with control q0, target q1
        for (input, expected) in [(0, 0), (1, 3), (2, 2), (3, 1)] {
            let mut c = ctx(2);
            let state = CXGate
                .apply(&mut c, state_of(2, &[(input, one())]), &Target::from((0, 1)))
                .unwrap();
            assert!(
                approx_eq(&state, &state_of(2, &[(expected, one())])),
                "cx on |{input:02b}⟩"
            );
        }
    }

    #[test]
    fn test_cx_broadcast_control() {
        let mut c = ctx(3);
        let state = CXGate
            .apply(&mut c, state_of(3, &[(1, one())]), &Target::from((0, 1..3)))
            .unwrap();
        assert!(approx_eq(&state, &state_of(3, &[(7, one())])));
    }

    #[test]
    fn test_cz_only_marks_both_set() {
        let mut c = ctx(2);
        let s = 0.5;
        let input: Vec<Complex64> = vec![Complex64::new(s, 0.0); 4];
        let state = CZGate.apply(&mut c, input, &Target::from((1, 0))).unwrap();
        assert!(approx_eq(
            &state,
            &[
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(-s, 0.0),
            ]
        ));
    }

    #[test]
    fn test_single_index_is_rejected() {
        let mut c = ctx(2);
        let err = CXGate
            .apply(&mut c, state_of(2, &[(0, one())]), &Target::from(0))
            .unwrap_err();
        assert!(matches!(err, IrError::InvalidTarget { gate: Some(ref g), .. } if g == "cx"));
    }
}
