//! Fixed single-qubit gates: I, X, Z, H.
//!
//! Each gate applies independently to every qubit its target selects, so
//! `x[0, 2]` and `h[:]` act on several qubits at once.

use qsv_ir::{Gate, GateArgs, GateFactory, HelperContext, IrResult, StateVector, Target};

/// Identity gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct IGate;

impl Gate for IGate {
    fn name(&self) -> &str {
        "i"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        // Still validate the target so `i[9]` on a small run is reported.
        target.qubits(ctx.n_qubits())?;
        Ok(state)
    }
}

impl GateFactory for IGate {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(IGate)
    }
}

/// Pauli-X (bit flip).
#[derive(Debug, Clone, Copy, Default)]
pub struct XGate;

impl Gate for XGate {
    fn name(&self) -> &str {
        "x"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        for qubit in target.qubits(ctx.n_qubits())? {
            let mask = 1 << qubit;
            for &i in ctx.indices() {
                if i & mask == 0 {
                    state.swap(i, i | mask);
                }
            }
        }
        Ok(state)
    }
}

impl GateFactory for XGate {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(XGate)
    }
}

/// Pauli-Z (phase flip).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZGate;

impl Gate for ZGate {
    fn name(&self) -> &str {
        "z"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        for qubit in target.qubits(ctx.n_qubits())? {
            let mask = 1 << qubit;
            for &i in ctx.indices() {
                if i & mask != 0 {
                    state[i] = -state[i];
                }
            }
        }
        Ok(state)
    }
}

impl GateFactory for ZGate {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(ZGate)
    }
}

/// Hadamard gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HGate;

impl Gate for HGate {
    fn name(&self) -> &str {
        "h"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for qubit in target.qubits(ctx.n_qubits())? {
            let mask = 1 << qubit;
            for &i in ctx.indices() {
                if i & mask == 0 {
                    let j = i | mask;
                    let a = state[i];
                    let b = state[j];
                    state[i] = sqrt2_inv * (a + b);
                    state[j] = sqrt2_inv * (a - b);
                }
            }
        }
        Ok(state)
    }
}

impl GateFactory for HGate {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(HGate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx_eq, ctx, state_of};
    use num_complex::Complex64;
    use qsv_ir::zero_state;

    #[test]
    fn test_x_flips_every_target() {
        let mut c = ctx(3);
        let state = XGate.apply(&mut c, zero_state(3), &Target::from((0, 2))).unwrap();
        // |101⟩ = index 5
        assert!(approx_eq(&state, &state_of(3, &[(5, Complex64::new(1.0, 0.0))])));
    }

    #[test]
    fn test_z_on_one() {
        let mut c = ctx(1);
        let one = state_of(1, &[(1, Complex64::new(1.0, 0.0))]);
        let state = ZGate.apply(&mut c, one, &Target::from(0)).unwrap();
        assert!(approx_eq(&state, &state_of(1, &[(1, Complex64::new(-1.0, 0.0))])));
    }

    #[test]
    fn test_hadamard() {
        let mut c = ctx(1);
        let state = HGate.apply(&mut c, zero_state(1), &Target::from(0)).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(
            &state,
            &[Complex64::new(s, 0.0), Complex64::new(s, 0.0)]
        ));
    }

    #[test]
    fn test_hadamard_all_is_uniform() {
        let mut c = ctx(3);
        let state = HGate.apply(&mut c, zero_state(3), &Target::all()).unwrap();
        let amp = 1.0 / 8.0_f64.sqrt();
        assert!(state.iter().all(|a| (a.re - amp).abs() < 1e-12 && a.im.abs() < 1e-12));
    }

    #[test]
    fn test_identity_checks_range() {
        let mut c = ctx(1);
        assert!(IGate.apply(&mut c, zero_state(1), &Target::from(0)).is_ok());
        assert!(IGate.apply(&mut c, zero_state(1), &Target::from(3)).is_err());
    }
}
