//! Parametrised phase rotation.

use num_complex::Complex64;
use qsv_ir::{Gate, GateArgs, GateFactory, HelperContext, IrResult, StateVector, Target};

/// Phase rotation `diag(1, e^{iθ})`, registered as `rz`, `phase` and `u1`.
///
/// θ is taken from the `theta` keyword or the first positional argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RZGate {
    theta: f64,
}

impl RZGate {
    /// Rotation by `theta` radians.
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Rotation angle.
    pub fn theta(&self) -> f64 {
        self.theta
    }
}

impl Gate for RZGate {
    fn name(&self) -> &str {
        "rz"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        let phase = Complex64::from_polar(1.0, self.theta);
        for qubit in target.qubits(ctx.n_qubits())? {
            let mask = 1 << qubit;
            for &i in ctx.indices() {
                if i & mask != 0 {
                    state[i] *= phase;
                }
            }
        }
        Ok(state)
    }
}

impl GateFactory for RZGate {
    fn from_args(args: &GateArgs) -> IrResult<Self> {
        Ok(Self::new(args.require_f64("rz", "theta", 0)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{approx_eq, ctx, state_of};
    use qsv_ir::IrError;
    use std::f64::consts::PI;

    #[test]
    fn test_from_args() {
        assert_eq!(RZGate::from_args(&GateArgs::new().arg(0.5)).unwrap().theta(), 0.5);
        assert_eq!(
            RZGate::from_args(&GateArgs::new().kwarg("theta", 1.5)).unwrap().theta(),
            1.5
        );
        assert!(matches!(
            RZGate::from_args(&GateArgs::new()),
            Err(IrError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_phase_only_touches_one_component() {
        let mut c = ctx(1);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let plus = vec![Complex64::new(s, 0.0), Complex64::new(s, 0.0)];
        let state = RZGate::new(PI / 2.0).apply(&mut c, plus, &Target::from(0)).unwrap();
        assert!(approx_eq(
            &state,
            &[Complex64::new(s, 0.0), Complex64::new(0.0, s)]
        ));
    }

    #[test]
    fn test_pi_equals_z() {
        let mut c = ctx(1);
        let one = state_of(1, &[(1, Complex64::new(1.0, 0.0))]);
        let state = RZGate::new(PI).apply(&mut c, one, &Target::from(0)).unwrap();
        assert!(approx_eq(&state, &state_of(1, &[(1, Complex64::new(-1.0, 0.0))])));
    }
}
