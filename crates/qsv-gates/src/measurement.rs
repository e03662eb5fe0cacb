//! Projective Z-basis measurement.

use num_complex::Complex64;
use rand::Rng;
use tracing::debug;

use qsv_ir::{Gate, GateArgs, GateFactory, HelperContext, IrResult, StateVector, Target};

/// Measures each target qubit in turn, collapsing and renormalising the
/// state and writing the result to the qubit's classical register slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Measurement;

impl Measurement {
    fn measure_one(ctx: &mut HelperContext, state: &mut StateVector, qubit: usize) {
        let mask = 1 << qubit;
        let (p0, p1) = ctx
            .indices()
            .iter()
            .fold((0.0_f64, 0.0_f64), |(p0, p1), &i| {
                let p = state[i].norm_sqr();
                if i & mask == 0 { (p0 + p, p1) } else { (p0, p1 + p) }
            });

        let r: f64 = ctx.rng().r#gen();
        let bit = u8::from(r * (p0 + p1) >= p0);
        let kept = if bit == 0 { p0 } else { p1 };
        let norm = kept.sqrt();
        debug!("Measured qubit {} -> {} (p0 = {:.6})", qubit, bit, p0);

        for &i in ctx.indices() {
            let is_one = u8::from(i & mask != 0);
            if is_one == bit && norm > 0.0 {
                state[i] /= norm;
            } else {
                state[i] = Complex64::new(0.0, 0.0);
            }
        }
        ctx.set_creg(qubit, bit);
    }
}

impl Gate for Measurement {
    fn name(&self) -> &str {
        "measure"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        mut state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        for qubit in target.qubits(ctx.n_qubits())? {
            Self::measure_one(ctx, &mut state, qubit);
        }
        Ok(state)
    }
}

impl GateFactory for Measurement {
    fn from_args(_args: &GateArgs) -> IrResult<Self> {
        Ok(Measurement)
    }
}
