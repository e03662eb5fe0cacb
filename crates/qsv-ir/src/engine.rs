//! State-vector evolution loop.

use std::time::Instant;

use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use crate::config::{MAX_SUPPORTED_QUBITS, SimulatorConfig};
use crate::error::{IrError, IrResult};
use crate::gate::{HelperContext, StateVector};
use crate::operation::{ClassicalOutcome, OperationRecord};

/// `|0…0⟩` on `n_qubits` qubits.
///
/// # Panics
///
/// If `n_qubits` exceeds [`MAX_SUPPORTED_QUBITS`]; [`Circuit::run`] checks
/// the width before calling this.
///
/// [`Circuit::run`]: crate::Circuit::run
pub fn zero_state(n_qubits: usize) -> StateVector {
    let mut state = vec![Complex64::new(0.0, 0.0); 1 << n_qubits];
    state[0] = Complex64::new(1.0, 0.0);
    state
}

/// Run `ops` in order against a fresh `|0…0⟩` state.
///
/// `run_index` decorrelates seeded runs of the same circuit. Nothing is
/// recorded here; the caller appends the outcome only on success.
#[instrument(skip(ops, config), fields(n_ops = ops.len()))]
pub(crate) fn evolve(
    ops: &[OperationRecord],
    n_qubits: usize,
    config: &SimulatorConfig,
    run_index: u64,
) -> IrResult<(StateVector, ClassicalOutcome)> {
    let max_qubits = config.effective_max_qubits();
    let addressable = u32::try_from(n_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .is_some();
    if n_qubits > max_qubits || !addressable {
        return Err(IrError::CircuitTooLarge {
            n_qubits,
            max_qubits,
        });
    }

    let start = Instant::now();
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_index)),
        None => StdRng::from_entropy(),
    };
    let mut ctx = HelperContext::new(n_qubits, rng);
    let mut state = zero_state(n_qubits);
    let expected = state.len();

    for op in ops {
        let gate = op.instantiate()?;
        state = gate.apply(&mut ctx, state, op.target())?;
        if state.len() != expected {
            return Err(IrError::StateLengthMismatch {
                gate: op.name().to_string(),
                expected,
                got: state.len(),
            });
        }
    }

    debug!("Evolution completed in {:?}", start.elapsed());
    Ok((state, ClassicalOutcome::new(ctx.into_cregs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_state() {
        for n in 0..5 {
            let state = zero_state(n);
            assert_eq!(state.len(), 1 << n);
            assert_eq!(state[0], Complex64::new(1.0, 0.0));
            assert!(state[1..].iter().all(|a| a.norm_sqr() == 0.0));
        }
    }

    #[test]
    fn test_evolve_rejects_oversized_register() {
        let config = SimulatorConfig::new().with_max_qubits(3);
        let err = evolve(&[], 4, &config, 0).unwrap_err();
        assert!(matches!(
            err,
            IrError::CircuitTooLarge {
                n_qubits: 4,
                max_qubits: 3
            }
        ));
    }

    #[test]
    fn test_evolve_rejects_unaddressable_register() {
        let mut config = SimulatorConfig::new();
        config.max_qubits = usize::MAX;
        for n in [MAX_SUPPORTED_QUBITS + 1, 64, 100] {
            let err = evolve(&[], n, &config, 0).unwrap_err();
            assert!(matches!(
                err,
                IrError::CircuitTooLarge { max_qubits, .. } if max_qubits == MAX_SUPPORTED_QUBITS
            ));
        }
    }

    #[test]
    fn test_evolve_empty_register() {
        let (state, outcome) = evolve(&[], 2, &SimulatorConfig::new(), 0).unwrap();
        assert_eq!(state, zero_state(2));
        assert_eq!(outcome.bits(), &[0, 0]);
    }
}
