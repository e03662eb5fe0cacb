//! Property-based tests for targets and the qubit-count bound.

use proptest::prelude::*;
use qsv_ir::{
    Circuit, Gate, GateCatalogue, HelperContext, IrResult, StateVector, Target, zero_state,
};

/// Leaves the state untouched.
#[derive(Debug)]
struct Nop;

impl Gate for Nop {
    fn name(&self) -> &str {
        "nop"
    }

    fn apply(
        &self,
        ctx: &mut HelperContext,
        state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector> {
        target.qubits(ctx.n_qubits())?;
        Ok(state)
    }
}

fn nop_circuit() -> Circuit {
    let mut catalogue = GateCatalogue::new();
    catalogue.register_constructor("nop", |_| Ok(Box::new(Nop) as Box<dyn Gate>));
    Circuit::new(catalogue)
}

/// Targets with indices below 8, nested up to two levels.
fn arb_target() -> impl Strategy<Value = Target> {
    let leaf = prop_oneof![
        (0_i64..8).prop_map(Target::Index),
        (0_i64..7, 1_i64..8)
            .prop_filter("non-empty slice", |(s, e)| s < e)
            .prop_map(|(start, end)| Target::Slice {
                start,
                end: Some(end)
            }),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(Target::Tuple)
    })
}

proptest! {
    /// The maximum index of a tuple is the maximum over its items.
    #[test]
    fn tuple_max_is_max_of_items(items in prop::collection::vec(arb_target(), 1..5)) {
        let expected = items.iter().map(|t| t.max_index().unwrap()).max().unwrap();
        prop_assert_eq!(Target::Tuple(items).max_index().unwrap(), expected);
    }

    /// Every flattened qubit is within the maximum index.
    #[test]
    fn flattened_qubits_are_bounded(target in arb_target()) {
        let max = target.max_index().unwrap();
        let qubits = target.qubits(max + 1).unwrap();
        prop_assert!(qubits.iter().all(|&q| q <= max));
        prop_assert!(qubits.contains(&max));
    }

    /// Binding never shrinks the register and always covers the target.
    #[test]
    fn qubit_count_is_monotonic(
        start in 0_usize..4,
        targets in prop::collection::vec(arb_target(), 1..12),
    ) {
        let mut circuit = nop_circuit().with_qubits(start);
        let mut expected = start;
        for target in targets {
            let needed = target.max_index().unwrap() + 1;
            let before = circuit.n_qubits();
            circuit.gate("nop").unwrap().bind(target).unwrap();
            expected = expected.max(needed);
            prop_assert!(circuit.n_qubits() >= before);
            prop_assert_eq!(circuit.n_qubits(), expected);
        }
        prop_assert_eq!(circuit.run().unwrap(), zero_state(expected));
    }

    /// Negative indices are rejected wherever they appear.
    #[test]
    fn negative_indices_are_rejected(index in i64::MIN..0, position in 0_usize..3) {
        let mut items = vec![Target::Index(0), Target::Index(1), Target::Index(2)];
        items[position] = Target::Index(index);
        prop_assert!(Target::Tuple(items).max_index().is_err());
    }
}
