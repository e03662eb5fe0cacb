//! Gate-Chain Front-End for qsv
//!
//! Builds circuits from the same `name(args)[target]` notation a circuit
//! prints itself in, so a chain can be written by hand, logged, or stored and
//! replayed later.
//!
//! # Notation
//!
//! | Form | Meaning | Example |
//! |------|---------|---------|
//! | `name[i]` | gate on one qubit | `h[0]` |
//! | `name[a, b]` | gate on a composite target | `cx[0, 1]` |
//! | `name[s:e]`, `name[s:]`, `name[:]` | gate on a slice | `h[0:3]` |
//! | `name[(a, b), c]` | nested tuple | `cx[(0, 1), 2]` |
//! | `name(args)[…]` | call with arguments | `rz(pi / 2)[1]` |
//! | `name(k=v)[…]` | keyword argument | `rz(theta=0.5)[0]` |
//! | `seg.seg` | chaining | `h[0].cx[0, 1]` |
//! | `# …` | comment to end of line | |
//!
//! Argument expressions support `+ - * /`, unary minus, parentheses, integer
//! and float literals, `pi`, `true`, `false` and double-quoted strings with
//! `\"`, `\\`, `\n` and `\t` escapes. Nesting is capped at [`MAX_NESTING`]
//! levels. Float arguments must be finite: a circuit holding `inf` or `NaN`
//! prints a chain that does not parse back.
//!
//! # Example
//!
//! ```rust
//! use qsv_chain::apply;
//!
//! let mut circuit = qsv_gates::circuit();
//! apply(&mut circuit, "h[0].cx[0, 1].m[:]")?;
//! assert_eq!(circuit.n_qubits(), 2);
//! assert_eq!(circuit.to_string(), "h[0].cx[0, 1].m[:]");
//! # Ok::<(), qsv_chain::ChainError>(())
//! ```

pub mod ast;
mod error;
mod lexer;
mod parser;

use qsv_ir::Circuit;
use tracing::debug;

pub use ast::{Argument, BinOp, Chain, Expression, Segment};
pub use error::{ChainError, ChainResult};
pub use parser::{MAX_NESTING, parse};

/// Parse `source` and append every segment to `circuit`.
///
/// Syntax errors are reported before anything is appended. If a later
/// segment fails to resolve or bind, the segments before it stay recorded.
pub fn apply<'c>(circuit: &'c mut Circuit, source: &str) -> ChainResult<&'c mut Circuit> {
    let chain = parse(source)?;
    apply_chain(circuit, &chain)
}

/// Append the segments of an already parsed chain to `circuit`.
///
/// Each name resolves through [`Circuit::attribute`], so macros attached to
/// the circuit are available alongside catalogue gates.
pub fn apply_chain<'c>(circuit: &'c mut Circuit, chain: &Chain) -> ChainResult<&'c mut Circuit> {
    for segment in &chain.segments {
        debug!("Applying chain segment {}", segment);
        let calls = segment.evaluate_calls()?;
        let mut attribute = circuit.attribute(&segment.name)?;
        for args in calls {
            attribute = attribute.with_args(args)?;
        }
        attribute.bind(segment.target.clone())?;
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsv_ir::{GateArgs, IrError};

    #[test]
    fn test_apply_records_operations() {
        let mut circuit = qsv_gates::circuit();
        apply(&mut circuit, "h[0].rz(0.25)[1]").unwrap();
        assert_eq!(circuit.ops().len(), 2);
        assert_eq!(circuit.ops()[1].name(), "rz");
        assert_eq!(circuit.ops()[1].args(), &GateArgs::new().arg(0.25));
        assert_eq!(circuit.n_qubits(), 2);
    }

    #[test]
    fn test_unknown_name_is_circuit_error() {
        let mut circuit = qsv_gates::circuit();
        let err = apply(&mut circuit, "h[0].bogus[1]").unwrap_err();
        assert!(matches!(
            err,
            ChainError::Circuit(IrError::UnknownAttribute(ref name)) if name == "bogus"
        ));
        assert_eq!(circuit.ops().len(), 1);
    }

    #[test]
    fn test_syntax_error_appends_nothing() {
        let mut circuit = qsv_gates::circuit();
        assert!(apply(&mut circuit, "h[0].cx[0, 1").is_err());
        assert!(circuit.ops().is_empty());
    }

    #[test]
    fn test_last_call_wins_for_gates() {
        let mut circuit = qsv_gates::circuit();
        apply(&mut circuit, "rz(1)(2)[0]").unwrap();
        assert_eq!(circuit.ops()[0].args(), &GateArgs::new().arg(2));
    }
}
