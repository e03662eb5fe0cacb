//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or running a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate name not present in the circuit's catalogue.
    #[error("Unknown gate: '{0}'")]
    UnknownGate(String),

    /// Attribute-style lookup found neither a gate nor a macro.
    #[error("'circuit' object has no attribute or gate '{0}'")]
    UnknownAttribute(String),

    /// A result was requested before any run completed.
    #[error("The circuit has never been run")]
    NoRunYet,

    /// Target omitted, empty, malformed or out of range.
    #[error("Invalid target{}: {reason}", format_gate_context(.gate))]
    InvalidTarget {
        /// Optional gate name for context.
        gate: Option<String>,
        /// What is wrong with the target.
        reason: String,
    },

    /// Missing or ill-typed gate argument.
    #[error("Invalid argument (gate: {gate}): {reason}")]
    InvalidArgument {
        /// Name of the gate (or operation) receiving the argument.
        gate: String,
        /// What is wrong with the argument.
        reason: String,
    },

    /// The circuit needs more qubits than the simulator allows.
    #[error("Circuit has {n_qubits} qubits but the simulator only supports {max_qubits}")]
    CircuitTooLarge {
        /// Qubits required by the circuit.
        n_qubits: usize,
        /// Configured ceiling.
        max_qubits: usize,
    },

    /// A gate returned a state vector of the wrong length.
    #[error("Gate '{gate}' returned a state of length {got}, expected {expected}")]
    StateLengthMismatch {
        /// Name of the offending gate.
        gate: String,
        /// Expected length (2^n).
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Macro name is not an identifier or collides with a circuit method.
    #[error("Invalid macro name: '{0}'")]
    InvalidMacroName(String),

    /// Macro already registered and overwrite was not allowed.
    #[error("Macro '{0}' is already registered")]
    MacroAlreadyRegistered(String),

    /// Macro does not accept call arguments.
    #[error("Macro '{0}' is not callable")]
    MacroNotCallable(String),

    /// Macro binder was called twice.
    #[error("Macro '{0}' has already been called")]
    MacroAlreadyCalled(String),

    /// Macro must be called before it is bound to a target.
    #[error("Macro '{0}' must be called before binding a target")]
    MacroCallRequired(String),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IrError {
    /// Shorthand for an [`IrError::InvalidTarget`] tied to a gate.
    pub fn invalid_target(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        IrError::InvalidTarget {
            gate: Some(gate.into()),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`IrError::InvalidArgument`].
    pub fn invalid_argument(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        IrError::InvalidArgument {
            gate: gate.into(),
            reason: reason.into(),
        }
    }
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<String>) -> String {
    match gate {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attribute_names_the_attribute() {
        let err = IrError::UnknownAttribute("bogus".into());
        assert!(err.to_string().contains("'bogus'"));
    }

    #[test]
    fn test_invalid_target_context() {
        let with_gate = IrError::invalid_target("cx", "expected 2 sub-targets");
        assert_eq!(
            with_gate.to_string(),
            "Invalid target (gate: cx): expected 2 sub-targets"
        );

        let without = IrError::InvalidTarget {
            gate: None,
            reason: "empty".into(),
        };
        assert_eq!(without.to_string(), "Invalid target: empty");
    }
}
