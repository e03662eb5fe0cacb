//! qsv Circuit Model and Evolution Engine
//!
//! This crate holds everything the simulator needs except the gates
//! themselves: the circuit as an ordered operation log, the name-based
//! construction protocol, and the dense state-vector evolution loop.
//!
//! # Core Components
//!
//! - **Targets**: [`Target`] selects qubits (index, slice or composite tuple)
//! - **Gates**: the [`Gate`] / [`GateFactory`] contracts and the per-run
//!   [`HelperContext`]
//! - **Catalogue**: [`GateCatalogue`] maps names to [`GateConstructor`]s
//! - **Construction**: [`GateBinder`] turns `name(args)[target]` into an
//!   [`OperationRecord`]
//! - **Circuit**: [`Circuit`] owns the operations, runs them and keeps the
//!   history of [`ClassicalOutcome`]s
//! - **Macros**: [`MacroRegistry`] for named circuit fragments
//!
//! The concrete gate set lives in `qsv-gates`; a circuit is always built over
//! a catalogue supplied by the caller.
//!
//! # Example
//!
//! ```rust
//! use qsv_ir::{Circuit, GateCatalogue, IrError};
//!
//! let mut circuit = Circuit::new(GateCatalogue::new());
//! assert!(matches!(circuit.gate("h"), Err(IrError::UnknownGate(_))));
//! assert!(matches!(circuit.last_result(), Err(IrError::NoRunYet)));
//!
//! // An empty three-qubit register evolves to |000⟩.
//! let mut circuit = circuit.with_qubits(3);
//! let state = circuit.run().unwrap();
//! assert_eq!(state.len(), 8);
//! assert_eq!(state[0].re, 1.0);
//! ```
//!
//! # Memory
//!
//! | Qubits | State vector |
//! |--------|--------------|
//! | 10 | 16 KiB |
//! | 20 | 16 MiB |
//! | 24 (default ceiling) | 256 MiB |
//! | 30 | 16 GiB |

pub mod args;
pub mod binder;
pub mod catalogue;
pub mod circuit;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod macros;
pub mod operation;
pub mod target;

pub use args::{ArgValue, GateArgs, Quoted};
pub use binder::{Attribute, GateBinder, MacroBinder};
pub use catalogue::GateCatalogue;
pub use circuit::Circuit;
pub use config::{MAX_SUPPORTED_QUBITS, SimulatorConfig};
pub use engine::zero_state;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateConstructor, GateFactory, HelperContext, StateVector, constructor_of};
pub use macros::{CallPolicy, MacroDef, MacroFn, MacroRegistry};
pub use operation::{ClassicalOutcome, Counts, OperationRecord};
pub use target::Target;
