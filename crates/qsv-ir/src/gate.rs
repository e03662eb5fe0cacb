//! Gate operator contracts and the per-run helper context.
//!
//! The engine knows nothing about individual gates. A gate catalogue maps
//! names to [`GateConstructor`]s; at run time each constructor builds a
//! [`Gate`] from the recorded [`GateArgs`], and the gate's
//! [`apply`](Gate::apply) evolves the state vector in place.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;
use rand::rngs::StdRng;

use crate::args::GateArgs;
use crate::error::IrResult;
use crate::target::Target;

/// Dense state vector of `2^n` amplitudes. Bit `k` of an index is qubit `k`.
pub type StateVector = Vec<Complex64>;

/// A concrete gate operator.
pub trait Gate: fmt::Debug + Send + Sync {
    /// Catalogue-independent name of the operator.
    fn name(&self) -> &str;

    /// Apply the operator to `state` on the qubits selected by `target`.
    ///
    /// Must return a vector of the same length; returning the input mutated
    /// in place is the expected implementation.
    fn apply(
        &self,
        ctx: &mut HelperContext,
        state: StateVector,
        target: &Target,
    ) -> IrResult<StateVector>;
}

/// Typed construction of a gate from call arguments.
pub trait GateFactory: Gate + Sized + 'static {
    /// Build the gate, validating its arguments.
    fn from_args(args: &GateArgs) -> IrResult<Self>;
}

/// Shared, type-erased gate constructor.
pub type GateConstructor = Arc<dyn Fn(&GateArgs) -> IrResult<Box<dyn Gate>> + Send + Sync>;

/// Wrap a [`GateFactory`] type into a [`GateConstructor`].
pub fn constructor_of<G: GateFactory>() -> GateConstructor {
    Arc::new(|args| Ok(Box::new(G::from_args(args)?) as Box<dyn Gate>))
}

/// Scratch state shared by all gates during one run.
pub struct HelperContext {
    n_qubits: usize,
    indices: Vec<usize>,
    cregs: Vec<u8>,
    rng: StdRng,
}

impl HelperContext {
    /// Fresh context: identity index table and a zeroed classical register.
    ///
    /// # Panics
    ///
    /// If `n_qubits` exceeds [`MAX_SUPPORTED_QUBITS`](crate::MAX_SUPPORTED_QUBITS).
    pub fn new(n_qubits: usize, rng: StdRng) -> Self {
        Self {
            n_qubits,
            indices: (0..1usize << n_qubits).collect(),
            cregs: vec![0; n_qubits],
            rng,
        }
    }

    /// Number of qubits in the run.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Identity permutation `0..2^n`, used for bitmask-filtered iteration.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Classical register, one bit per qubit.
    pub fn cregs(&self) -> &[u8] {
        &self.cregs
    }

    /// Record a measurement result for `qubit`.
    pub fn set_creg(&mut self, qubit: usize, bit: u8) {
        self.cregs[qubit] = bit;
    }

    /// Random source for non-unitary operations.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub(crate) fn into_cregs(self) -> Vec<u8> {
        self.cregs
    }
}

impl fmt::Debug for HelperContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperContext")
            .field("n_qubits", &self.n_qubits)
            .field("cregs", &self.cregs)
            .finish_non_exhaustive()
    }
}
