//! qsv Default Gate Catalogue
//!
//! Concrete gate operators for the `qsv-ir` evolution engine and the
//! catalogue that names them.
//!
//! # Gates
//!
//! | Name(s) | Type | Qubits | Arguments |
//! |---------|------|--------|-----------|
//! | `i` | [`IGate`] | any | none |
//! | `x` | [`XGate`] | any | none |
//! | `z` | [`ZGate`] | any | none |
//! | `h` | [`HGate`] | any | none |
//! | `cz` | [`CZGate`] | (control, target) | none |
//! | `cx`, `cnot` | [`CXGate`] | (control, target) | none |
//! | `rz`, `phase`, `u1` | [`RZGate`] | any | `theta` |
//! | `measure`, `m` | [`Measurement`] | any | none |
//! | `dbg` | [`DebugDisplay`] | any | optional `label` |
//!
//! # Example: Bell state
//!
//! ```rust
//! use qsv_gates::circuit;
//!
//! let mut c = circuit();
//! c.gate("h")?.bind(0)?.gate("cx")?.bind((0, 1))?;
//!
//! let state = c.run()?;
//! let s = std::f64::consts::FRAC_1_SQRT_2;
//! assert!((state[0].re - s).abs() < 1e-12);
//! assert!((state[3].re - s).abs() < 1e-12);
//! # Ok::<(), qsv_ir::IrError>(())
//! ```

mod controlled;
mod debug;
mod measurement;
mod rotation;
mod single;

use qsv_ir::{Circuit, GateCatalogue};

pub use controlled::{CXGate, CZGate};
pub use debug::DebugDisplay;
pub use measurement::Measurement;
pub use rotation::RZGate;
pub use single::{HGate, IGate, XGate, ZGate};

/// The standard catalogue, aliases included.
pub fn default_catalogue() -> GateCatalogue {
    let mut catalogue = GateCatalogue::new();
    catalogue
        .register::<IGate>("i")
        .register::<XGate>("x")
        .register::<ZGate>("z")
        .register::<HGate>("h")
        .register::<CZGate>("cz")
        .register::<CXGate>("cx")
        .register::<RZGate>("rz")
        .register::<Measurement>("measure")
        .register::<DebugDisplay>("dbg");
    catalogue.alias("cnot", "cx");
    catalogue.alias("phase", "rz");
    catalogue.alias("u1", "rz");
    catalogue.alias("m", "measure");
    catalogue
}

/// Empty circuit over [`default_catalogue`].
pub fn circuit() -> Circuit {
    Circuit::new(default_catalogue())
}

#[cfg(test)]
pub(crate) mod testing {
    use num_complex::Complex64;
    use qsv_ir::HelperContext;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    pub fn ctx(n_qubits: usize) -> HelperContext {
        ctx_seeded(n_qubits, 0x5eed)
    }

    pub fn ctx_seeded(n_qubits: usize, seed: u64) -> HelperContext {
        HelperContext::new(n_qubits, StdRng::seed_from_u64(seed))
    }

    /// State with the given non-zero amplitudes.
    pub fn state_of(n_qubits: usize, amps: &[(usize, Complex64)]) -> Vec<Complex64> {
        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n_qubits];
        for &(i, a) in amps {
            state[i] = a;
        }
        state
    }

    pub fn approx_eq(a: &[Complex64], b: &[Complex64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).norm() < 1e-10)
    }
}
