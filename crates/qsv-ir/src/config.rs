//! Simulator configuration.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{IrError, IrResult};

/// Default qubit ceiling: 2^24 amplitudes is 256 MiB of `Complex64`.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// Widest register whose state vector length and byte size fit the
/// platform's address space (58 on 64-bit targets).
pub const MAX_SUPPORTED_QUBITS: usize =
    (isize::MAX as usize / std::mem::size_of::<Complex64>()).ilog2() as usize;

/// Environment variable overriding [`SimulatorConfig::max_qubits`].
pub const ENV_MAX_QUBITS: &str = "QSV_MAX_QUBITS";

/// Environment variable overriding [`SimulatorConfig::seed`].
pub const ENV_SEED: &str = "QSV_SEED";

/// Run-time settings for the evolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register the engine will allocate.
    pub max_qubits: usize,
    /// Base seed for measurement sampling. `None` draws from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the qubit ceiling, clamped to [`MAX_SUPPORTED_QUBITS`].
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        if max_qubits > MAX_SUPPORTED_QUBITS {
            warn!(
                "max_qubits {} exceeds the supported {}, clamping",
                max_qubits, MAX_SUPPORTED_QUBITS
            );
        }
        self.max_qubits = max_qubits.min(MAX_SUPPORTED_QUBITS);
        self
    }

    /// Fix the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| IrError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `QSV_MAX_QUBITS` / `QSV_SEED` when set.
    pub fn from_env() -> IrResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> IrResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_MAX_QUBITS) {
            config.max_qubits = raw
                .trim()
                .parse()
                .map_err(|e| IrError::Config(format!("{ENV_MAX_QUBITS}={raw}: {e}")))?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|e| IrError::Config(format!("{ENV_SEED}={raw}: {e}")))?;
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject a ceiling the engine could never allocate.
    pub fn validate(&self) -> IrResult<()> {
        if self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(IrError::Config(format!(
                "max_qubits {} exceeds the supported maximum of {}",
                self.max_qubits, MAX_SUPPORTED_QUBITS
            )));
        }
        Ok(())
    }

    /// The ceiling the engine enforces, whatever was written to the field.
    pub(crate) fn effective_max_qubits(&self) -> usize {
        self.max_qubits.min(MAX_SUPPORTED_QUBITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_defaults() {
        let config = SimulatorConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulatorConfig::default());

        let config = SimulatorConfig::from_json(r#"{"max_qubits": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.max_qubits, 10);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_json_invalid() {
        assert!(matches!(
            SimulatorConfig::from_json(r#"{"max_qubits": "many"}"#),
            Err(IrError::Config(_))
        ));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = SimulatorConfig::from_lookup(|key| match key {
            ENV_MAX_QUBITS => Some("12".to_string()),
            ENV_SEED => Some(" 42 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.max_qubits, 12);
        assert_eq!(config.seed, Some(42));

        let bad = SimulatorConfig::from_lookup(|key| {
            (key == ENV_SEED).then(|| "not-a-number".to_string())
        });
        assert!(matches!(bad, Err(IrError::Config(_))));
    }

    #[test]
    fn test_oversized_ceiling() {
        assert!(MAX_SUPPORTED_QUBITS < usize::BITS as usize);
        assert_eq!(
            SimulatorConfig::new().with_max_qubits(100).max_qubits,
            MAX_SUPPORTED_QUBITS
        );
        assert!(matches!(
            SimulatorConfig::from_json(r#"{"max_qubits": 64}"#),
            Err(IrError::Config(_))
        ));
        let env = SimulatorConfig::from_lookup(|key| {
            (key == ENV_MAX_QUBITS).then(|| "1000".to_string())
        });
        assert!(matches!(env, Err(IrError::Config(_))));
    }
}
