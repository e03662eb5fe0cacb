//! Recorded operations and run outcomes.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::args::GateArgs;
use crate::error::IrResult;
use crate::gate::{Gate, GateConstructor};
use crate::target::{Target, fmt_subscript};

/// One requested gate application, frozen at bind time.
#[derive(Clone)]
pub struct OperationRecord {
    name: String,
    constructor: GateConstructor,
    target: Target,
    args: GateArgs,
}

impl OperationRecord {
    pub(crate) fn new(
        name: String,
        constructor: GateConstructor,
        target: Target,
        args: GateArgs,
    ) -> Self {
        Self {
            name,
            constructor,
            target,
            args,
        }
    }

    /// Catalogue name the gate was resolved under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Arguments the gate will be constructed with.
    pub fn args(&self) -> &GateArgs {
        &self.args
    }

    /// Build the concrete operator.
    pub fn instantiate(&self) -> IrResult<Box<dyn Gate>> {
        (self.constructor)(&self.args)
    }
}

impl fmt::Display for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "({})", self.args)?;
        }
        write!(f, "[")?;
        fmt_subscript(&self.target, f)?;
        write!(f, "]")
    }
}

impl fmt::Debug for OperationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRecord")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Classical register snapshot taken at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalOutcome(Vec<u8>);

impl ClassicalOutcome {
    /// Wrap register bits (qubit 0 first).
    pub fn new(bits: Vec<u8>) -> Self {
        Self(bits)
    }

    /// Register bits, qubit 0 first.
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    /// Register width.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-qubit run.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bitstring with qubit 0 as the leftmost character.
    pub fn to_bitstring(&self) -> String {
        self.0.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect()
    }
}

impl fmt::Display for ClassicalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bitstring())
    }
}

/// Measurement counts over several shots, keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `outcome`.
    pub fn record(&mut self, outcome: &ClassicalOutcome) {
        *self.counts.entry(outcome.to_bitstring()).or_insert(0) += 1;
    }

    /// Occurrences of `bitstring` (0 if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries sorted by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Most frequent outcome, ties broken by bitstring order.
    pub fn most_frequent(&self) -> Option<&str> {
        self.sorted()
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
            .map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_bitstring_qubit_zero_first() {
        let outcome = ClassicalOutcome::new(vec![1, 0, 0]);
        assert_eq!(outcome.to_string(), "100");
        assert_eq!(outcome.len(), 3);
    }

    #[test]
    fn test_counts() {
        let mut counts = Counts::new();
        counts.record(&ClassicalOutcome::new(vec![1, 1]));
        counts.record(&ClassicalOutcome::new(vec![0, 0]));
        counts.record(&ClassicalOutcome::new(vec![1, 1]));

        assert_eq!(counts.get("11"), 2);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.sorted(), vec![("00", 1), ("11", 2)]);
        assert_eq!(counts.most_frequent(), Some("11"));
    }
}
