//! Qubit targets.
//!
//! A [`Target`] is the value a gate is bound to: a single qubit index, a
//! half-open slice of indices, or a composite tuple of sub-targets. Integer
//! literals, ranges, tuples, arrays and vectors all convert into a target, so
//! binding reads close to indexing notation:
//!
//! ```rust
//! use qsv_ir::Target;
//!
//! assert_eq!(Target::from(3).max_index().unwrap(), 3);
//! assert_eq!(Target::from(1..4).max_index().unwrap(), 3);
//! assert_eq!(Target::from((0, 5)).max_index().unwrap(), 5);
//! ```

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull};

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A qubit selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A single qubit.
    Index(i64),
    /// Qubits `start..end`; an open end extends to the last qubit of the run.
    Slice {
        /// First qubit (inclusive).
        start: i64,
        /// One past the last qubit, or `None` for "until the end".
        end: Option<i64>,
    },
    /// A composite target, e.g. `(control, target)` for two-qubit gates.
    Tuple(Vec<Target>),
}

fn invalid(reason: impl Into<String>) -> IrError {
    IrError::InvalidTarget {
        gate: None,
        reason: reason.into(),
    }
}

fn non_negative(index: i64) -> IrResult<usize> {
    usize::try_from(index).map_err(|_| invalid(format!("negative qubit index {index}")))
}

impl Target {
    /// Whole register, equivalent to `[:]`.
    pub fn all() -> Self {
        Target::Slice {
            start: 0,
            end: None,
        }
    }

    /// Highest qubit index this target references.
    ///
    /// An open-ended slice references at least its start. Empty tuples,
    /// empty slices and negative indices are rejected.
    pub fn max_index(&self) -> IrResult<usize> {
        match self {
            Target::Index(i) => non_negative(*i),
            Target::Slice { start, end } => {
                let start = non_negative(*start)?;
                match end {
                    None => Ok(start),
                    Some(end) => {
                        let end = non_negative(*end)?;
                        if end <= start {
                            return Err(invalid(format!("slice {self} selects no qubits")));
                        }
                        Ok(end - 1)
                    }
                }
            }
            Target::Tuple(items) => {
                let mut max = None;
                for item in items {
                    let m = item.max_index()?;
                    max = Some(max.map_or(m, |cur: usize| cur.max(m)));
                }
                max.ok_or_else(|| invalid("empty target"))
            }
        }
    }

    /// Flatten into qubit indices, in order, checked against `n_qubits`.
    pub fn qubits(&self, n_qubits: usize) -> IrResult<Vec<usize>> {
        let mut out = Vec::new();
        self.collect_qubits(n_qubits, &mut out)?;
        if out.is_empty() {
            return Err(invalid(format!("target {self} selects no qubits")));
        }
        Ok(out)
    }

    fn collect_qubits(&self, n_qubits: usize, out: &mut Vec<usize>) -> IrResult<()> {
        match self {
            Target::Index(i) => {
                let q = non_negative(*i)?;
                if q >= n_qubits {
                    return Err(invalid(format!(
                        "qubit {q} out of range for {n_qubits} qubits"
                    )));
                }
                out.push(q);
            }
            Target::Slice { start, end } => {
                let start = non_negative(*start)?;
                let end = match end {
                    Some(e) => non_negative(*e)?,
                    None => n_qubits,
                };
                if end > n_qubits {
                    return Err(invalid(format!(
                        "slice end {end} out of range for {n_qubits} qubits"
                    )));
                }
                out.extend(start..end);
            }
            Target::Tuple(items) => {
                for item in items {
                    item.collect_qubits(n_qubits, out)?;
                }
            }
        }
        Ok(())
    }

    /// Resolve a two-element tuple into `(control, target)` pairs.
    ///
    /// Both sides are flattened; equal-length sides are zipped and a
    /// single-qubit side is broadcast against the other.
    pub fn qubit_pairs(&self, n_qubits: usize) -> IrResult<Vec<(usize, usize)>> {
        let Target::Tuple(items) = self else {
            return Err(invalid(format!(
                "expected a (control, target) pair, got {self}"
            )));
        };
        let [controls, targets] = items.as_slice() else {
            return Err(invalid(format!(
                "expected 2 sub-targets, got {}",
                items.len()
            )));
        };
        let controls = controls.qubits(n_qubits)?;
        let targets = targets.qubits(n_qubits)?;

        let pairs: Vec<(usize, usize)> = match (controls.len(), targets.len()) {
            (a, b) if a == b => controls.into_iter().zip(targets).collect(),
            (1, _) => targets.into_iter().map(|t| (controls[0], t)).collect(),
            (_, 1) => controls.into_iter().map(|c| (c, targets[0])).collect(),
            (a, b) => {
                return Err(invalid(format!(
                    "cannot pair {a} control qubits with {b} target qubits"
                )));
            }
        };

        if let Some((c, _)) = pairs.iter().find(|(c, t)| c == t) {
            return Err(invalid(format!("qubit {c} is both control and target")));
        }
        Ok(pairs)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Index(i) => write!(f, "{i}"),
            Target::Slice { start, end } => {
                if *start != 0 {
                    write!(f, "{start}")?;
                }
                write!(f, ":")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                Ok(())
            }
            Target::Tuple(items) => {
                write!(f, "(")?;
                fmt_items(items, f)?;
                write!(f, ")")
            }
        }
    }
}

/// Write the target the way it appears between brackets: top-level tuple
/// items are listed without parentheses.
pub(crate) fn fmt_subscript(target: &Target, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match target {
        Target::Tuple(items) => fmt_items(items, f),
        other => write!(f, "{other}"),
    }
}

fn fmt_items(items: &[Target], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl From<i32> for Target {
    fn from(index: i32) -> Self {
        Target::Index(i64::from(index))
    }
}

impl From<i64> for Target {
    fn from(index: i64) -> Self {
        Target::Index(index)
    }
}

impl From<u32> for Target {
    fn from(index: u32) -> Self {
        Target::Index(i64::from(index))
    }
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Target::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<Range<i32>> for Target {
    fn from(range: Range<i32>) -> Self {
        Target::Slice {
            start: i64::from(range.start),
            end: Some(i64::from(range.end)),
        }
    }
}

impl From<Range<usize>> for Target {
    fn from(range: Range<usize>) -> Self {
        Target::Slice {
            start: i64::try_from(range.start).unwrap_or(i64::MAX),
            end: Some(i64::try_from(range.end).unwrap_or(i64::MAX)),
        }
    }
}

impl From<RangeFrom<i32>> for Target {
    fn from(range: RangeFrom<i32>) -> Self {
        Target::Slice {
            start: i64::from(range.start),
            end: None,
        }
    }
}

impl From<RangeFrom<usize>> for Target {
    fn from(range: RangeFrom<usize>) -> Self {
        Target::Slice {
            start: i64::try_from(range.start).unwrap_or(i64::MAX),
            end: None,
        }
    }
}

impl From<RangeFull> for Target {
    fn from(_: RangeFull) -> Self {
        Target::all()
    }
}

impl<A: Into<Target>, B: Into<Target>> From<(A, B)> for Target {
    fn from((a, b): (A, B)) -> Self {
        Target::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Target>, B: Into<Target>, C: Into<Target>> From<(A, B, C)> for Target {
    fn from((a, b, c): (A, B, C)) -> Self {
        Target::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl<T: Into<Target>, const N: usize> From<[T; N]> for Target {
    fn from(items: [T; N]) -> Self {
        Target::Tuple(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Target>> From<Vec<T>> for Target {
    fn from(items: Vec<T>) -> Self {
        Target::Tuple(items.into_iter().map(Into::into).collect())
    }
}
