//! Gate call arguments.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A single argument value passed to a gate constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl ArgValue {
    /// Numeric view of the value; integers widen to `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Int(i) => Some(*i as f64),
            ArgValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of the value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean view of the value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Chain-notation rendering. Strings are quoted and escaped; finite floats
/// always carry a decimal point or exponent. Non-finite floats print as
/// `inf` / `NaN`, which the chain notation has no literal for.
impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::Int(i) => write!(f, "{i}"),
            ArgValue::Float(v) => write!(f, "{v:?}"),
            ArgValue::Str(s) => write!(f, "{}", Quoted(s)),
        }
    }
}

/// Displays a string as a double-quoted literal, escaping `\`, `"`,
/// newlines and tabs.
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a>(pub &'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"")
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<i32> for ArgValue {
    fn from(i: i32) -> Self {
        ArgValue::Int(i64::from(i))
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

/// Positional and keyword arguments for one gate construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateArgs {
    /// Positional arguments, in call order.
    pub positional: Vec<ArgValue>,
    /// Keyword arguments.
    pub keyword: FxHashMap<String, ArgValue>,
}

impl GateArgs {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<ArgValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// True when no argument was supplied.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Look an argument up by keyword first, then by position.
    pub fn get(&self, name: &str, position: usize) -> Option<&ArgValue> {
        self.keyword
            .get(name)
            .or_else(|| self.positional.get(position))
    }

    /// Required numeric argument, by keyword or position.
    pub fn require_f64(&self, gate: &str, name: &str, position: usize) -> IrResult<f64> {
        let value = self.get(name, position).ok_or_else(|| {
            IrError::invalid_argument(gate, format!("missing argument '{name}'"))
        })?;
        value.as_f64().ok_or_else(|| {
            IrError::invalid_argument(gate, format!("argument '{name}' must be numeric, got {value}"))
        })
    }
}

impl fmt::Display for GateArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.positional {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        // Sorted so the rendering does not depend on hash order.
        let mut keys: Vec<_> = self.keyword.keys().collect();
        keys.sort();
        for key in keys {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}={}", self.keyword[key])?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_takes_precedence() {
        let args = GateArgs::new().arg(0.25).kwarg("theta", 0.5);
        assert_eq!(args.require_f64("rz", "theta", 0).unwrap(), 0.5);
    }

    #[test]
    fn test_positional_fallback_and_int_widening() {
        let args = GateArgs::new().arg(2);
        assert_eq!(args.require_f64("rz", "theta", 0).unwrap(), 2.0);
    }

    #[test]
    fn test_missing_and_ill_typed() {
        let missing = GateArgs::new().require_f64("rz", "theta", 0);
        assert!(matches!(missing, Err(IrError::InvalidArgument { .. })));

        let wrong = GateArgs::new().arg("half").require_f64("rz", "theta", 0);
        assert!(matches!(wrong, Err(IrError::InvalidArgument { .. })));
    }

    #[test]
    fn test_strings_are_escaped() {
        let value = ArgValue::from("say \"hi\"\\\n");
        assert_eq!(value.to_string(), r#""say \"hi\"\\\n""#);
        assert_eq!(Quoted("plain").to_string(), "\"plain\"");
    }

    #[test]
    fn test_display_is_stable() {
        let args = GateArgs::new()
            .arg(1)
            .kwarg("b", true)
            .kwarg("a", 0.5);
        assert_eq!(args.to_string(), "1, a=0.5, b=true");
    }
}
