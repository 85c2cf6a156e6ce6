use std::fmt;

/// A runtime value passed as a positional parameter to a message.
///
/// Parameters are addressed by `$1`, `$2`, ... in message source. A value is
/// handed to operations untouched; it only becomes text when concatenated
/// into the final output.
///
/// # Example
///
/// ```
/// use lingo::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let missing: Value = None::<i64>.into();
///
/// assert_eq!(count.as_number(), Some(42));
/// assert_eq!(name.to_string(), "Alice");
/// assert!(missing.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// An absent value. Renders as the empty string.
    #[default]
    Empty,

    /// An integer number (used for plural selection).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),
}

impl Value {
    /// Get this value as an integer, if it is one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float. Integers are widened.
    #[expect(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Number(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string slice, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// True for `Empty` and for the empty string.
    ///
    /// Operations that degrade gracefully on missing input (such as
    /// `grammar`) use this as their "no value" test.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::String(s) => s.is_empty(),
            Value::Number(_) | Value::Float(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<u64> for Value {
    #[expect(clippy::cast_precision_loss)]
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<usize> for Value {
    #[expect(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Empty, Into::into)
    }
}
