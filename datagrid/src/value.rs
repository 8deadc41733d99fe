//! Value enum for resolved cell values

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value resolved from a row by a column accessor.
///
/// Every accessor produces a `Value`, which gives the engine one type to
/// stringify (for filtering) and to order (for sorting) regardless of the
/// caller's row type.
///
/// # Example
///
/// ```
/// use datagrid::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let empty = Value::Null;
///
/// assert_eq!(name.to_string(), "Contoso");
/// assert_eq!(empty.to_string(), "");
/// assert!(revenue.is_number());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Text.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` for `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns `true` if the value is null or an empty string.
    ///
    /// Column filters holding a blank value are treated as "no filter".
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Natural ordering used by the sort stage.
    ///
    /// The ordering is total. Values of different kinds order by kind:
    /// null, then booleans, then numbers, then strings. Integers and floats
    /// compare by exact numeric value, without rounding the integer to `f64`,
    /// and `0.0` equals `-0.0`. `NaN` sorts after every other number
    /// (before them when its sign bit is set) instead of breaking the sort.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
            }
            (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
        }
    }
}

/// Exact comparison of an integer against a float.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, exactly representable.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    // In range, so the truncated float fits in an i64 without saturating.
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(Value::Int)
            .unwrap_or(Value::Float(v as f64))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from(&v)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::from("Amy").to_string(), "Amy");
    }

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(3.0).compare(&Value::Int(3)), Ordering::Equal);
    }

    #[test]
    fn test_compare_large_mixed_numbers_is_transitive() {
        let above = Value::Int((1 << 53) + 1);
        let float = Value::Float(9_007_199_254_740_992.0);
        let exact = Value::Int(1 << 53);

        assert_eq!(above.compare(&float), Ordering::Greater);
        assert_eq!(float.compare(&above), Ordering::Less);
        assert_eq!(float.compare(&exact), Ordering::Equal);
        assert_eq!(above.compare(&exact), Ordering::Greater);
    }

    #[test]
    fn test_compare_int_float_edges() {
        assert_eq!(Value::Int(-3).compare(&Value::Float(-2.5)), Ordering::Less);
        assert_eq!(Value::Int(-2).compare(&Value::Float(-2.5)), Ordering::Greater);
        assert_eq!(
            Value::Int(i64::MAX).compare(&Value::Float(9.3e18)),
            Ordering::Less
        );
        assert_eq!(
            Value::Int(i64::MIN).compare(&Value::Float(f64::NEG_INFINITY)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Int(i64::MAX).compare(&Value::Float(f64::NAN)),
            Ordering::Less
        );
        assert_eq!(Value::Int(0).compare(&Value::Float(-0.0)), Ordering::Equal);
        assert_eq!(Value::Float(-0.0).compare(&Value::Float(0.0)), Ordering::Equal);
    }

    #[test]
    fn test_compare_kind_rank() {
        assert_eq!(Value::Null.compare(&Value::Int(0)), Ordering::Less);
        assert_eq!(Value::from("a").compare(&Value::Int(9)), Ordering::Greater);
        assert_eq!(Value::Bool(true).compare(&Value::Null), Ordering::Greater);
    }

    #[test]
    fn test_nan_is_ordered() {
        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.compare(&Value::Float(1.0)), Ordering::Greater);
        assert_eq!(Value::Float(1.0).compare(&nan), Ordering::Less);
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"n": 3, "f": 0.5, "s": "x", "a": [1, 2]});
        assert_eq!(Value::from(&json["n"]), Value::Int(3));
        assert_eq!(Value::from(&json["f"]), Value::Float(0.5));
        assert_eq!(Value::from(&json["s"]), Value::from("x"));
        assert_eq!(Value::from(&json["a"]), Value::from("[1,2]"));
        assert_eq!(Value::from(&json["missing"]), Value::Null);
    }

    #[test]
    fn test_is_blank() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::Int(0).is_blank());
    }
}
