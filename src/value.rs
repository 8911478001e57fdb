// ABOUTME: Value types representing Mewar's runtime data: integers, reals, strings, lists, and nil

use crate::error::ErrorKind;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Lists are reference-counted and interior-mutable so that two bindings can
/// name the same underlying list and observe each other's mutations (spec §5).
pub type ListHandle = Rc<RefCell<Vec<Value>>>;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Real(f64),
    String(String),
    List(ListHandle),
    Nil,
}

impl Value {
    pub fn new_list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Nil => "nil",
        }
    }

    /// Numeric normalization rule (spec §3.1 invariant): a whole-valued result
    /// is stored as `Integer`, otherwise as `Real`.
    pub fn normalize_numeric(n: f64) -> Value {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Value::Integer(n as i64)
        } else {
            Value::Real(n)
        }
    }

    /// Coerces a numeric value to `f64`; `None` for non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    /// Structural equality per spec §4.A: integer and real compare
    /// numerically, everything else by tag and content.
    pub fn values_equal(&self, other: &Value) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (self, other) {
                (Value::String(a), Value::String(b)) => a == b,
                (Value::Nil, Value::Nil) => true,
                (Value::List(a), Value::List(b)) => {
                    Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
                }
                _ => false,
            },
        }
    }

    /// Ordering comparison per spec §4.A: both operands coerced to `Real`.
    pub fn compare(&self, other: &Value) -> Result<std::cmp::Ordering, ErrorKind> {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).ok_or_else(|| ErrorKind::ComparisonTypeError {
                lhs: self.type_name().to_string(),
                rhs: other.type_name().to_string(),
            }),
            _ => Err(ErrorKind::ComparisonTypeError {
                lhs: self.type_name().to_string(),
                rhs: other.type_name().to_string(),
            }),
        }
    }

    /// Arithmetic per spec §4.A. `+` with a String operand concatenates
    /// display forms; otherwise both sides coerce to `Real` and the result
    /// is renormalized.
    pub fn add(&self, other: &Value) -> Result<Value, ErrorKind> {
        if matches!(self, Value::String(_)) || matches!(other, Value::String(_)) {
            return Ok(Value::String(format!("{}{}", self, other)));
        }
        let (a, b) = numeric_pair(self, other, "+")?;
        Ok(Value::normalize_numeric(a + b))
    }

    pub fn sub(&self, other: &Value) -> Result<Value, ErrorKind> {
        let (a, b) = numeric_pair(self, other, "-")?;
        Ok(Value::normalize_numeric(a - b))
    }

    pub fn mul(&self, other: &Value) -> Result<Value, ErrorKind> {
        let (a, b) = numeric_pair(self, other, "*")?;
        Ok(Value::normalize_numeric(a * b))
    }

    pub fn div(&self, other: &Value) -> Result<Value, ErrorKind> {
        let (a, b) = numeric_pair(self, other, "/")?;
        if b == 0.0 {
            return Err(ErrorKind::DivideByZero);
        }
        Ok(Value::normalize_numeric(a / b))
    }
}

fn numeric_pair(lhs: &Value, rhs: &Value, op: &str) -> Result<(f64, f64), ErrorKind> {
    let a = lhs
        .as_f64()
        .ok_or_else(|| ErrorKind::type_error(format!("cannot apply '{}' to a {}", op, lhs.type_name())))?;
    let b = rhs
        .as_f64()
        .ok_or_else(|| ErrorKind::type_error(format!("cannot apply '{}' to a {}", op, rhs.type_name())))?;
    Ok((a, b))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.values_equal(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Nil => write!(f, "nil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_display_is_plain_decimal() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Integer(-7)), "-7");
    }

    #[test]
    fn real_display_keeps_fraction() {
        assert_eq!(format!("{}", Value::Real(2.5)), "2.5");
    }

    #[test]
    fn nil_displays_as_literal_text() {
        assert_eq!(format!("{}", Value::Nil), "nil");
    }

    #[test]
    fn list_display_is_bracketed_and_comma_separated() {
        let list = Value::new_list(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(format!("{}", list), "[1, 2, 3]");
    }

    #[test]
    fn arithmetic_result_normalizes_to_integer_when_whole() {
        let sum = Value::Integer(3).add(&Value::Integer(4)).unwrap();
        assert!(matches!(sum, Value::Integer(7)));

        let div = Value::Integer(10).div(&Value::Integer(2)).unwrap();
        assert!(matches!(div, Value::Integer(5)));

        let frac = Value::Integer(10).div(&Value::Integer(4)).unwrap();
        assert!(matches!(frac, Value::Real(r) if (r - 2.5).abs() < 1e-9));
    }

    #[test]
    fn plus_with_string_operand_concatenates_display_forms() {
        let result = Value::String("Hello, ".to_string())
            .add(&Value::String("Mewar".to_string()))
            .unwrap();
        assert_eq!(format!("{}", result), "Hello, Mewar");

        let mixed = Value::String("count: ".to_string()).add(&Value::Integer(5)).unwrap();
        assert_eq!(format!("{}", mixed), "count: 5");
    }

    #[test]
    fn division_by_zero_is_rejected() {
        assert_eq!(Value::Integer(1).div(&Value::Integer(0)), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn arithmetic_on_lists_is_a_type_error() {
        let list = Value::new_list(vec![]);
        assert!(list.add(&Value::Integer(1)).is_err());
    }

    #[test]
    fn integer_and_real_compare_as_numerically_equal() {
        assert!(Value::Integer(2).values_equal(&Value::Real(2.0)));
    }

    #[test]
    fn aliased_lists_share_mutations() {
        let handle = Rc::new(RefCell::new(vec![Value::Integer(1), Value::Integer(2)]));
        let a = Value::List(handle.clone());
        let b = Value::List(handle);
        if let Value::List(list) = &a {
            list.borrow_mut().push(Value::Integer(3));
        }
        assert_eq!(format!("{}", b), "[1, 2, 3]");
    }
}
