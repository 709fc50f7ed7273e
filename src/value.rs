use std::fmt;
use std::io::Write;
use std::rc::Rc;

use crate::class::{FiaClass, FiaInstance};
use crate::error::Result;
use crate::function::FiaFunction;
use crate::interpreter::Interpreter;

/// Printed form of the nil value.
pub const NIL_TEXT: &str = "nolla";

/// Magnitude from which numbers print in exponent form (`1e300`), not digit
/// by digit.
const LARGE_NUMBER: f64 = 1e16;

/// Every runtime value a Fia program can produce.  The set is closed.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Callable(Callable),
    Instance(Rc<FiaInstance>),
}

/// Something that can appear before `(`: a user function (or bound method) or
/// a class acting as its own constructor.
#[derive(Debug, Clone)]
pub enum Callable {
    Function(Rc<FiaFunction>),
    Class(Rc<FiaClass>),
}

impl Callable {
    /// Number of arguments a call must supply, exactly.
    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(function) => function.arity(),
            Callable::Class(class) => class.arity(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Callable::Function(function) => function.name(),
            Callable::Class(class) => class.name(),
        }
    }

    /// Invoke with already‑evaluated arguments.  Arity is checked by the
    /// caller, which owns the call‑site token for error reporting.
    pub fn call<W: Write>(
        &self,
        interpreter: &mut Interpreter<W>,
        arguments: Vec<Value>,
    ) -> Result<Value> {
        match self {
            Callable::Function(function) => function.call(interpreter, arguments),
            Callable::Class(class) => FiaClass::instantiate(class, interpreter, arguments),
        }
    }
}

impl PartialEq for Callable {
    /// Callables compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// `nolla` and `false` are falsy; everything else, `0` and `""`
    /// included, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }
}

impl PartialEq for Value {
    /// Value equality without cross‑type coercion; objects by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "{}", NIL_TEXT),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => {
                if n.abs() >= LARGE_NUMBER {
                    write!(f, "{:e}", n)
                } else if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => write!(f, "{}", s),

            Value::Callable(Callable::Function(function)) => write!(f, "<func {}>", function.name()),

            Value::Callable(Callable::Class(class)) => write!(f, "{}", class.name()),

            Value::Instance(instance) => write!(f, "{} instance", instance.class().name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
    }

    #[test]
    fn equality_never_coerces() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::Number(1.0), Value::from("1"));
        assert_eq!(Value::from("ab"), Value::from("ab"));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Nil.to_string(), "nolla");
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn display_large_numbers_in_exponent_form() {
        assert_eq!(Value::Number(9_999_999_999_999_998.0).to_string(), "9999999999999998");
        assert_eq!(Value::Number(1e16).to_string(), "1e16");
        assert_eq!(Value::Number(-1e300).to_string(), "-1e300");
        assert_eq!(Value::Number(1.5e20).to_string(), "1.5e20");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "inf");
    }
}
