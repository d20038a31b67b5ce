//! Display and Debug implementations for Value

use std::fmt;

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Void => write!(f, "void"),
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({})", n),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Void => write!(f, "Void"),
            Value::Function(func) => write!(f, "{:?}", func),
            Value::Builtin(builtin) => write!(f, "{:?}", builtin),
        }
    }
}
