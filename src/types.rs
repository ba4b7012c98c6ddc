use crate::primitives::Builtin;
use std::fmt; // For custom display formatting

/// The runtime datum. Every value the evaluator touches is one of these
/// variants, and composite variants own their children outright: moving a
/// child between parents is an ownership transfer, duplicating a value for
/// storage is a deep `clone`, and dropping a value releases its whole
/// subtree exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    /// A first-class error payload. Once produced it propagates through
    /// evaluation unchanged, like any other value.
    Error(String),
    Symbol(String),
    /// An expression to be evaluated: after child evaluation the first
    /// element must be the operator, the rest its arguments.
    Sexpr(Vec<Value>),
    /// A quoted expression: structurally an S-expression, but inert under
    /// evaluation.
    Qexpr(Vec<Value>),
    /// A reference to one of the fixed builtin operations. Carries no
    /// captured environment.
    Function(Builtin),
}

impl Value {
    pub fn err(message: impl Into<String>) -> Value {
        Value::Error(message.into())
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    let mut first = true;
    for child in children {
        if !first {
            write!(f, " ")?;
        }
        write!(f, "{}", child)?;
        first = false;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(message) => write!(f, "Error: {}", message),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Sexpr(children) => write_children(f, children, '(', ')'),
            Value::Qexpr(children) => write_children(f, children, '{', '}'),
            Value::Function(builtin) => write!(f, "#<primitive:{}>", builtin),
        }
    }
}
