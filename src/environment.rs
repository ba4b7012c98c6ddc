use crate::primitives::{ArithOp, Builtin};
use crate::types::Value;

/// The name -> value binding table consulted when a symbol is evaluated.
///
/// Bindings are kept in insertion order and looked up by linear scan; the
/// table only ever holds the builtin set in this core, which is small enough
/// that scanning beats hashing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Env {
    bindings: Vec<(String, Value)>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: Vec::new(),
        }
    }

    /// Creates an environment with every builtin operation bound to its
    /// name. This registration is the only mutation the environment receives
    /// during a session.
    pub fn new_populated() -> Self {
        let mut env = Env::new();
        env.add_primitive("list", Builtin::List);
        env.add_primitive("head", Builtin::Head);
        env.add_primitive("tail", Builtin::Tail);
        env.add_primitive("eval", Builtin::Eval);
        env.add_primitive("join", Builtin::Join);
        env.add_primitive("+", Builtin::Op(ArithOp::Add));
        env.add_primitive("-", Builtin::Op(ArithOp::Sub));
        env.add_primitive("*", Builtin::Op(ArithOp::Mul));
        env.add_primitive("/", Builtin::Op(ArithOp::Div));
        env.add_primitive("%", Builtin::Op(ArithOp::Rem));
        env.add_primitive("^", Builtin::Op(ArithOp::Pow));
        env
    }

    /// Looks up `name` and returns the caller's own deep copy of the bound
    /// value. An unbound name yields an error value, never a lookup failure.
    pub fn get(&self, name: &str) -> Value {
        match self.bindings.iter().find(|(bound, _)| bound.as_str() == name) {
            Some((_, value)) => value.clone(),
            None => Value::err("Unbound symbol!"),
        }
    }

    /// Binds `name` to `value`, replacing an existing binding in place or
    /// appending a new one. A name is never bound twice.
    pub fn put(&mut self, name: &str, value: Value) {
        if let Some(slot) = self
            .bindings
            .iter_mut()
            .find(|(bound, _)| bound.as_str() == name)
        {
            slot.1 = value;
            return;
        }
        self.bindings.push((name.to_string(), value));
    }

    /// Helper to bind a builtin operation under its name.
    fn add_primitive(&mut self, name: &str, builtin: Builtin) {
        self.put(name, Value::Function(builtin));
    }

    /// Names of all current bindings, in binding order.
    pub fn identifiers(&self) -> Vec<String> {
        self.bindings.iter().map(|(name, _)| name.clone()).collect()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut env = Env::new();
        env.put("x", Value::Number(10.0));

        assert_eq!(env.get("x"), Value::Number(10.0));
    }

    #[test]
    fn test_get_unbound() {
        let env = Env::new();
        assert_eq!(env.get("y"), Value::err("Unbound symbol!"));
    }

    #[test]
    fn test_put_replaces_instead_of_duplicating() {
        // Re-binding a name must leave exactly one entry for it
        let mut env = Env::new();
        env.put("x", Value::Number(1.0));
        env.put("x", Value::Number(2.0));

        assert_eq!(env.get("x"), Value::Number(2.0));
        assert_eq!(env.identifiers(), vec!["x".to_string()]);
    }

    #[test]
    fn test_get_returns_independent_copy() {
        let mut env = Env::new();
        env.put("xs", Value::Qexpr(vec![Value::Number(1.0)]));

        let mut first = env.get("xs");
        if let Value::Qexpr(children) = &mut first {
            children.push(Value::Number(2.0));
        }

        // The stored binding is untouched by mutation of the returned copy
        assert_eq!(env.get("xs"), Value::Qexpr(vec![Value::Number(1.0)]));
    }

    #[test]
    fn test_populated_env_binds_builtins() {
        let env = Env::new_populated();
        assert_eq!(env.get("head"), Value::Function(Builtin::Head));
        assert_eq!(env.get("+"), Value::Function(Builtin::Op(ArithOp::Add)));
        assert_eq!(env.get("^"), Value::Function(Builtin::Op(ArithOp::Pow)));
        assert_eq!(env.identifiers().len(), 11);
    }
}
