use crate::environment::Env;
use crate::types::Value;

/// Reduces a value to normal form within the given environment.
///
/// Errors are ordinary values here: they are returned, never raised, so an
/// error produced deep inside an expression flows outward through the same
/// channel as any other result.
pub fn eval(env: &Env, value: Value) -> Value {
    match value {
        // Symbols resolve through the environment, consuming the symbol
        Value::Symbol(name) => env.get(&name),
        Value::Sexpr(children) => eval_sexpr(env, children),
        // Numbers, errors, functions and quoted expressions are already in
        // normal form
        other => other,
    }
}

fn eval_sexpr(env: &Env, children: Vec<Value>) -> Value {
    // Evaluate every child in place, left to right
    let mut children: Vec<Value> = children
        .into_iter()
        .map(|child| eval(env, child))
        .collect();

    // The earliest child error becomes the whole result, discarding the
    // other children
    if let Some(i) = children
        .iter()
        .position(|child| matches!(child, Value::Error(_)))
    {
        return children.swap_remove(i);
    }

    if children.is_empty() {
        return Value::Sexpr(children);
    }

    // An S-expression of one element is transparent
    if children.len() == 1 {
        return children.remove(0);
    }

    match children.remove(0) {
        Value::Function(builtin) => builtin.apply(env, children),
        _ => Value::err("first element is not a function!"),
    }
}
