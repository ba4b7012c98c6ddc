use crate::environment::Env;
use crate::evaluator;
use crate::types::Value;
use std::fmt;

/// Arithmetic operators routed through the shared numeric fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// The closed set of builtin operations. Recognition of a name is exact set
/// membership and application is an exhaustive match, so there is no way to
/// reach an operation through an accidental substring of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    List,
    Head,
    Tail,
    Join,
    Eval,
    Op(ArithOp),
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "list" => Some(Builtin::List),
            "head" => Some(Builtin::Head),
            "tail" => Some(Builtin::Tail),
            "join" => Some(Builtin::Join),
            "eval" => Some(Builtin::Eval),
            "+" => Some(Builtin::Op(ArithOp::Add)),
            "-" => Some(Builtin::Op(ArithOp::Sub)),
            "*" => Some(Builtin::Op(ArithOp::Mul)),
            "/" => Some(Builtin::Op(ArithOp::Div)),
            "%" => Some(Builtin::Op(ArithOp::Rem)),
            "^" => Some(Builtin::Op(ArithOp::Pow)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::List => "list",
            Builtin::Head => "head",
            Builtin::Tail => "tail",
            Builtin::Join => "join",
            Builtin::Eval => "eval",
            Builtin::Op(ArithOp::Add) => "+",
            Builtin::Op(ArithOp::Sub) => "-",
            Builtin::Op(ArithOp::Mul) => "*",
            Builtin::Op(ArithOp::Div) => "/",
            Builtin::Op(ArithOp::Rem) => "%",
            Builtin::Op(ArithOp::Pow) => "^",
        }
    }

    /// Applies the operation to an already-evaluated argument list. The
    /// argument list is consumed on every path, success or error.
    pub fn apply(self, env: &Env, args: Vec<Value>) -> Value {
        match self {
            Builtin::List => prim_list(args),
            Builtin::Head => prim_head(args),
            Builtin::Tail => prim_tail(args),
            Builtin::Join => prim_join(args),
            Builtin::Eval => prim_eval(env, args),
            Builtin::Op(op) => prim_op(args, op),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Name-based builtin dispatch. Unrecognized names drop the argument list
/// and report an error value.
pub fn dispatch(env: &Env, name: &str, args: Vec<Value>) -> Value {
    match Builtin::lookup(name) {
        Some(builtin) => builtin.apply(env, args),
        None => Value::err("Unknown function!"),
    }
}

/// Shared arithmetic fold over the argument list, left to right from the
/// first argument. A lone argument to `-` negates.
fn prim_op(args: Vec<Value>, op: ArithOp) -> Value {
    let mut nums = Vec::with_capacity(args.len());
    for arg in &args {
        match arg {
            Value::Number(n) => nums.push(*n),
            _ => return Value::err("Cannot operate on non-number!"),
        }
    }

    if op == ArithOp::Sub && nums.len() == 1 {
        return Value::Number(-nums[0]);
    }

    let mut operands = nums.into_iter();
    let mut acc = match operands.next() {
        Some(first) => first,
        None => return Value::err("Cannot operate on non-number!"),
    };

    for y in operands {
        acc = match op {
            ArithOp::Add => acc + y,
            ArithOp::Sub => acc - y,
            ArithOp::Mul => acc * y,
            ArithOp::Div => {
                if y == 0.0 {
                    return Value::err("Division by zero!");
                }
                acc / y
            }
            ArithOp::Rem => {
                // Both operands truncate to integers before the remainder
                if y as i64 == 0 {
                    return Value::err("Division by zero!");
                }
                ((acc as i64) % (y as i64)) as f64
            }
            ArithOp::Pow => acc.powf(y),
        };
    }
    Value::Number(acc)
}

/// Re-tags the evaluated argument list as a literal list, without copying.
fn prim_list(args: Vec<Value>) -> Value {
    Value::Qexpr(args)
}

fn prim_head(mut args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::err("Function 'head' passed too many arguments!");
    }
    match args.remove(0) {
        Value::Qexpr(children) if children.is_empty() => Value::err("Function 'head' passed {}!"),
        Value::Qexpr(mut children) => {
            children.truncate(1);
            Value::Qexpr(children)
        }
        _ => Value::err("Function 'head' passed incorrect type!"),
    }
}

fn prim_tail(mut args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::err("Function 'tail' passed too many arguments!");
    }
    match args.remove(0) {
        Value::Qexpr(children) if children.is_empty() => Value::err("Function 'tail' passed {}!"),
        Value::Qexpr(mut children) => {
            children.remove(0);
            Value::Qexpr(children)
        }
        _ => Value::err("Function 'tail' passed incorrect type!"),
    }
}

fn prim_join(args: Vec<Value>) -> Value {
    if args.iter().any(|arg| !matches!(arg, Value::Qexpr(_))) {
        return Value::err("Function 'join' passed incorrect type!");
    }
    let mut joined = Vec::new();
    for arg in args {
        if let Value::Qexpr(mut children) = arg {
            joined.append(&mut children);
        }
    }
    Value::Qexpr(joined)
}

fn prim_eval(env: &Env, mut args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return Value::err("Function 'eval' passed too many arguments!");
    }
    match args.remove(0) {
        // Re-tag the literal list as an S-expression and evaluate it
        Value::Qexpr(children) => evaluator::eval(env, Value::Sexpr(children)),
        _ => Value::err("Function 'eval' passed incorrect type!"),
    }
}
