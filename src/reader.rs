use crate::parser::ParseNode;
use crate::types::Value;

/// Converts one parse-tree node (and its subtree) into a value tree.
///
/// This is a pure structural translation driven by tag substrings: it never
/// evaluates anything, and its only failure mode is a numeric literal that
/// does not parse, which becomes an error value. Bracket punctuation and
/// `"regex"` leaves in the tree are skipped.
pub fn read(node: &ParseNode) -> Value {
    if node.tag.contains("number") {
        return read_number(node);
    }
    if node.tag.contains("symbol") {
        return Value::Symbol(node.contents.clone());
    }

    // The grammar root and s-expression nodes both collect into an
    // S-expression; q-expression nodes into a Q-expression.
    let mut children = Vec::new();
    for child in &node.children {
        if matches!(child.contents.as_str(), "(" | ")" | "{" | "}") {
            continue;
        }
        if child.tag == "regex" {
            continue;
        }
        children.push(read(child));
    }
    if node.tag.contains("qexpr") {
        Value::Qexpr(children)
    } else {
        Value::Sexpr(children)
    }
}

fn read_number(node: &ParseNode) -> Value {
    // Non-finite covers literals too large for a double, the equivalent of
    // an out-of-range conversion.
    match node.contents.parse::<f64>() {
        Ok(x) if x.is_finite() => Value::Number(x),
        _ => Value::err("Invalid number"),
    }
}
