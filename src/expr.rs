// ABOUTME: Expression evaluator (spec §4.B) and condition evaluator (spec §4.A
// ABOUTME: ordering/equality) shared by every statement that takes an expression.

use crate::env::Environment;
use crate::error::ErrorKind;
use crate::text::{is_ident_byte, rfind_top_level_operator, split_top_level};
use crate::value::Value;
use std::cmp::Ordering;

/// Evaluates a trimmed expression string to a [`Value`], per the grammar in
/// spec §4.B. The rules are tried in order; the first match wins.
pub fn eval_expr(input: &str, env: &Environment) -> Result<Value, ErrorKind> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ErrorKind::syntax("empty expression"));
    }

    // 1. Empty quoted literal.
    if s == "\"\"" || s == "''" {
        return Ok(Value::String(String::new()));
    }

    // 2. List literal.
    if s.starts_with('[') && s.ends_with(']') && brackets_wrap_whole(s) {
        let inner = &s[1..s.len() - 1];
        if inner.trim().is_empty() {
            return Ok(Value::new_list(Vec::new()));
        }
        let mut items = Vec::new();
        for part in split_top_level(inner, ',') {
            items.push(eval_expr(&part, env)?);
        }
        return Ok(Value::new_list(items));
    }

    // 3. Binary arithmetic: rightmost operator at a position > 0.
    if let Some((idx, op)) = rfind_top_level_operator(s) {
        let left = s[..idx].trim();
        let right = s[idx + op.len_utf8()..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(ErrorKind::syntax(format!("'{}' has a missing operand", s)));
        }
        let lhs = eval_expr(left, env)?;
        let rhs = eval_expr(right, env)?;
        return match op {
            '+' => lhs.add(&rhs),
            '-' => lhs.sub(&rhs),
            '*' => lhs.mul(&rhs),
            '/' => lhs.div(&rhs),
            _ => unreachable!("rfind_top_level_operator only yields + - * /"),
        };
    }

    // 4. String literal.
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return Ok(Value::String(s[1..s.len() - 1].to_string()));
    }

    // 5. Integer literal.
    if is_integer_literal(s) {
        return s
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| ErrorKind::syntax(format!("'{}' is not a valid integer", s)));
    }

    // 6. Indexed access: name[expr].
    if let Some((name, index_expr)) = parse_indexed_access(s) {
        let target = env.lookup(name)?;
        let index_value = eval_expr(index_expr, env)?;
        let index = match index_value {
            Value::Integer(i) => i,
            other => {
                return Err(ErrorKind::type_error(format!(
                    "list index must be an integer, got {}",
                    other.type_name()
                )))
            }
        };
        return match target {
            Value::List(handle) => {
                let items = handle.borrow();
                if index < 1 || index as usize > items.len() {
                    Err(ErrorKind::IndexOutOfRange {
                        index,
                        length: items.len(),
                    })
                } else {
                    Ok(items[(index - 1) as usize].clone())
                }
            }
            other => Err(ErrorKind::type_error(format!("'{}' is not a list, it is a {}", name, other.type_name()))),
        };
    }

    // 7. Identifier.
    if is_identifier(s) {
        return env.lookup(s);
    }

    // 8. Nothing matched.
    Err(ErrorKind::syntax(format!("unknown expression '{}'", s)))
}

/// Comparison operators recognized in `if`/`while` conditions (spec §4.A).
/// Unlike the expression grammar, these only ever appear in a condition
/// position — the expression evaluator itself never recognizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Evaluates `lhs OP rhs` to a boolean, where `OP` is one of
/// `is`, `==`, `<`, `<=`, `>`, `>=`.
pub fn evaluate_condition(input: &str, env: &Environment) -> Result<bool, ErrorKind> {
    let (lhs, op, rhs) = split_condition(input)?;
    let lhs_value = eval_expr(&lhs, env)?;
    let rhs_value = eval_expr(&rhs, env)?;
    match op {
        CompOp::Eq => Ok(lhs_value.values_equal(&rhs_value)),
        CompOp::Lt => Ok(lhs_value.compare(&rhs_value)? == Ordering::Less),
        CompOp::Le => Ok(lhs_value.compare(&rhs_value)? != Ordering::Greater),
        CompOp::Gt => Ok(lhs_value.compare(&rhs_value)? == Ordering::Greater),
        CompOp::Ge => Ok(lhs_value.compare(&rhs_value)? != Ordering::Less),
    }
}

fn split_condition(input: &str) -> Result<(String, CompOp, String), ErrorKind> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let mut in_string = false;
    let mut depth: i32 = 0;
    let mut i = 0;

    while i < s.len() {
        let ch = s[i..].chars().next().unwrap();
        if ch == '"' {
            in_string = !in_string;
            i += ch.len_utf8();
            continue;
        }
        if !in_string {
            if depth == 0 {
                if let Some(op) = match_operator_at(s, bytes, i) {
                    let (op_char_len, kind) = op;
                    let lhs = s[..i].trim().to_string();
                    let rhs = s[i + op_char_len..].trim().to_string();
                    return Ok((lhs, kind, rhs));
                }
            }
            if ch == '[' {
                depth += 1;
            } else if ch == ']' {
                depth -= 1;
            }
        }
        i += ch.len_utf8();
    }

    Err(ErrorKind::syntax(format!("'{}' is not a valid condition", s)))
}

fn match_operator_at(s: &str, bytes: &[u8], i: usize) -> Option<(usize, CompOp)> {
    let rest = &s[i..];
    if rest.starts_with(">=") {
        return Some((2, CompOp::Ge));
    }
    if rest.starts_with("<=") {
        return Some((2, CompOp::Le));
    }
    if rest.starts_with("==") {
        return Some((2, CompOp::Eq));
    }
    if rest.starts_with('>') {
        return Some((1, CompOp::Gt));
    }
    if rest.starts_with('<') {
        return Some((1, CompOp::Lt));
    }
    if rest.starts_with("is") {
        let before_ok = i == 0 || !is_ident_byte(bytes[i - 1]);
        let after = i + 2;
        let after_ok = after >= s.len() || !is_ident_byte(bytes[after]);
        if before_ok && after_ok {
            return Some((2, CompOp::Eq));
        }
    }
    None
}

/// True when `s` starts and ends with brackets that are each other's match
/// (i.e. the outer `[`/`]` wrap the whole string, not just a prefix/suffix).
fn brackets_wrap_whole(s: &str) -> bool {
    let mut depth = 0i32;
    let mut in_string = false;
    for (idx, ch) in s.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return idx == s.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// Splits an assignment target into `(name, Some(index_expr))` for
/// `name[expr]` or `(name, None)` for a bare identifier. Used by the `set`
/// and `append` statement executors.
pub fn parse_assignment_target(s: &str) -> (&str, Option<&str>) {
    match parse_indexed_access(s) {
        Some((name, index_expr)) => (name, Some(index_expr)),
        None => (s, None),
    }
}

fn parse_indexed_access(s: &str) -> Option<(&str, &str)> {
    if !s.ends_with(']') {
        return None;
    }
    let open = s.find('[')?;
    let name = &s[..open];
    if name.is_empty() || !is_identifier(name) {
        return None;
    }

    let mut depth = 1;
    let mut in_string = false;
    for (offset, ch) in s[open + 1..].char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    let close = open + 1 + offset;
                    if close != s.len() - 1 {
                        return None;
                    }
                    return Some((name, &s[open + 1..close]));
                }
            }
            _ => {}
        }
    }
    None
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(bindings: &[(&str, Value)]) -> Environment {
        let mut env = Environment::new();
        for (name, value) in bindings {
            env.define(*name, value.clone());
        }
        env
    }

    #[test]
    fn integer_literals_parse_with_optional_sign() {
        let env = Environment::new();
        assert!(matches!(eval_expr("42", &env), Ok(Value::Integer(42))));
        assert!(matches!(eval_expr("-7", &env), Ok(Value::Integer(-7))));
    }

    #[test]
    fn string_literal_strips_quotes_without_escape_processing() {
        let env = Environment::new();
        assert_eq!(eval_expr(r#""hello""#, &env).unwrap(), Value::String("hello".to_string()));
    }

    #[test]
    fn empty_quoted_literals_yield_empty_string() {
        let env = Environment::new();
        assert_eq!(eval_expr("\"\"", &env).unwrap(), Value::String(String::new()));
        assert_eq!(eval_expr("''", &env).unwrap(), Value::String(String::new()));
    }

    #[test]
    fn rightmost_operator_split_is_left_associative() {
        let env = env_with(&[("a", Value::Integer(10))]);
        // 10 - 3 - 2 should split at the rightmost '-': "10 - 3" minus "2" => 5
        assert!(matches!(eval_expr("a - 3 - 2", &env), Ok(Value::Integer(5))));
    }

    #[test]
    fn identifier_resolves_via_environment() {
        let env = env_with(&[("x", Value::Integer(5))]);
        assert!(matches!(eval_expr("x", &env), Ok(Value::Integer(5))));
    }

    #[test]
    fn list_literal_recursively_evaluates_elements() {
        let env = Environment::new();
        let result = eval_expr("[1, 2, 3]", &env).unwrap();
        assert_eq!(format!("{}", result), "[1, 2, 3]");
    }

    #[test]
    fn nested_list_literal_respects_bracket_depth() {
        let env = Environment::new();
        let result = eval_expr("[1, [2, 3], 4]", &env).unwrap();
        assert_eq!(format!("{}", result), "[1, [2, 3], 4]");
    }

    #[test]
    fn indexed_access_is_one_based() {
        let env = env_with(&[("xs", Value::new_list(vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)]))]);
        assert!(matches!(eval_expr("xs[1]", &env), Ok(Value::Integer(10))));
        assert!(matches!(eval_expr("xs[3]", &env), Ok(Value::Integer(30))));
    }

    #[test]
    fn indexed_access_out_of_range_is_an_error() {
        let env = env_with(&[("xs", Value::new_list(vec![Value::Integer(1)]))]);
        assert!(eval_expr("xs[0]", &env).is_err());
        assert!(eval_expr("xs[2]", &env).is_err());
    }

    #[test]
    fn unknown_expression_is_a_syntax_error() {
        let env = Environment::new();
        assert!(eval_expr("@@@", &env).is_err());
    }

    #[test]
    fn string_concatenation_via_plus() {
        let env = env_with(&[("name", Value::String("Mewar".to_string()))]);
        let result = eval_expr(r#""Hello, " + name"#, &env).unwrap();
        assert_eq!(format!("{}", result), "Hello, Mewar");
    }

    #[test]
    fn condition_supports_is_and_relational_operators() {
        let env = env_with(&[("x", Value::Integer(10))]);
        assert!(evaluate_condition("x is 10", &env).unwrap());
        assert!(evaluate_condition("x > 5", &env).unwrap());
        assert!(!evaluate_condition("x < 5", &env).unwrap());
        assert!(evaluate_condition("x >= 10", &env).unwrap());
        assert!(evaluate_condition("x <= 10", &env).unwrap());
    }

    #[test]
    fn condition_is_keyword_is_not_confused_with_identifiers() {
        let env = env_with(&[("island", Value::Integer(1)), ("is_ready", Value::Integer(1))]);
        // "is" inside identifiers must not be mistaken for the operator.
        assert!(evaluate_condition("island is 1", &env).unwrap());
        assert!(evaluate_condition("is_ready is 1", &env).unwrap());
    }

    #[test]
    fn comparison_between_incompatible_kinds_is_rejected() {
        let env = env_with(&[("xs", Value::new_list(vec![]))]);
        assert!(evaluate_condition("xs > 1", &env).is_err());
    }
}
