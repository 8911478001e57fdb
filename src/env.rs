// ABOUTME: Environment module: a stack of scopes implementing lexical lookup,
// ABOUTME: assignment, and indexed list assignment (spec §3.2, §4.C).

use crate::error::ErrorKind;
use crate::value::Value;
use std::collections::HashMap;

/// A stack of scopes. Index 0 is the global scope; the stack is never empty.
///
/// Unlike a parent-linked environment, `Environment` is a flat `Vec` of
/// scopes: function calls push one fresh scope for parameters (spec §3.2),
/// there is no closure chain beyond that single level.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<HashMap<String, Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the global scope");
        self.scopes.pop();
    }

    /// Defines `name` in the innermost scope unconditionally (used to bind
    /// call parameters and loop iterator variables).
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.scopes
            .last_mut()
            .expect("environment always has at least the global scope")
            .insert(name.into(), value);
    }

    /// Resolution scans scopes innermost-first and returns the first hit.
    pub fn lookup(&self, name: &str) -> Result<Value, ErrorKind> {
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.get(name) {
                return Ok(value.clone());
            }
        }
        Err(ErrorKind::NameNotFound(name.to_string()))
    }

    /// Assignment rule (spec §3.2): update the innermost scope that already
    /// binds `name`; otherwise create the binding in the innermost scope.
    pub fn assign(&mut self, name: &str, value: Value) {
        for scope in self.scopes.iter_mut().rev() {
            if scope.contains_key(name) {
                scope.insert(name.to_string(), value);
                return;
            }
        }
        self.define(name, value);
    }

    /// Assigns `value` into the 1-based `index` slot of the list bound to
    /// `list_name` (spec §4.C).
    pub fn assign_indexed(&mut self, list_name: &str, index: i64, value: Value) -> Result<(), ErrorKind> {
        let target = self.lookup(list_name)?;
        match target {
            Value::List(handle) => {
                let mut items = handle.borrow_mut();
                let len = items.len();
                if index < 1 || index as usize > len {
                    return Err(ErrorKind::IndexOutOfRange { index, length: len });
                }
                items[(index - 1) as usize] = value;
                Ok(())
            }
            other => Err(ErrorKind::type_error(format!(
                "'{}' is not a list, it is a {}",
                list_name,
                other.type_name()
            ))),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_lookup_in_global_scope() {
        let mut env = Environment::new();
        env.define("x", Value::Integer(42));
        assert!(matches!(env.lookup("x"), Ok(Value::Integer(42))));
    }

    #[test]
    fn lookup_missing_name_is_name_not_found() {
        let env = Environment::new();
        assert_eq!(env.lookup("missing"), Err(ErrorKind::NameNotFound("missing".to_string())));
    }

    #[test]
    fn parameter_shadows_global_only_inside_its_scope() {
        let mut env = Environment::new();
        env.define("x", Value::Integer(1));

        env.push_scope();
        env.define("x", Value::Integer(100));
        assert!(matches!(env.lookup("x"), Ok(Value::Integer(100))));
        env.pop_scope();

        assert!(matches!(env.lookup("x"), Ok(Value::Integer(1))));
    }

    #[test]
    fn assign_updates_innermost_existing_binding() {
        let mut env = Environment::new();
        env.define("x", Value::Integer(1));
        env.push_scope();
        env.assign("x", Value::Integer(2));
        assert!(matches!(env.lookup("x"), Ok(Value::Integer(2))));
        env.pop_scope();
        // The global scope was updated since no inner scope shadowed `x`.
        assert!(matches!(env.lookup("x"), Ok(Value::Integer(2))));
    }

    #[test]
    fn assign_with_no_existing_binding_creates_one_in_innermost_scope() {
        let mut env = Environment::new();
        env.push_scope();
        env.assign("y", Value::Integer(9));
        assert!(matches!(env.lookup("y"), Ok(Value::Integer(9))));
        env.pop_scope();
        assert_eq!(env.lookup("y"), Err(ErrorKind::NameNotFound("y".to_string())));
    }

    #[test]
    fn assign_indexed_mutates_list_in_place() {
        let mut env = Environment::new();
        env.define("xs", Value::new_list(vec![Value::Integer(10), Value::Integer(20)]));
        env.assign_indexed("xs", 2, Value::Integer(99)).unwrap();
        assert_eq!(format!("{}", env.lookup("xs").unwrap()), "[10, 99]");
    }

    #[test]
    fn assign_indexed_out_of_range_is_rejected() {
        let mut env = Environment::new();
        env.define("xs", Value::new_list(vec![Value::Integer(1)]));
        assert_eq!(
            env.assign_indexed("xs", 5, Value::Integer(0)),
            Err(ErrorKind::IndexOutOfRange { index: 5, length: 1 })
        );
    }

    #[test]
    fn assign_indexed_on_non_list_is_type_error() {
        let mut env = Environment::new();
        env.define("x", Value::Integer(1));
        assert!(env.assign_indexed("x", 1, Value::Integer(0)).is_err());
    }
}
