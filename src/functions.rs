// ABOUTME: Function table and call frames: pre-scan registration of user
// ABOUTME: functions, parameter binding, and return-value plumbing (spec §3.3,
// ABOUTME: §3.5, §4.G).

use crate::lexer::classify_line;
use crate::text::{find_word_outside_quotes, split_top_level};
use std::collections::HashMap;

/// A registered function: where its body begins and its parameter names.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub body_start_line: usize,
    pub parameter_names: Vec<String>,
}

/// Name → definition, populated once before execution by [`prescan_functions`].
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionTable {
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }
}

/// A pending user-function invocation (spec §3.5).
#[derive(Debug)]
pub struct CallFrame {
    pub return_pc: usize,
    pub target_binding: Option<String>,
}

/// Parses the tail of a `function NAME [with P1, P2, …] then` header into
/// its name and parameter list.
fn parse_function_header(tail: &str) -> (String, Vec<String>) {
    let tail = tail.strip_suffix("then").unwrap_or(tail).trim();
    match find_word_outside_quotes(tail, "with") {
        Some(idx) => {
            let name = tail[..idx].trim();
            let params = split_top_level(tail[idx + 4..].trim(), ',')
                .into_iter()
                .filter(|p| !p.is_empty())
                .collect();
            (name.to_string(), params)
        }
        None => (tail.trim().to_string(), Vec::new()),
    }
}

/// Visits every physical line in order, registering each `function` header
/// found (spec §4.G). Duplicate names: last definition wins.
pub fn prescan_functions(lines: &[String]) -> FunctionTable {
    let mut functions = HashMap::new();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(classified) = classify_line(line) {
            if classified.command == "function" {
                let (name, parameter_names) = parse_function_header(classified.tail);
                functions.insert(
                    name,
                    FunctionDef {
                        body_start_line: idx + 1,
                        parameter_names,
                    },
                );
            }
        }
    }
    FunctionTable { functions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(|s| s.to_string()).collect()
    }

    #[test]
    fn registers_a_function_with_parameters() {
        let table = prescan_functions(&lines("function greet with name, greeting then\nsay name\nend"));
        let def = table.get("greet").unwrap();
        assert_eq!(def.body_start_line, 1);
        assert_eq!(def.parameter_names, vec!["name", "greeting"]);
    }

    #[test]
    fn registers_a_function_with_no_parameters() {
        let table = prescan_functions(&lines("function noop then\nend"));
        let def = table.get("noop").unwrap();
        assert_eq!(def.parameter_names.len(), 0);
    }

    #[test]
    fn duplicate_definitions_last_one_wins() {
        let table = prescan_functions(&lines(
            "function f then\nsay 1\nend\nfunction f with x then\nsay x\nend",
        ));
        let def = table.get("f").unwrap();
        assert_eq!(def.parameter_names, vec!["x"]);
        assert_eq!(def.body_start_line, 4);
    }

    #[test]
    fn unknown_function_is_none() {
        let table = prescan_functions(&lines("say 1"));
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn function_name_merely_containing_with_is_not_mistaken_for_the_clause() {
        let table = prescan_functions(&lines("function withdraw then\nend"));
        let def = table.get("withdraw").unwrap();
        assert_eq!(def.parameter_names.len(), 0);
        assert!(table.get("").is_none());
    }
}
