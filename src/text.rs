// ABOUTME: Quote- and bracket-aware scanning primitives shared by the line
// ABOUTME: classifier, expression evaluator, and block-matching scanner.

/// Strips the first unquoted `#` and everything after it (spec §4.D).
///
/// A `#` inside a double-quoted region is not a comment marker.
pub fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..idx],
            _ => {}
        }
    }
    line
}

/// Splits `s` on occurrences of `delim` that are outside double-quoted
/// regions and outside `[...]` nesting, then trims each piece.
///
/// Grounded in the original draft's `re.split(r",\s*(?![^\[\]]*\])", ...)`
/// comma-splitter, generalized to any delimiter and to arbitrary nesting
/// depth instead of a single bracket pair.
pub fn split_top_level(s: &str, delim: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut depth: i32 = 0;

    for ch in s.chars() {
        match ch {
            '"' => {
                in_string = !in_string;
                current.push(ch);
            }
            '[' if !in_string => {
                depth += 1;
                current.push(ch);
            }
            ']' if !in_string => {
                depth -= 1;
                current.push(ch);
            }
            c if c == delim && !in_string && depth == 0 => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            c => current.push(c),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

/// Finds the rightmost position of any of `+ - * /` at a position > 0,
/// outside quoted regions and outside `[...]` nesting (spec §4.B.3).
///
/// Returns the byte offset of the operator and the operator character.
pub fn rfind_top_level_operator(s: &str) -> Option<(usize, char)> {
    let mut in_string = false;
    let mut depth: i32 = 0;
    let mut found: Option<(usize, char)> = None;

    for (idx, ch) in s.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => depth -= 1,
            '+' | '-' | '*' | '/' if !in_string && depth == 0 && idx > 0 => {
                found = Some((idx, ch));
            }
            _ => {}
        }
    }
    found
}

/// Finds the first whitespace-delimited occurrence of `word` outside quoted
/// regions, returning its byte offset.
pub fn find_word_outside_quotes(s: &str, word: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < s.len() {
        let ch = s[i..].chars().next().unwrap();
        if ch == '"' {
            in_string = !in_string;
            i += ch.len_utf8();
            continue;
        }
        if !in_string && s[i..].starts_with(word) {
            let before_ok = i == 0 || !is_ident_byte(bytes[i - 1]);
            let after = i + word.len();
            let after_ok = after >= s.len() || !is_ident_byte(bytes[after]);
            if before_ok && after_ok {
                return Some(i);
            }
        }
        i += ch.len_utf8();
    }
    None
}

/// True for bytes that can continue an identifier: alphanumeric or `_`.
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// If `s` begins with `word` as a whole token, returns the remainder after
/// it (untrimmed). Used to recognize the `ask`/`call` special-cased
/// right-hand sides of `set` (spec §4.E).
pub fn starts_with_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(word)?;
    match rest.as_bytes().first() {
        Some(&b) if is_ident_byte(b) => None,
        _ => Some(rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comment_ignores_hash_inside_string() {
        assert_eq!(strip_comment(r#"say "a # b""#), r#"say "a # b""#);
    }

    #[test]
    fn strip_comment_cuts_at_first_unquoted_hash() {
        assert_eq!(strip_comment("set x to 1 # init"), "set x to 1 ");
    }

    #[test]
    fn split_top_level_respects_quotes_and_nesting() {
        let parts = split_top_level(r#"1, "a, b", [2, 3], 4"#, ',');
        assert_eq!(parts, vec!["1", r#""a, b""#, "[2, 3]", "4"]);
    }

    #[test]
    fn rfind_operator_skips_leading_unary_minus() {
        assert_eq!(rfind_top_level_operator("-5"), None);
        assert_eq!(rfind_top_level_operator("a + b"), Some((2, '+')));
        assert_eq!(rfind_top_level_operator("a - b - c"), Some((6, '-')));
    }

    #[test]
    fn rfind_operator_ignores_operators_inside_strings_and_brackets() {
        assert_eq!(rfind_top_level_operator(r#""a+b" + c"#), Some((7, '+')));
        assert_eq!(rfind_top_level_operator("[1+2] + 3"), Some((6, '+')));
    }

    #[test]
    fn find_word_outside_quotes_matches_whole_words_only() {
        assert_eq!(find_word_outside_quotes("x is y", "is"), Some(2));
        assert_eq!(find_word_outside_quotes("thistle", "is"), None);
        assert_eq!(find_word_outside_quotes(r#""is" is x"#, "is"), Some(5));
    }

    #[test]
    fn starts_with_word_requires_a_token_boundary() {
        assert_eq!(starts_with_word("ask \"Name?\"", "ask"), Some(" \"Name?\""));
        assert_eq!(starts_with_word("asking", "ask"), None);
        assert_eq!(starts_with_word("call", "call"), Some(""));
    }
}
