//! Structural checks that run before the parser sees the input. They reject
//! the obviously broken shapes cheaply and keep pathological input (very
//! long or very deeply nested formulas) away from the recursive stages.

use crate::functions;
use crate::EvalError;
use std::collections::HashMap;

/// Maximum parenthesis nesting accepted by the pre-check.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Maximum formula length in bytes.
const MAX_FORMULA_LEN: usize = 4096;

/// Rejects formulas longer than the length cap. The parser runs this
/// too, so oversized input cannot reach the recursive stages through
/// any entry point.
pub fn check_length(input: &str) -> Result<(), EvalError> {
    if input.len() > MAX_FORMULA_LEN {
        return Err(EvalError::MalformedExpression {
            reason: "formula too long".to_string(),
        });
    }
    Ok(())
}

/// Scans the input once and verifies that every parenthesis has a partner.
///
/// Balance is established before the nesting cap is applied, so an
/// unmatched parenthesis is always reported as such even in a formula
/// that is also nested too deeply.
pub fn check_parentheses(input: &str) -> Result<(), EvalError> {
    let mut depth: usize = 0;
    let mut max_depth: usize = 0;

    for ch in input.chars() {
        match ch {
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => {
                if depth == 0 {
                    return Err(EvalError::UnmatchedParentheses);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(EvalError::UnmatchedParentheses);
    }
    if max_depth > MAX_NESTING_DEPTH {
        return Err(EvalError::MalformedExpression {
            reason: "parentheses nested too deeply".to_string(),
        });
    }
    Ok(())
}

/// Rejects inputs the grammar could never accept: characters outside the
/// formula alphabet, empty parentheses, and operators in positions where
/// no operand can follow or precede them.
pub fn check_well_formed(input: &str) -> Result<(), EvalError> {
    check_length(input)?;

    let stripped: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if stripped.is_empty() {
        return Err(EvalError::MalformedExpression {
            reason: "formula is empty".to_string(),
        });
    }

    for ch in stripped.chars() {
        let allowed = ch.is_ascii_alphanumeric()
            || matches!(ch, '.' | '_' | '+' | '-' | '*' | '/' | '(' | ')' | ',');
        if !allowed {
            return Err(EvalError::MalformedExpression {
                reason: format!("unsupported character '{}'", ch),
            });
        }
    }

    if stripped.contains("()") {
        return Err(EvalError::MalformedExpression {
            reason: "empty parentheses".to_string(),
        });
    }

    check_operator_positions(input)
}

/// Walks the operator tokens of the formula, skipping whitespace between
/// them. Only two adjacent stars form '**'; '* *' stays two tokens, like
/// any tokenizer would read it. '+' and '-' double as sign prefixes, so
/// only '*', '/' and '**' are barred from following another operator or
/// opening the formula; no operator may close it.
fn check_operator_positions(input: &str) -> Result<(), EvalError> {
    // The alphabet screen has already run, so every byte here is ASCII.
    let bytes = input.as_bytes();
    let mut previous: Option<&'static str> = None;
    let mut seen_operand = false;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let token: Option<&'static str> = match bytes[i] {
            b'*' if bytes.get(i + 1) == Some(&b'*') => Some("**"),
            b'*' => Some("*"),
            b'/' => Some("/"),
            b'+' => Some("+"),
            b'-' => Some("-"),
            _ => None,
        };

        match token {
            Some(operator) => {
                if matches!(operator, "*" | "/" | "**") {
                    if let Some(previous_operator) = previous {
                        return Err(EvalError::MalformedExpression {
                            reason: format!(
                                "operator '{}' may not follow '{}'",
                                operator, previous_operator
                            ),
                        });
                    }
                    if !seen_operand {
                        return Err(EvalError::MalformedExpression {
                            reason: format!("formula starts with '{}'", operator),
                        });
                    }
                }
                previous = Some(operator);
                i += operator.len();
            }
            None => {
                previous = None;
                seen_operand = true;
                i += 1;
            }
        }
    }

    if let Some(operator) = previous {
        return Err(EvalError::MalformedExpression {
            reason: format!("formula ends with '{}'", operator),
        });
    }
    Ok(())
}

/// Verifies every binding before evaluation starts: names must be plain
/// identifiers that do not shadow a registered function or constant, and
/// values must be finite. When several bindings are invalid, the one with
/// the alphabetically first name is reported.
pub fn check_bindings(bindings: &HashMap<String, f64>) -> Result<(), EvalError> {
    // HashMap iteration order varies between maps, so walk the entries
    // in name order to make the reported offender stable.
    let mut entries: Vec<_> = bindings.iter().collect();
    entries.sort_by_key(|(name, _)| *name);

    for (name, value) in entries {
        if !is_identifier(name) || functions::is_reserved(name) || !value.is_finite() {
            return Err(EvalError::InvalidVariable { name: name.clone() });
        }
    }
    Ok(())
}

/// True if the name is a valid variable identifier: a letter or underscore
/// followed by letters, digits or underscores.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
