use crate::constants::LIST_SEPARATOR;
use crate::error::InputError;

/// Parse a single integer field, ignoring surrounding whitespace.
pub fn parse_int(field: &str) -> Result<i64, InputError> {
    parse_token(field, 0)
}

/// Parse a comma-separated list of integers, e.g. a page reference string
/// or a list of segment sizes.
///
/// Every field must hold an integer: `"1,,2"` and `""` are both rejected.
pub fn parse_int_list(line: &str) -> Result<Vec<i64>, InputError> {
    line.split(LIST_SEPARATOR)
        .enumerate()
        .map(|(position, token)| parse_token(token, position))
        .collect()
}

fn parse_token(token: &str, position: usize) -> Result<i64, InputError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyField { position });
    }
    trimmed
        .parse()
        .map_err(|source| InputError::InvalidInteger { token: trimmed.to_string(), source })
}
