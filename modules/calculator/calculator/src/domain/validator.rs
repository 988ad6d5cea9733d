//! Character whitelist check applied before any parsing happens.

use super::error::DomainError;

/// Every character an expression may contain.
pub const ALLOWED_CHARS: &str = "0123456789+-*/.() ";

#[must_use]
pub fn is_allowed(c: char) -> bool {
    ALLOWED_CHARS.contains(c)
}

/// Checks `expression` against [`ALLOWED_CHARS`].
///
/// Only the character set is checked, not well-formedness. The empty string
/// passes and is rejected later by the evaluator.
///
/// # Errors
/// Returns [`DomainError::DisallowedCharacters`] with the distinct offending
/// characters in the order they first appear.
pub fn validate_expression(expression: &str) -> Result<(), DomainError> {
    let mut rejected: Vec<char> = Vec::new();
    for c in expression.chars().filter(|c| !is_allowed(*c)) {
        if !rejected.contains(&c) {
            rejected.push(c);
        }
    }

    if rejected.is_empty() {
        Ok(())
    } else {
        Err(DomainError::disallowed(rejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_allowed_character() {
        assert!(validate_expression("0123456789 + - * / . ( )").is_ok());
    }

    #[test]
    fn accepts_empty_input() {
        assert!(validate_expression("").is_ok());
    }

    #[test]
    fn rejects_letters_and_reports_each_once() {
        let err = validate_expression("abs(1) + a").unwrap_err();
        assert_eq!(err, DomainError::disallowed(vec!['a', 'b', 's']));
    }

    #[test]
    fn rejects_code_smuggling_attempts() {
        for input in [
            "__import__('os').system('id')",
            "1; DROP TABLE calculations",
            "[1]*10",
            "1\t+ 2",
            "2**9_000",
            "1e400",
            "1,5",
        ] {
            assert!(
                validate_expression(input).is_err(),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digit one
        assert!(validate_expression("\u{0661}+1").is_err());
    }
}
