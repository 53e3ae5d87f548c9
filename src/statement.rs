//! # Statement Preparation
//!
//! Turns one input line into a [`Statement`] or a user-facing diagnostic.
//! The language has exactly two statements and no clauses:
//!
//! ```text
//! insert <id> <username> <email>
//! select
//! ```
//!
//! Tokens are whitespace-separated; anything after the tokens a statement
//! consumes is ignored. The id parses with strtol semantics: an optional
//! sign, then leading digits, trailing junk ignored, no digits at all
//! reading as zero. Negative ids and overlong strings are rejected here,
//! before any storage is touched.

use std::fmt;
use std::str::SplitWhitespace;

use crate::config::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE};
use crate::row::Row;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// User errors from statement preparation. `Display` renders the exact
/// REPL diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    SyntaxError,
    NegativeId,
    StringTooLong,
    UnrecognizedStatement(String),
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::SyntaxError => write!(f, "Syntax error. Could not parse statement."),
            PrepareError::NegativeId => write!(f, "ID must be positive."),
            PrepareError::StringTooLong => write!(f, "String is too long."),
            PrepareError::UnrecognizedStatement(line) => {
                write!(f, "Unrecognized keyword at start of '{line}'.")
            }
        }
    }
}

impl std::error::Error for PrepareError {}

pub fn prepare(line: &str) -> Result<Statement, PrepareError> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("insert") => prepare_insert(tokens),
        Some("select") => Ok(Statement::Select),
        _ => Err(PrepareError::UnrecognizedStatement(line.to_string())),
    }
}

fn prepare_insert(mut tokens: SplitWhitespace<'_>) -> Result<Statement, PrepareError> {
    let (Some(id), Some(username), Some(email)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(PrepareError::SyntaxError);
    };

    let id = parse_id(id);
    if id < 0 {
        return Err(PrepareError::NegativeId);
    }
    if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
        return Err(PrepareError::StringTooLong);
    }

    let id = id.min(u32::MAX as i64) as u32;
    Ok(Statement::Insert(Row::new(id, username, email)))
}

/// strtol-style integer parse: optional sign, leading digits, everything
/// after the digits ignored. Saturates instead of overflowing.
fn parse_id(token: &str) -> i64 {
    let bytes = token.as_bytes();
    let mut pos = 0;
    let mut negative = false;
    match bytes.first() {
        Some(b'+') => pos = 1,
        Some(b'-') => {
            negative = true;
            pos = 1;
        }
        _ => {}
    }

    let mut value: i64 = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add((bytes[pos] - b'0') as i64);
        pos += 1;
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_with_three_arguments_parses() {
        let statement = prepare("insert 1 alice alice@example.com").unwrap();

        let Statement::Insert(row) = statement else {
            panic!("expected an insert");
        };
        assert_eq!(row.id(), 1);
        assert_eq!(row.username(), "alice");
        assert_eq!(row.email(), "alice@example.com");
    }

    #[test]
    fn select_parses() {
        assert_eq!(prepare("select").unwrap(), Statement::Select);
    }

    #[test]
    fn select_ignores_trailing_tokens() {
        assert_eq!(prepare("select * from users").unwrap(), Statement::Select);
    }

    #[test]
    fn insert_ignores_trailing_tokens() {
        let statement = prepare("insert 1 a b extra tokens").unwrap();

        assert!(matches!(statement, Statement::Insert(_)));
    }

    #[test]
    fn missing_arguments_are_a_syntax_error() {
        assert_eq!(prepare("insert 1").unwrap_err(), PrepareError::SyntaxError);
        assert_eq!(prepare("insert").unwrap_err(), PrepareError::SyntaxError);
    }

    #[test]
    fn negative_id_is_rejected() {
        assert_eq!(
            prepare("insert -1 a b").unwrap_err(),
            PrepareError::NegativeId
        );
    }

    #[test]
    fn overlong_username_is_rejected() {
        let username = "u".repeat(33);
        assert_eq!(
            prepare(&format!("insert 1 {username} e@x")).unwrap_err(),
            PrepareError::StringTooLong
        );
    }

    #[test]
    fn overlong_email_is_rejected() {
        let email = "e".repeat(256);
        assert_eq!(
            prepare(&format!("insert 1 u {email}")).unwrap_err(),
            PrepareError::StringTooLong
        );
    }

    #[test]
    fn username_of_exactly_32_bytes_is_accepted() {
        let username = "u".repeat(32);
        assert!(prepare(&format!("insert 1 {username} e@x")).is_ok());
    }

    #[test]
    fn unknown_keyword_echoes_the_line() {
        let err = prepare("foo").unwrap_err();

        assert_eq!(err.to_string(), "Unrecognized keyword at start of 'foo'.");
    }

    #[test]
    fn empty_line_is_unrecognized() {
        assert_eq!(
            prepare("").unwrap_err(),
            PrepareError::UnrecognizedStatement(String::new())
        );
    }

    #[test]
    fn repeated_spaces_between_tokens_are_fine() {
        assert!(prepare("insert  1   a  b").is_ok());
    }

    #[test]
    fn id_parses_like_strtol() {
        assert_eq!(parse_id("123"), 123);
        assert_eq!(parse_id("+7"), 7);
        assert_eq!(parse_id("-5"), -5);
        assert_eq!(parse_id("12abc"), 12);
        assert_eq!(parse_id("abc"), 0);
        assert_eq!(parse_id("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn id_above_u32_max_clamps() {
        let Statement::Insert(row) = prepare("insert 99999999999 a b").unwrap() else {
            panic!("expected an insert");
        };
        assert_eq!(row.id(), u32::MAX);
    }
}
