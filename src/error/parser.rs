use crate::scanner::{Token, TokenKind};

/// A recoverable syntax error. The parser records it and resynchronizes.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}, column {col}: {type} (token {kind} '{lexeme}')")]
pub struct ParseError {
	pub line:   usize,
	pub col:    usize,
	pub kind:   TokenKind,
	pub lexeme: String,
	pub r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(token: &Token, r#type: ParseErrorType) -> Self {
		Self { line: token.line, col: token.col, kind: token.kind, lexeme: token.lexeme.clone(), r#type }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	/// One of the listed token kinds was required.
	Expected { expected: Vec<TokenKind>, found: TokenKind },
	ExpectedExpression(TokenKind),
	InvalidAssignmentTarget,
	InvalidNumber,
	/// `try` without `catch` or `finally`.
	MissingCatchOrFinally,
	/// A `}` with no open block.
	UnmatchedBrace,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			Expected { expected, found } => {
				let expected = expected.iter().map(|kind| kind.name()).collect::<Vec<_>>().join(" or ");
				write!(f, "Expected {expected}, found {found}")
			}
			ExpectedExpression(found) => {
				write!(f, "Expected expression, found {found}")
			}
			InvalidAssignmentTarget => {
				write!(f, "Invalid assignment target")
			}
			InvalidNumber => {
				write!(f, "Invalid number literal")
			}
			MissingCatchOrFinally => {
				write!(f, "Expected 'catch' or 'finally' after try block")
			}
			UnmatchedBrace => {
				write!(f, "Unmatched '}}'")
			}
		}
	}
}
