/// A lexing failure with the position where scanning stopped.
///
/// Lexing is not recoverable: the first error aborts the whole tokenization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}, column {col}: {type} {lexeme:?}")]
pub struct LexError {
	/// The line number where the error occurred.
	pub line:   usize,
	/// The column number where the error occurred.
	pub col:    usize,
	/// The offending text.
	pub lexeme: String,
	/// The type of lexing error.
	pub r#type: LexErrorType,
}

impl LexError {
	pub fn new(line: usize, col: usize, lexeme: impl Into<String>, r#type: LexErrorType) -> Self {
		Self { line, col, lexeme: lexeme.into(), r#type }
	}
}

/// Types of lexing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorType {
	/// A string literal cut off by a newline, a character outside the
	/// alphabet or the end of input.
	UnterminatedString,
	/// A backtick template without its closing backtick.
	UnterminatedTemplate,
	/// No lexical rule matches at this position.
	UnexpectedCharacter,
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			UnterminatedString => {
				write!(f, "Unterminated string")
			}
			UnterminatedTemplate => {
				write!(f, "Unterminated template string")
			}
			UnexpectedCharacter => {
				write!(f, "Unexpected character")
			}
		}
	}
}
