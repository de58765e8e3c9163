/// A malformed token pattern, with the character offset where parsing failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("position {position}: {type}")]
pub struct RegexParseError {
	pub position: usize,
	pub r#type:   RegexErrorType,
}

impl RegexParseError {
	pub fn new(position: usize, r#type: RegexErrorType) -> Self { Self { position, r#type } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexErrorType {
	/// `(` without a matching `)`.
	UnmatchedParenthesis,
	/// `[` without a matching `]`.
	UnmatchedBracket,
	/// A `)` or other character left over after the whole pattern was parsed.
	UnexpectedCharacter(char),
	/// A quantifier with nothing in front of it.
	NothingToRepeat(char),
	/// `[]` or `[^]`.
	EmptyClass,
	/// A range whose end sorts before its start, like `z-a`.
	InvalidRange(char, char),
	/// A backslash at the very end of the pattern.
	TrailingEscape,
}

impl std::fmt::Display for RegexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use RegexErrorType::*;
		match self {
			UnmatchedParenthesis => write!(f, "Unmatched '('"),
			UnmatchedBracket => write!(f, "Unmatched '['"),
			UnexpectedCharacter(c) => write!(f, "Unexpected character {c:?}"),
			NothingToRepeat(c) => write!(f, "Nothing to repeat before {c:?}"),
			EmptyClass => write!(f, "Empty character class"),
			InvalidRange(start, end) => write!(f, "Invalid range {start:?}-{end:?}"),
			TrailingEscape => write!(f, "Trailing escape"),
		}
	}
}
