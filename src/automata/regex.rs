//! A small regex compiler that emits Thompson fragments while it parses.
//!
//! | Feature         | Syntax                      |
//! |-----------------|-----------------------------|
//! | Literal         | `a`, `1`, `_`               |
//! | Any printable   | `.`                         |
//! | Class           | `[abc]`, `[a-z]`, `[^"\n]`  |
//! | Escape          | `\n` `\t` `\r`, `\x` for any other `x` |
//! | Group           | `(...)`                     |
//! | Alternation     | `a|b`                       |
//! | Quantifiers     | `*` `+` `?`                 |
//!
//! The grammar, top down:
//!
//! ```text
//! alternation   → concatenation ( "|" concatenation )*
//! concatenation → repetition*
//! repetition    → atom ( "*" | "+" | "?" )*
//! atom          → "(" alternation ")" | "[" "^"? item+ "]" | "." | escape | literal
//! ```
//!
//! Negated classes and `.` range over printable ASCII only.
use std::collections::BTreeSet;

use super::{Fragment, Nfa, printable};
use crate::{RegexErrorType, RegexParseError, TokenKind};

/// Parses one pattern into a fragment of an existing NFA.
pub struct RegexBuilder<'a> {
	nfa:     &'a mut Nfa,
	pattern: Vec<char>,
	/// Index into `pattern` of the next character
	cursor:  usize,
}

impl<'a> RegexBuilder<'a> {
	pub fn new(nfa: &'a mut Nfa, pattern: &str) -> Self { Self { nfa, pattern: pattern.chars().collect(), cursor: 0 } }

	/// Parse the whole pattern. Leftover input, like an unopened `)`, is an error.
	pub fn parse(mut self) -> Result<Fragment, RegexParseError> {
		let fragment = self.alternation()?;
		match self.peek() {
			Some(c) => Err(self.error(RegexErrorType::UnexpectedCharacter(c))),
			None => Ok(fragment),
		}
	}

	fn alternation(&mut self) -> Result<Fragment, RegexParseError> {
		let mut fragment = self.concatenation()?;
		while self.match_next('|') {
			let right = self.concatenation()?;
			fragment = self.nfa.alternate(fragment, right);
		}
		Ok(fragment)
	}

	fn concatenation(&mut self) -> Result<Fragment, RegexParseError> {
		let mut fragment: Option<Fragment> = None;
		while self.peek().is_some_and(|c| c != '|' && c != ')') {
			let next = self.repetition()?;
			fragment = Some(match fragment {
				Some(previous) => self.nfa.concat(previous, next),
				None => next,
			});
		}
		Ok(fragment.unwrap_or_else(|| self.nfa.empty()))
	}

	fn repetition(&mut self) -> Result<Fragment, RegexParseError> {
		let mut fragment = self.atom()?;
		loop {
			fragment = match self.peek() {
				Some('*') => self.nfa.star(fragment),
				Some('+') => self.nfa.plus(fragment),
				Some('?') => self.nfa.optional(fragment),
				_ => return Ok(fragment),
			};
			self.cursor += 1;
		}
	}

	fn atom(&mut self) -> Result<Fragment, RegexParseError> {
		let start = self.cursor;
		let Some(c) = self.advance() else {
			return Ok(self.nfa.empty());
		};
		match c {
			'(' => {
				let inside = self.alternation()?;
				if !self.match_next(')') {
					return Err(RegexParseError::new(start, RegexErrorType::UnmatchedParenthesis));
				}
				Ok(inside)
			}
			'[' => {
				let chars = self.class(start)?;
				Ok(self.nfa.class(chars))
			}
			'.' => Ok(self.nfa.class(printable())),
			'\\' => {
				let c = self.escape()?;
				Ok(self.nfa.literal(c))
			}
			'*' | '+' | '?' => Err(RegexParseError::new(start, RegexErrorType::NothingToRepeat(c))),
			c => Ok(self.nfa.literal(c)),
		}
	}

	/// The members of a `[...]` class, the opening `[` already consumed.
	fn class(&mut self, start: usize) -> Result<BTreeSet<char>, RegexParseError> {
		let negated = self.match_next('^');
		let mut chars = BTreeSet::new();
		loop {
			let Some(c) = self.advance() else {
				return Err(RegexParseError::new(start, RegexErrorType::UnmatchedBracket));
			};
			if c == ']' {
				break;
			}
			let low = if c == '\\' { self.escape()? } else { c };
			// A `-` right before the closing `]` is a literal.
			if self.peek() == Some('-') && self.peek_second().is_some_and(|c| c != ']') {
				self.cursor += 1;
				let high = match self.advance() {
					Some('\\') => self.escape()?,
					Some(c) => c,
					None => return Err(RegexParseError::new(start, RegexErrorType::UnmatchedBracket)),
				};
				if high < low {
					return Err(self.error(RegexErrorType::InvalidRange(low, high)));
				}
				chars.extend(low..=high);
			} else {
				chars.insert(low);
			}
		}
		if chars.is_empty() {
			return Err(RegexParseError::new(start, RegexErrorType::EmptyClass));
		}
		if negated {
			chars = printable().filter(|c| !chars.contains(c)).collect();
		}
		Ok(chars)
	}

	/// The character after a backslash.
	fn escape(&mut self) -> Result<char, RegexParseError> {
		let c = self.advance().ok_or_else(|| self.error(RegexErrorType::TrailingEscape))?;
		Ok(match c {
			'n' => '\n',
			't' => '\t',
			'r' => '\r',
			c => c,
		})
	}

	fn match_next(&mut self, expected: char) -> bool {
		if self.peek() != Some(expected) {
			return false;
		}
		self.cursor += 1;
		true
	}

	fn advance(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.cursor += 1;
		Some(c)
	}

	fn peek(&self) -> Option<char> { self.pattern.get(self.cursor).copied() }

	fn peek_second(&self) -> Option<char> { self.pattern.get(self.cursor + 1).copied() }

	fn error(&self, r#type: RegexErrorType) -> RegexParseError { RegexParseError::new(self.cursor, r#type) }
}

/// Compile a single pattern into its own NFA whose end state accepts `label`.
pub fn compile(pattern: &str, label: TokenKind) -> Result<Nfa, RegexParseError> {
	let mut nfa = Nfa::new();
	let fragment = RegexBuilder::new(&mut nfa, pattern).parse()?;
	nfa.start = fragment.start;
	nfa.accept(fragment.end, label);
	Ok(nfa)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matches(pattern: &str, input: &str) -> bool {
		compile(pattern, TokenKind::Identifier).unwrap().accepts(input).is_some()
	}

	fn error(pattern: &str) -> RegexErrorType { compile(pattern, TokenKind::Identifier).unwrap_err().r#type }

	#[test]
	fn literals_and_groups() {
		assert!(matches("abc", "abc"));
		assert!(!matches("abc", "ab"));
		assert!(matches("(ab)*c", "ababc"));
		assert!(matches("a(b|c)d", "acd"));
		assert!(!matches("a(b|c)d", "ad"));
		assert!(matches("", ""));
		assert!(matches("a|", ""));
		assert!(matches("()", ""));
	}

	#[test]
	fn quantifiers() {
		assert!(matches("a+b?", "aaa"));
		assert!(matches("a+b?", "ab"));
		assert!(!matches("a+b?", "b"));
		assert!(matches("a*?", ""));
	}

	#[test]
	fn classes() {
		assert!(matches("[a-c]+", "abcba"));
		assert!(!matches("[a-c]", "d"));
		assert!(matches("[^a]", "b"));
		assert!(!matches("[^a]", "a"));
		// Negation ranges over printable ASCII, so control characters never match.
		assert!(!matches("[^a]", "\t"));
		assert!(matches("[+\\-]", "-"));
		assert!(matches("[a-]", "-"));
		assert!(matches(r"[ \t]", "\t"));
		assert!(matches(".", "~"));
		assert!(!matches(".", "\n"));
	}

	#[test]
	fn escapes() {
		// An escaped metacharacter matches itself, not the backslash.
		assert!(matches(r"\.", "."));
		assert!(!matches(r"\.", "\\"));
		assert!(matches(r"\$\{", "${"));
		assert!(matches(r"\\", "\\"));
		assert!(matches(r"\n", "\n"));
	}

	#[test]
	fn malformed_patterns() {
		assert_eq!(error("(ab"), RegexErrorType::UnmatchedParenthesis);
		assert_eq!(error("ab)"), RegexErrorType::UnexpectedCharacter(')'));
		assert_eq!(error("[ab"), RegexErrorType::UnmatchedBracket);
		assert_eq!(error("*a"), RegexErrorType::NothingToRepeat('*'));
		assert_eq!(error("a|+"), RegexErrorType::NothingToRepeat('+'));
		assert_eq!(error("[]"), RegexErrorType::EmptyClass);
		assert_eq!(error("[z-a]"), RegexErrorType::InvalidRange('z', 'a'));
		assert_eq!(error("ab\\"), RegexErrorType::TrailingEscape);
	}

	#[test]
	fn error_position() {
		let error = compile("ab)", TokenKind::Identifier).unwrap_err();
		assert_eq!(error.position, 2);
	}
}
