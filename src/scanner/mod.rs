//! The hand-written lexer.
//!
//! At each position the lexer first skips whitespace and `//` comments, then
//! tries its rules in a fixed order: a double-quoted string or a backtick
//! template, a number, an identifier (which may turn out to be a keyword) and
//! finally the longest operator from the operator table. The first rule that matches wins, and
//! within a rule the longest lexeme wins (`maximal munch`).
//!
//! Lexing is all-or-nothing. The first character that no rule accepts aborts
//! the whole tokenization with a [`LexError`].
//!
//! Strings, templates and comments may only hold printable ASCII, tab and
//! carriage return (templates also newlines), the same alphabet the token
//! automaton is built over.
mod token;

use TokenKind::*;
pub use token::*;

use crate::{LexError, LexErrorType};

/// A scanner over ASCII source text.
pub struct Lexer<'a> {
	/// User input source code
	source: &'a str,
	/// Byte offset of the character currently being considered
	cursor: usize,
	/// Line of `cursor`, 1-based
	line:   usize,
	/// Column of `cursor`, 1-based, counted in characters
	col:    usize,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self { Self { source, cursor: 0, line: 1, col: 1 } }

	/// Scan all tokens, terminated by an EOF token at the final position.
	pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
		let mut tokens = Vec::new();
		loop {
			self.skip_trivia();
			if self.is_at_end() {
				break;
			}
			let token = self.scan_token()?;
			tokens.push(token);
		}
		tokens.push(Token::new(Eof, "EOF", self.line, self.col));
		Ok(tokens)
	}

	/// Scan a single token starting at the cursor.
	fn scan_token(&mut self) -> Result<Token, LexError> {
		let (line, col) = (self.line, self.col);
		let rest = self.rest();

		if rest.starts_with('"') {
			let Some(len) = string_len(rest) else {
				let lexeme: std::string::String = rest.chars().take(20).collect();
				return Err(LexError::new(line, col, lexeme, LexErrorType::UnterminatedString));
			};
			return Ok(self.emit(String, len, line, col));
		}

		if rest.starts_with('`') {
			let Some(len) = template_len(rest) else {
				let lexeme: std::string::String = rest.chars().take(20).collect();
				return Err(LexError::new(line, col, lexeme, LexErrorType::UnterminatedTemplate));
			};
			return Ok(self.emit(Template, len, line, col));
		}

		if let Some(len) = number_len(rest) {
			return Ok(self.emit(Number, len, line, col));
		}

		if let Some(len) = identifier_len(rest) {
			let kind = TokenKind::keyword_or_identifier(&rest[..len]);
			return Ok(self.emit(kind, len, line, col));
		}

		if let Some((text, kind)) = operators_by_length().into_iter().find(|(text, _)| rest.starts_with(text)) {
			return Ok(self.emit(kind, text.len(), line, col));
		}

		let unexpected = rest.chars().next().map(std::string::String::from).unwrap_or_default();
		Err(LexError::new(line, col, unexpected, LexErrorType::UnexpectedCharacter))
	}

	/// Build a token from the next `len` bytes and move past them.
	fn emit(&mut self, kind: TokenKind, len: usize, line: usize, col: usize) -> Token {
		let lexeme = &self.source[self.cursor..self.cursor + len];
		self.advance(len);
		Token::new(kind, lexeme, line, col)
	}

	/// Skip whitespace and `//` comments.
	fn skip_trivia(&mut self) {
		loop {
			let rest = self.rest();
			let whitespace = rest.bytes().take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')).count();
			if whitespace > 0 {
				self.advance(whitespace);
				continue;
			}
			if rest.starts_with("//") {
				let comment = rest.find(|c: char| !is_text(c)).unwrap_or(rest.len());
				self.advance(comment);
				continue;
			}
			break;
		}
	}

	/// Move the cursor `len` bytes forward, tracking line and column.
	fn advance(&mut self, len: usize) {
		for c in self.source[self.cursor..self.cursor + len].chars() {
			if c == '\n' {
				self.line += 1;
				self.col = 1;
			} else {
				self.col += 1;
			}
		}
		self.cursor += len;
	}

	fn rest(&self) -> &'a str { &self.source[self.cursor..] }

	fn is_at_end(&self) -> bool { self.cursor >= self.source.len() }
}

/// Printable ASCII, tab or carriage return.
fn is_text(c: char) -> bool { matches!(c, ' '..='~' | '\t' | '\r') }

/// Length of a `"[^"\n]*"` string literal at the start of `text`.
fn string_len(text: &str) -> Option<usize> {
	let body = text.strip_prefix('"')?;
	let end = body.find(|c: char| c == '"' || !is_text(c))?;
	(body.as_bytes()[end] == b'"').then_some(end + 2)
}

/// Length of a backtick template at the start of `text`. It may span lines,
/// and a backslash escapes the printable character after it.
fn template_len(text: &str) -> Option<usize> {
	let body = text.strip_prefix('`')?;
	let mut chars = body.char_indices();
	while let Some((index, c)) = chars.next() {
		match c {
			'`' => return Some(index + 2),
			'\\' => {
				chars.next().filter(|&(_, escaped)| matches!(escaped, ' '..='~'))?;
			}
			c if is_text(c) || c == '\n' => {}
			_ => return None,
		}
	}
	None
}

/// Length of a numeric literal at the start of `text`:
/// `\d+\.\d+(exp)? | \d+(exp)? | \.\d+(exp)?`.
fn number_len(text: &str) -> Option<usize> {
	let bytes = text.as_bytes();
	let integer = digits(bytes, 0);
	let mut len = integer;
	if bytes.get(len) == Some(&b'.') {
		let fraction = digits(bytes, len + 1);
		if fraction > 0 {
			len += 1 + fraction;
		}
	}
	if len == 0 {
		return None;
	}
	if matches!(bytes.get(len), Some(b'e' | b'E')) {
		let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
		let exponent = digits(bytes, len + 1 + sign);
		if exponent > 0 {
			len += 1 + sign + exponent;
		}
	}
	Some(len)
}

fn digits(bytes: &[u8], from: usize) -> usize {
	bytes.get(from..).map_or(0, |tail| tail.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// Length of an `[A-Za-z_][A-Za-z_0-9]*` identifier at the start of `text`.
fn identifier_len(text: &str) -> Option<usize> {
	let bytes = text.as_bytes();
	let first = *bytes.first()?;
	if !(first.is_ascii_alphabetic() || first == b'_') {
		return None;
	}
	Some(bytes.iter().take_while(|b| b.is_ascii_alphanumeric() || **b == b'_').count())
}
