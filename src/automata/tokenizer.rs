//! Tokenizing by replaying the minimal DFA.
use std::collections::BTreeSet;

use super::Dfa;
use crate::{LexError, LexErrorType, Token, TokenKind};

/// Scans source text with a DFA using maximal munch: the current token grows
/// while transitions exist, then the scan backs up to the last accepting
/// state seen since the token began.
pub struct AutomatonTokenizer<'a> {
	dfa:    &'a Dfa,
	source: &'a str,
	/// Byte offset of the next token
	cursor: usize,
	line:   usize,
	col:    usize,
}

impl<'a> AutomatonTokenizer<'a> {
	pub fn new(dfa: &'a Dfa, source: &'a str) -> Self { Self { dfa, source, cursor: 0, line: 1, col: 1 } }

	/// Every token including whitespace and comments, terminated by EOF.
	pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
		let mut tokens = Vec::new();
		while self.cursor < self.source.len() {
			tokens.push(self.scan_token()?);
		}
		tokens.push(Token::new(TokenKind::Eof, "EOF", self.line, self.col));
		Ok(tokens)
	}

	fn scan_token(&mut self) -> Result<Token, LexError> {
		let rest = &self.source[self.cursor..];
		let mut state = self.dfa.start;
		// (length in bytes, accepting state) of the longest accepted prefix
		let mut last_accept = None;
		for (index, c) in rest.char_indices() {
			let Some(next) = self.dfa.next(state, c) else { break };
			state = next;
			if !self.dfa.accepts_at(state).is_empty() {
				last_accept = Some((index + c.len_utf8(), state));
			}
		}

		let Some((len, state)) = last_accept else {
			let lexeme: String = rest.chars().take(20).collect();
			return Err(if rest.starts_with('"') {
				LexError::new(self.line, self.col, lexeme, LexErrorType::UnterminatedString)
			} else if rest.starts_with('`') {
				LexError::new(self.line, self.col, lexeme, LexErrorType::UnterminatedTemplate)
			} else {
				let unexpected = rest.chars().next().map(String::from).unwrap_or_default();
				LexError::new(self.line, self.col, unexpected, LexErrorType::UnexpectedCharacter)
			});
		};

		let lexeme = &rest[..len];
		let kind = resolve(self.dfa.accepts_at(state), lexeme);
		let token = Token::new(kind, lexeme, self.line, self.col);
		for c in lexeme.chars() {
			if c == '\n' {
				self.line += 1;
				self.col = 1;
			} else {
				self.col += 1;
			}
		}
		self.cursor += len;
		Ok(token)
	}
}

/// Pick one kind out of an accept set. An identifier spelled like a keyword
/// becomes that keyword and an exact operator lexeme becomes that operator;
/// otherwise the highest [`TokenKind::priority`] wins.
pub fn resolve(accepts: &BTreeSet<TokenKind>, lexeme: &str) -> TokenKind {
	if accepts.contains(&TokenKind::Identifier) {
		if let Some(keyword) = TokenKind::keyword(lexeme) {
			return keyword;
		}
	}
	if let Some(operator) = TokenKind::operator(lexeme).filter(|operator| accepts.contains(operator)) {
		return operator;
	}
	accepts
		.iter()
		.copied()
		.max_by(|a, b| a.priority().cmp(&b.priority()).then_with(|| b.cmp(a)))
		.unwrap_or(TokenKind::Identifier)
}

/// Drop whitespace and comment tokens.
pub fn semantic_tokens(tokens: Vec<Token>) -> Vec<Token> {
	tokens.into_iter().filter(|token| !token.kind.is_ignored()).collect()
}
