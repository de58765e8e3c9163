//! The lexical grammar as a finite automaton.
//!
//! Every token pattern is a small regular expression. Each pattern is compiled
//! into a Thompson NFA fragment whose end state is labelled with its token
//! kind, and all fragments hang off one synthetic start state. Subset
//! construction turns that NFA into a DFA over the ASCII alphabet, and
//! partition refinement shrinks the DFA to its minimal form.
//!
//! The minimal DFA can then replace the hand-written lexer: the
//! [`AutomatonTokenizer`] walks it character by character, always extending
//! the current token as long as a transition exists and falling back to the
//! last accepting state when it gets stuck.
mod dfa;
mod nfa;
mod regex;
mod tokenizer;

use std::collections::BTreeSet;

pub use dfa::*;
pub use nfa::*;
pub use regex::*;
pub use tokenizer::*;

use crate::{RegexParseError, TokenKind, scanner::OPERATORS};

/// Index of a state inside its automaton's arena.
pub type StateId = usize;

/// The character-class token patterns, in the regex dialect of [`RegexBuilder`].
pub const TOKEN_PATTERNS: [(TokenKind, &str); 6] = [
	(TokenKind::String, r#""([^"\n]|\t|\r)*""#),
	(TokenKind::Template, r"`([^`\\]|\\.|\n|\t|\r)*`"),
	(TokenKind::Number, r"((([0-9]+)?\.[0-9]+)|([0-9]+))([eE][+\-]?[0-9]+)?"),
	(TokenKind::Identifier, r"[A-Za-z_][A-Za-z_0-9]*"),
	(TokenKind::Whitespace, r"[ \t\r\n]+"),
	(TokenKind::Comment, r"//([^\n]|\t|\r)*"),
];

/// Characters with a meaning in the regex dialect.
const METACHARACTERS: &str = r"[](){}.*+?|^$\/";

/// Printable ASCII, the universe for `.` and negated classes.
pub fn printable() -> impl Iterator<Item = char> { (32u8..=126).map(char::from) }

/// The alphabet the token DFA is built over: printable ASCII plus `\n`, `\t` and `\r`.
/// The hand-written lexer rejects any other character, even inside strings
/// and comments, so both lexers accept the same sources.
pub fn alphabet() -> BTreeSet<char> { printable().chain(['\n', '\t', '\r']).collect() }

/// Escape every metacharacter so that `text` matches only itself.
pub fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len() * 2);
	for c in text.chars() {
		if METACHARACTERS.contains(c) {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

/// Build the NFA of the whole lexical grammar: every token pattern and every
/// operator, joined under one start state.
pub fn token_nfa() -> Result<Nfa, RegexParseError> {
	let mut nfa = Nfa::new();
	let start = nfa.start;
	for (kind, pattern) in TOKEN_PATTERNS {
		let fragment = RegexBuilder::new(&mut nfa, pattern).parse()?;
		nfa.accept(fragment.end, kind);
		nfa.add_epsilon(start, fragment.start);
	}
	for (text, kind) in OPERATORS {
		let pattern = escape(text);
		let fragment = RegexBuilder::new(&mut nfa, &pattern).parse()?;
		nfa.accept(fragment.end, kind);
		nfa.add_epsilon(start, fragment.start);
	}
	Ok(nfa)
}

/// Build and minimize the DFA of the whole lexical grammar.
pub fn build_min_dfa() -> Result<Dfa, RegexParseError> {
	let nfa = token_nfa()?;
	Ok(Dfa::build(&nfa, &alphabet()).minimize())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escape_operators() {
		assert_eq!(escape("==="), "===");
		assert_eq!(escape("${"), r"\$\{");
		assert_eq!(escape("||"), r"\|\|");
		assert_eq!(escape("/"), r"\/");
		assert_eq!(escape("."), r"\.");
	}

	#[test]
	fn alphabet_size() {
		let alphabet = alphabet();
		assert_eq!(alphabet.len(), 95 + 3);
		assert!(alphabet.contains(&'\n'));
		assert!(!alphabet.contains(&'\u{7f}'));
	}

	#[test]
	fn token_dfa_recognizes_every_kind() {
		let dfa = build_min_dfa().unwrap();
		let cases = [
			("\"hi there\"", TokenKind::String),
			("`a\n${b}\\``", TokenKind::Template),
			("3.5e-2", TokenKind::Number),
			(".5", TokenKind::Number),
			("foo_1", TokenKind::Identifier),
			(" \t\n", TokenKind::Whitespace),
			("// note", TokenKind::Comment),
			("===", TokenKind::StrictEq),
			("${", TokenKind::TemplateStart),
			(".", TokenKind::Dot),
		];
		for (input, kind) in cases {
			let accepts = dfa.accepts(input).unwrap_or_else(|| panic!("{input:?} rejected"));
			assert!(accepts.contains(&kind), "{input:?}: {accepts:?}");
		}
		assert!(dfa.accepts("\"open").is_none());
		assert!(dfa.accepts("`open").is_none());
		assert!(dfa.accepts("`").is_none());
		assert!(dfa.accepts("1e").is_none());
		assert!(dfa.accepts("$").is_none());
	}
}
