use std::sync::LazyLock;

use proptest::prelude::*;
use scriptfront::{
	Dfa, KEYWORDS, OPERATORS, TokenKind, automata::alphabet, build_min_dfa, compile, tokenize, tokenize_with_automaton,
};

static TOKEN_DFA: LazyLock<Dfa> = LazyLock::new(|| build_min_dfa().unwrap());

/// A regular expression over `a`..`d`, kept as a tree so that matching
/// strings can be generated from it.
#[derive(Debug, Clone)]
enum Pattern {
	Char(char),
	Class(Vec<char>),
	Concat(Vec<Pattern>),
	Alternation(Vec<Pattern>),
	Star(Box<Pattern>),
	Plus(Box<Pattern>),
	Optional(Box<Pattern>),
}

impl Pattern {
	fn render(&self) -> String {
		match self {
			Pattern::Char(c) => c.to_string(),
			Pattern::Class(chars) => format!("[{}]", chars.iter().collect::<String>()),
			Pattern::Concat(parts) => format!("({})", parts.iter().map(Pattern::render).collect::<String>()),
			Pattern::Alternation(parts) => {
				format!("({})", parts.iter().map(Pattern::render).collect::<Vec<_>>().join("|"))
			}
			Pattern::Star(inner) => format!("({})*", inner.render()),
			Pattern::Plus(inner) => format!("({})+", inner.render()),
			Pattern::Optional(inner) => format!("({})?", inner.render()),
		}
	}

	/// Append one string matched by the pattern, steered by `choices`.
	fn sample(&self, choices: &mut impl Iterator<Item = u8>, out: &mut String) {
		let mut choose = |n: usize| choices.next().map_or(0, |choice| choice as usize % n);
		match self {
			Pattern::Char(c) => out.push(*c),
			Pattern::Class(chars) => out.push(chars[choose(chars.len())]),
			Pattern::Concat(parts) => {
				for part in parts {
					part.sample(choices, out);
				}
			}
			Pattern::Alternation(parts) => {
				let part = choose(parts.len());
				parts[part].sample(choices, out);
			}
			Pattern::Star(inner) => {
				for _ in 0..choose(3) {
					inner.sample(choices, out);
				}
			}
			Pattern::Plus(inner) => {
				for _ in 0..=choose(3) {
					inner.sample(choices, out);
				}
			}
			Pattern::Optional(inner) => {
				if choose(2) == 1 {
					inner.sample(choices, out);
				}
			}
		}
	}
}

fn pattern() -> impl Strategy<Value = Pattern> {
	let leaf = prop_oneof![
		prop::sample::select(vec!['a', 'b', 'c', 'd']).prop_map(Pattern::Char),
		prop::sample::subsequence(vec!['a', 'b', 'c', 'd'], 1..=3).prop_map(Pattern::Class),
	];
	leaf.prop_recursive(4, 24, 3, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 1..4).prop_map(Pattern::Concat),
			prop::collection::vec(inner.clone(), 2..4).prop_map(Pattern::Alternation),
			inner.clone().prop_map(|p| Pattern::Star(Box::new(p))),
			inner.clone().prop_map(|p| Pattern::Plus(Box::new(p))),
			inner.prop_map(|p| Pattern::Optional(Box::new(p))),
		]
	})
}

/// Single lexemes that each scan to exactly one token with either lexer.
fn lexeme() -> impl Strategy<Value = String> {
	prop_oneof![
		prop::sample::select(KEYWORDS.iter().map(|(text, _)| text.to_string()).collect::<Vec<_>>()),
		prop::sample::select(OPERATORS.iter().map(|(text, _)| text.to_string()).collect::<Vec<_>>()),
		"[A-Za-z_][A-Za-z_0-9]{0,6}",
		"[0-9]{1,4}(\\.[0-9]{1,3})?([eE][+-]?[0-9]{1,2})?",
		"\\.[0-9]{1,3}",
		"\"[ a-z0-9!#=+]{0,8}\"",
		"`[ a-z0-9${}\\n]{0,8}`",
		"//[ a-z=;]{0,8}\n",
	]
}

fn source() -> impl Strategy<Value = String> {
	prop::collection::vec((lexeme(), prop::sample::select(vec![" ", "\n", "\t", "  "])), 0..24)
		.prop_map(|parts| parts.into_iter().map(|(lexeme, separator)| lexeme + separator).collect())
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn minimal_dfa_accepts_generated_matches(
		pattern in pattern(),
		choices in prop::collection::vec(any::<u8>(), 0..48),
	) {
		let nfa = compile(&pattern.render(), TokenKind::Identifier).unwrap();
		let dfa = Dfa::build(&nfa, &alphabet()).minimize();
		let mut input = String::new();
		pattern.sample(&mut choices.into_iter(), &mut input);
		prop_assert!(nfa.accepts(&input).is_some(), "{} rejects {:?}", pattern.render(), input);
		prop_assert!(dfa.accepts(&input).is_some(), "{} rejects {:?}", pattern.render(), input);
	}

	#[test]
	fn dfa_agrees_with_nfa(pattern in pattern(), input in "[a-e]{0,8}") {
		let nfa = compile(&pattern.render(), TokenKind::Number).unwrap();
		let dfa = Dfa::build(&nfa, &alphabet());
		let minimal = dfa.minimize();
		prop_assert_eq!(dfa.accepts(&input).cloned(), nfa.accepts(&input));
		prop_assert_eq!(minimal.accepts(&input).cloned(), nfa.accepts(&input));
	}

	#[test]
	fn minimization_is_a_fixed_point(pattern in pattern()) {
		let nfa = compile(&pattern.render(), TokenKind::String).unwrap();
		let minimal = Dfa::build(&nfa, &alphabet()).minimize();
		let again = minimal.minimize();
		prop_assert_eq!(again.states.len(), minimal.states.len());
		prop_assert_eq!(again, minimal);
	}
}

proptest! {
	#[test]
	fn lexers_agree(source in source()) {
		let by_hand = tokenize(&source).unwrap();
		let by_automaton = tokenize_with_automaton(&TOKEN_DFA, &source).unwrap();
		prop_assert_eq!(by_hand, by_automaton);
	}

	#[test]
	fn tokenizing_twice_is_identical(source in source()) {
		prop_assert_eq!(tokenize(&source), tokenize(&source));
		prop_assert_eq!(tokenize_with_automaton(&TOKEN_DFA, &source), tokenize_with_automaton(&TOKEN_DFA, &source));
	}
}

#[test]
fn token_dfa_is_minimal() {
	assert_eq!(TOKEN_DFA.minimize(), *TOKEN_DFA);
	assert_eq!(TOKEN_DFA.start, 0);
}
