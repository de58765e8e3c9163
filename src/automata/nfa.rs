//! Thompson NFA fragments in a state arena.
//!
//! States refer to each other by index, so the cycles created by `*` and `+`
//! need no shared ownership. All states of one construction live and die
//! together in [`Nfa::states`].
use std::collections::{BTreeMap, BTreeSet};

use super::StateId;
use crate::TokenKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaState {
	pub epsilon:     BTreeSet<StateId>,
	pub transitions: BTreeMap<char, BTreeSet<StateId>>,
	/// Token kinds accepted here. Only fragment end states carry labels.
	pub accepts:     BTreeSet<TokenKind>,
}

/// An NFA fragment with a single entry and a single exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
	pub start: StateId,
	pub end:   StateId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
	pub states: Vec<NfaState>,
	pub start:  StateId,
}

impl Default for Nfa {
	fn default() -> Self { Self::new() }
}

impl Nfa {
	/// An NFA holding only its start state.
	pub fn new() -> Self { Self { states: vec![NfaState::default()], start: 0 } }

	pub fn add_state(&mut self) -> StateId {
		self.states.push(NfaState::default());
		self.states.len() - 1
	}

	pub fn add_epsilon(&mut self, from: StateId, to: StateId) { self.states[from].epsilon.insert(to); }

	pub fn add_transition(&mut self, from: StateId, to: StateId, c: char) {
		self.states[from].transitions.entry(c).or_default().insert(to);
	}

	pub fn accept(&mut self, state: StateId, kind: TokenKind) { self.states[state].accepts.insert(kind); }

	/// `start -ε-> end`
	pub fn empty(&mut self) -> Fragment {
		let (start, end) = (self.add_state(), self.add_state());
		self.add_epsilon(start, end);
		Fragment { start, end }
	}

	/// `start -c-> end` for every `c` in `chars`.
	pub fn class(&mut self, chars: impl IntoIterator<Item = char>) -> Fragment {
		let (start, end) = (self.add_state(), self.add_state());
		for c in chars {
			self.add_transition(start, end, c);
		}
		Fragment { start, end }
	}

	pub fn literal(&mut self, c: char) -> Fragment { self.class([c]) }

	/// `a` followed by `b`.
	pub fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
		self.add_epsilon(a.end, b.start);
		Fragment { start: a.start, end: b.end }
	}

	/// `a|b`
	pub fn alternate(&mut self, a: Fragment, b: Fragment) -> Fragment {
		let (start, end) = (self.add_state(), self.add_state());
		self.add_epsilon(start, a.start);
		self.add_epsilon(start, b.start);
		self.add_epsilon(a.end, end);
		self.add_epsilon(b.end, end);
		Fragment { start, end }
	}

	/// `a*`
	pub fn star(&mut self, a: Fragment) -> Fragment {
		let (start, end) = (self.add_state(), self.add_state());
		self.add_epsilon(start, a.start);
		self.add_epsilon(start, end);
		self.add_epsilon(a.end, a.start);
		self.add_epsilon(a.end, end);
		Fragment { start, end }
	}

	/// `a+`
	pub fn plus(&mut self, a: Fragment) -> Fragment {
		let (start, end) = (self.add_state(), self.add_state());
		self.add_epsilon(start, a.start);
		self.add_epsilon(a.end, a.start);
		self.add_epsilon(a.end, end);
		Fragment { start, end }
	}

	/// `a?`
	pub fn optional(&mut self, a: Fragment) -> Fragment {
		let (start, end) = (self.add_state(), self.add_state());
		self.add_epsilon(start, a.start);
		self.add_epsilon(start, end);
		self.add_epsilon(a.end, end);
		Fragment { start, end }
	}

	/// All states reachable from `states` through epsilon edges alone,
	/// `states` included. Uses an explicit worklist.
	pub fn epsilon_closure(&self, states: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
		let mut closure = BTreeSet::new();
		let mut worklist = Vec::new();
		for state in states {
			if closure.insert(state) {
				worklist.push(state);
			}
		}
		while let Some(state) = worklist.pop() {
			for &next in &self.states[state].epsilon {
				if closure.insert(next) {
					worklist.push(next);
				}
			}
		}
		closure
	}

	/// States reachable from `states` by consuming `c`.
	pub fn step(&self, states: &BTreeSet<StateId>, c: char) -> BTreeSet<StateId> {
		states.iter().filter_map(|&state| self.states[state].transitions.get(&c)).flatten().copied().collect()
	}

	/// Union of the accept labels of `states`.
	pub fn accepts_of(&self, states: &BTreeSet<StateId>) -> BTreeSet<TokenKind> {
		states.iter().flat_map(|&state| self.states[state].accepts.iter().copied()).collect()
	}

	/// Simulate the NFA on the whole of `input`. Returns the labels accepted at
	/// the end, or `None` when nothing accepts.
	pub fn accepts(&self, input: &str) -> Option<BTreeSet<TokenKind>> {
		let mut current = self.epsilon_closure([self.start]);
		for c in input.chars() {
			current = self.epsilon_closure(self.step(&current, c));
			if current.is_empty() {
				return None;
			}
		}
		let accepts = self.accepts_of(&current);
		(!accepts.is_empty()).then_some(accepts)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn labelled(build: impl FnOnce(&mut Nfa) -> Fragment) -> Nfa {
		let mut nfa = Nfa::new();
		let fragment = build(&mut nfa);
		nfa.start = fragment.start;
		nfa.accept(fragment.end, TokenKind::Identifier);
		nfa
	}

	#[test]
	fn closure_follows_cycles() {
		let mut nfa = Nfa::new();
		let a = nfa.add_state();
		let b = nfa.add_state();
		nfa.add_epsilon(0, a);
		nfa.add_epsilon(a, b);
		nfa.add_epsilon(b, 0);
		assert_eq!(nfa.epsilon_closure([a]), BTreeSet::from([0, a, b]));
	}

	#[test]
	fn thompson_constructions() {
		let star = labelled(|nfa| {
			let a = nfa.literal('a');
			nfa.star(a)
		});
		assert!(star.accepts("").is_some());
		assert!(star.accepts("aaa").is_some());
		assert!(star.accepts("ab").is_none());

		let plus = labelled(|nfa| {
			let a = nfa.literal('a');
			nfa.plus(a)
		});
		assert!(plus.accepts("").is_none());
		assert!(plus.accepts("aa").is_some());

		let optional = labelled(|nfa| {
			let a = nfa.literal('a');
			let b = nfa.literal('b');
			let a = nfa.optional(a);
			nfa.concat(a, b)
		});
		assert!(optional.accepts("b").is_some());
		assert!(optional.accepts("ab").is_some());
		assert!(optional.accepts("aab").is_none());

		let alternate = labelled(|nfa| {
			let a = nfa.literal('a');
			let b = nfa.class(['b', 'c']);
			nfa.alternate(a, b)
		});
		assert!(alternate.accepts("a").is_some());
		assert!(alternate.accepts("c").is_some());
		assert!(alternate.accepts("ac").is_none());
	}
}
