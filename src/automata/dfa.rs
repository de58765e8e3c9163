//! Subset construction, minimization and DOT export.
use std::{
	collections::{BTreeMap, BTreeSet, VecDeque},
	fmt::Write,
};

use super::{Nfa, StateId};
use crate::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
	pub id:      StateId,
	/// May hold several kinds; the tokenizer picks one.
	pub accepts: BTreeSet<TokenKind>,
}

/// A deterministic automaton. A missing `(state, char)` entry in
/// `transitions` means there is no transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
	pub start:       StateId,
	pub states:      Vec<DfaState>,
	pub transitions: Vec<BTreeMap<char, StateId>>,
}

impl Dfa {
	/// Subset construction over `alphabet`. DFA states are the epsilon
	/// closures reachable from the NFA start; empty sets are never created.
	pub fn build(nfa: &Nfa, alphabet: &BTreeSet<char>) -> Self {
		let mut dfa = Self { start: 0, states: Vec::new(), transitions: Vec::new() };
		let mut ids: BTreeMap<BTreeSet<StateId>, StateId> = BTreeMap::new();
		let mut worklist = VecDeque::new();

		let start = nfa.epsilon_closure([nfa.start]);
		dfa.add_state(nfa.accepts_of(&start));
		ids.insert(start.clone(), 0);
		worklist.push_back(start);

		while let Some(set) = worklist.pop_front() {
			let from = ids[&set];
			for &c in alphabet {
				let target = nfa.epsilon_closure(nfa.step(&set, c));
				if target.is_empty() {
					continue;
				}
				let to = match ids.get(&target) {
					Some(&id) => id,
					None => {
						let id = dfa.add_state(nfa.accepts_of(&target));
						ids.insert(target.clone(), id);
						worklist.push_back(target);
						id
					}
				};
				dfa.transitions[from].insert(c, to);
			}
		}
		dfa
	}

	fn add_state(&mut self, accepts: BTreeSet<TokenKind>) -> StateId {
		let id = self.states.len();
		self.states.push(DfaState { id, accepts });
		self.transitions.push(BTreeMap::new());
		id
	}

	/// Hopcroft partition refinement.
	///
	/// The initial partition groups states by identical accept set, and every
	/// group starts on the worklist. A popped splitter `A` and character `c`
	/// give `X`, the states moving into `A` on `c`; each group `Y` cut by `X`
	/// is replaced by `Y∩X` and `Y\X`. If `Y` was waiting on the worklist both
	/// halves wait in its place, otherwise only the smaller half is queued.
	///
	/// The quotient is renumbered breadth-first from the start state, so a
	/// minimal DFA minimizes to itself.
	pub fn minimize(&self) -> Self {
		if self.states.is_empty() {
			return self.clone();
		}
		let alphabet: BTreeSet<char> = self.transitions.iter().flat_map(|row| row.keys().copied()).collect();

		// inverse[c][t] = states with a `c` transition into `t`
		let mut inverse: BTreeMap<char, Vec<Vec<StateId>>> = BTreeMap::new();
		for (from, row) in self.transitions.iter().enumerate() {
			for (&c, &to) in row {
				inverse.entry(c).or_insert_with(|| vec![Vec::new(); self.states.len()])[to].push(from);
			}
		}

		let mut by_accepts: BTreeMap<&BTreeSet<TokenKind>, BTreeSet<StateId>> = BTreeMap::new();
		for state in &self.states {
			by_accepts.entry(&state.accepts).or_default().insert(state.id);
		}
		let mut blocks: Vec<BTreeSet<StateId>> = by_accepts.into_values().collect();
		let mut block_of = vec![0; self.states.len()];
		for (index, block) in blocks.iter().enumerate() {
			for &state in block {
				block_of[state] = index;
			}
		}
		let mut waiting = vec![true; blocks.len()];
		let mut worklist: Vec<usize> = (0..blocks.len()).collect();

		while let Some(splitter) = worklist.pop() {
			waiting[splitter] = false;
			let splitter = blocks[splitter].clone();
			for c in &alphabet {
				let Some(sources) = inverse.get(c) else { continue };
				let x: BTreeSet<StateId> = splitter.iter().flat_map(|&to| sources[to].iter().copied()).collect();
				if x.is_empty() {
					continue;
				}
				let touched: BTreeSet<usize> = x.iter().map(|&state| block_of[state]).collect();
				for y in touched {
					let (inside, outside): (BTreeSet<StateId>, BTreeSet<StateId>) =
						blocks[y].iter().partition(|state| x.contains(*state));
					if outside.is_empty() {
						continue;
					}
					let new = blocks.len();
					for &state in &outside {
						block_of[state] = new;
					}
					let outside_is_smaller = outside.len() < inside.len();
					blocks[y] = inside;
					blocks.push(outside);
					waiting.push(false);
					if waiting[y] || outside_is_smaller {
						waiting[new] = true;
						worklist.push(new);
					} else {
						waiting[y] = true;
						worklist.push(y);
					}
				}
			}
		}

		self.quotient(&blocks, &block_of)
	}

	/// Collapse each block into one state, numbering blocks in breadth-first
	/// order from the start block with characters visited in ascending order.
	fn quotient(&self, blocks: &[BTreeSet<StateId>], block_of: &[usize]) -> Self {
		let mut number: Vec<Option<StateId>> = vec![None; blocks.len()];
		let mut order = Vec::new();
		let mut queue = VecDeque::from([block_of[self.start]]);
		number[block_of[self.start]] = Some(0);
		while let Some(block) = queue.pop_front() {
			order.push(block);
			let Some(&representative) = blocks[block].first() else { continue };
			for &to in self.transitions[representative].values() {
				let target = block_of[to];
				if number[target].is_none() {
					number[target] = Some(order.len() + queue.len());
					queue.push_back(target);
				}
			}
		}

		let mut minimal = Self { start: 0, states: Vec::new(), transitions: Vec::new() };
		for &block in &order {
			let accepts = blocks[block].iter().flat_map(|&state| self.states[state].accepts.iter().copied()).collect();
			let id = minimal.add_state(accepts);
			if let Some(&representative) = blocks[block].first() {
				for (&c, &to) in &self.transitions[representative] {
					if let Some(target) = number[block_of[to]] {
						minimal.transitions[id].insert(c, target);
					}
				}
			}
		}
		minimal
	}

	/// The state reached from `state` on `c`, if any.
	pub fn next(&self, state: StateId, c: char) -> Option<StateId> { self.transitions.get(state)?.get(&c).copied() }

	pub fn accepts_at(&self, state: StateId) -> &BTreeSet<TokenKind> { &self.states[state].accepts }

	/// Run the whole of `input`. Returns the accept set of the final state
	/// when it is non-empty.
	pub fn accepts(&self, input: &str) -> Option<&BTreeSet<TokenKind>> {
		let mut state = self.start;
		for c in input.chars() {
			state = self.next(state, c)?;
		}
		let accepts = &self.states.get(state)?.accepts;
		(!accepts.is_empty()).then_some(accepts)
	}

	pub fn accepting_count(&self) -> usize { self.states.iter().filter(|state| !state.accepts.is_empty()).count() }

	pub fn transition_count(&self) -> usize { self.transitions.iter().map(BTreeMap::len).sum() }

	/// Graphviz source for the automaton. Accepting states are double circles
	/// labelled with at most four of their token kinds; parallel edges are
	/// merged into one edge per destination.
	pub fn to_dot(&self) -> String {
		let mut dot = String::from("digraph DFA {\n  rankdir=LR;\n  node [shape=circle];\n");
		let _ = writeln!(dot, "  __start__ [shape=point];\n  __start__ -> S{};", self.start);
		for state in &self.states {
			if state.accepts.is_empty() {
				let _ = writeln!(dot, "  S{0} [shape=circle, label=\"S{0}\"];", state.id);
				continue;
			}
			let mut names: Vec<&str> = state.accepts.iter().map(TokenKind::name).collect();
			names.sort_unstable();
			let more = if names.len() > 4 { ",…" } else { "" };
			names.truncate(4);
			let _ = writeln!(
				dot,
				"  S{0} [shape=doublecircle, label=\"S{0}\\n[{1}{more}]\"];",
				state.id,
				names.join(", ")
			);
		}
		for (from, row) in self.transitions.iter().enumerate() {
			let mut by_target: BTreeMap<StateId, Vec<char>> = BTreeMap::new();
			for (&c, &to) in row {
				by_target.entry(to).or_default().push(c);
			}
			for (to, chars) in by_target {
				let label = chars.into_iter().map(escape_label).collect::<Vec<_>>().join(",");
				let _ = writeln!(dot, "  S{from} -> S{to} [label=\"{label}\"];");
			}
		}
		dot.push_str("}\n");
		dot
	}
}

fn escape_label(c: char) -> String {
	match c {
		'"' => "\\\"".to_string(),
		'\\' => "\\\\".to_string(),
		'\n' => "\\\\n".to_string(),
		'\t' => "\\\\t".to_string(),
		'\r' => "\\\\r".to_string(),
		c => c.to_string(),
	}
}

impl std::fmt::Display for Dfa {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let alphabet: BTreeSet<char> = self.transitions.iter().flat_map(|row| row.keys().copied()).collect();
		writeln!(f, "states:      {}", self.states.len())?;
		writeln!(f, "start:       S{}", self.start)?;
		writeln!(f, "accepting:   {}", self.accepting_count())?;
		writeln!(f, "transitions: {}", self.transition_count())?;
		write!(f, "alphabet:    {} characters", alphabet.len())
	}
}
