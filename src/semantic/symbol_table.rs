//! Scopes and the symbols declared in them.
//!
//! Scopes form a tree rooted at the global scope. Children never outlive the
//! table, so the tree lives in one arena and scopes refer to each other by
//! index: a parent handle for lookups, child handles for the report.
use std::fmt::{self, Write};

use anyhow::bail;
use indexmap::IndexMap;

use crate::Position;

/// Index of a scope in its [`SymbolTable`].
pub type ScopeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
	Variable,
	Constant,
	Function,
	Parameter,
}

impl fmt::Display for SymbolKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use SymbolKind::*;
		f.write_str(match self {
			Variable => "variable",
			Constant => "constant",
			Function => "function",
			Parameter => "parameter",
		})
	}
}

/// The static type of a symbol or an expression.
///
/// `Unknown` is what the analyzer cannot infer and `Error` is the type of an
/// expression that already produced an error. Both are accepted wherever a
/// concrete type is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
	Number,
	String,
	Boolean,
	Function,
	Void,
	Unknown,
	Error,
}

impl DataType {
	/// Whether this is a concrete type that can be checked against another.
	pub fn is_known(self) -> bool { !matches!(self, DataType::Unknown | DataType::Error) }
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use DataType::*;
		f.write_str(match self {
			Number => "number",
			String => "string",
			Boolean => "boolean",
			Function => "function",
			Void => "void",
			Unknown => "unknown",
			Error => "error",
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
	pub name:        String,
	pub kind:        SymbolKind,
	pub data_type:   DataType,
	pub line:        usize,
	pub col:         usize,
	pub initialized: bool,
	pub used:        bool,
	/// Depth of the declaring scope, set by [`SymbolTable::define`]
	pub scope_level: usize,
	/// Parameter types of a function. `None` means any number of arguments.
	pub parameters:  Option<Vec<DataType>>,
	pub return_type: Option<DataType>,
}

impl Symbol {
	pub fn new(name: impl Into<String>, kind: SymbolKind, data_type: DataType, position: Position) -> Self {
		Self {
			name: name.into(),
			kind,
			data_type,
			line: position.line,
			col: position.col,
			initialized: false,
			used: false,
			scope_level: 0,
			parameters: None,
			return_type: None,
		}
	}

	/// A function symbol. Functions are always initialized.
	pub fn function(
		name: impl Into<String>,
		parameters: Option<Vec<DataType>>,
		return_type: DataType,
		position: Position,
	) -> Self {
		Self {
			initialized: true,
			parameters,
			return_type: Some(return_type),
			..Self::new(name, SymbolKind::Function, DataType::Function, position)
		}
	}

	pub fn initialized(mut self, initialized: bool) -> Self {
		self.initialized = initialized;
		self
	}
}

#[derive(Debug, Clone)]
pub struct Scope {
	pub name:     String,
	pub level:    usize,
	pub parent:   Option<ScopeId>,
	/// In declaration order
	pub symbols:  IndexMap<String, Symbol>,
	pub children: Vec<ScopeId>,
}

/// Functions every program can call without declaring them.
const BUILTINS: [(&str, Option<&[DataType]>, DataType); 7] = [
	("print", Some(&[DataType::Unknown]), DataType::Void),
	("console", None, DataType::Unknown),
	("log", Some(&[DataType::Unknown]), DataType::Void),
	("error", Some(&[DataType::Unknown]), DataType::Void),
	("input", Some(&[]), DataType::String),
	("parseInt", Some(&[DataType::String]), DataType::Number),
	("parseFloat", Some(&[DataType::String]), DataType::Number),
];

/// A tree of scopes with a cursor on the innermost one being analyzed.
#[derive(Debug, Clone)]
pub struct SymbolTable {
	scopes:  Vec<Scope>,
	current: ScopeId,
}

impl Default for SymbolTable {
	fn default() -> Self { Self::new() }
}

impl SymbolTable {
	pub const GLOBAL: ScopeId = 0;

	/// A table holding only the global scope with the built-in functions.
	pub fn new() -> Self {
		let global = Scope {
			name:     "global".to_string(),
			level:    0,
			parent:   None,
			symbols:  IndexMap::new(),
			children: Vec::new(),
		};
		let mut table = Self { scopes: vec![global], current: Self::GLOBAL };
		for (name, parameters, return_type) in BUILTINS {
			let parameters = parameters.map(<[DataType]>::to_vec);
			table.define(Symbol::function(name, parameters, return_type, Position::new(0, 0)));
		}
		table
	}

	pub fn scope(&self, id: ScopeId) -> &Scope { &self.scopes[id] }

	pub fn current_scope(&self) -> &Scope { &self.scopes[self.current] }

	pub fn global(&self) -> &Scope { &self.scopes[Self::GLOBAL] }

	/// Open a child of the current scope and make it current.
	pub fn enter_scope(&mut self, name: impl Into<String>) -> ScopeId {
		let id = self.scopes.len();
		let level = self.current_scope().level + 1;
		self.scopes.push(Scope {
			name: name.into(),
			level,
			parent: Some(self.current),
			symbols: IndexMap::new(),
			children: Vec::new(),
		});
		self.scopes[self.current].children.push(id);
		self.current = id;
		id
	}

	/// Return to the parent of the current scope.
	pub fn exit_scope(&mut self) -> anyhow::Result<()> {
		let Some(parent) = self.current_scope().parent else {
			bail!("cannot exit the global scope");
		};
		self.current = parent;
		Ok(())
	}

	/// Declare a symbol in the current scope. Returns false, leaving the scope
	/// untouched, if the name is already declared there.
	pub fn define(&mut self, mut symbol: Symbol) -> bool {
		let scope = &mut self.scopes[self.current];
		if scope.symbols.contains_key(&symbol.name) {
			return false;
		}
		symbol.scope_level = scope.level;
		scope.symbols.insert(symbol.name.clone(), symbol);
		true
	}

	/// The innermost declaration of `name` visible from the current scope.
	pub fn lookup(&self, name: &str) -> Option<&Symbol> {
		self.resolve(name).and_then(|id| self.scopes[id].symbols.get(name))
	}

	pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
		self.resolve(name).and_then(|id| self.scopes[id].symbols.get_mut(name))
	}

	pub fn lookup_local(&self, name: &str) -> Option<&Symbol> { self.current_scope().symbols.get(name) }

	pub fn mark_used(&mut self, name: &str) {
		if let Some(symbol) = self.lookup_mut(name) {
			symbol.used = true;
		}
	}

	pub fn mark_initialized(&mut self, name: &str) {
		if let Some(symbol) = self.lookup_mut(name) {
			symbol.initialized = true;
		}
	}

	/// Every symbol, scope by scope in the order the scopes were opened.
	pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
		self.preorder().into_iter().flat_map(move |id| self.scopes[id].symbols.values())
	}

	/// Declared symbols that were never read, written or called. Functions
	/// are left out.
	pub fn unused_symbols(&self) -> Vec<&Symbol> {
		self.symbols().filter(|symbol| !symbol.used && symbol.kind != SymbolKind::Function).collect()
	}

	fn resolve(&self, name: &str) -> Option<ScopeId> {
		let mut scope = Some(self.current);
		while let Some(id) = scope {
			if self.scopes[id].symbols.contains_key(name) {
				return Some(id);
			}
			scope = self.scopes[id].parent;
		}
		None
	}

	fn preorder(&self) -> Vec<ScopeId> {
		let mut order = Vec::with_capacity(self.scopes.len());
		let mut stack = vec![Self::GLOBAL];
		while let Some(id) = stack.pop() {
			order.push(id);
			stack.extend(self.scopes[id].children.iter().rev());
		}
		order
	}

	fn write_scope(&self, f: &mut impl Write, id: ScopeId, indent: usize) -> fmt::Result {
		let scope = &self.scopes[id];
		let prefix = "  ".repeat(indent);
		writeln!(f, "{prefix}{} (level {}):", scope.name, scope.level)?;
		for symbol in scope.symbols.values() {
			writeln!(
				f,
				"{prefix}  {} [{}:{}] used:{} init:{}",
				symbol.name,
				symbol.kind,
				symbol.data_type,
				mark(symbol.used),
				mark(symbol.initialized)
			)?;
		}
		for &child in &scope.children {
			self.write_scope(f, child, indent + 1)?;
		}
		Ok(())
	}
}

fn mark(flag: bool) -> char { if flag { '✓' } else { '✗' } }

/// The scope tree with one line per symbol.
impl fmt::Display for SymbolTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.write_scope(f, Self::GLOBAL, 0) }
}
