//! Static analysis of a parsed program.
//!
//! The analyzer walks the whole tree once. It binds every name to its
//! declaration through a [`SymbolTable`], infers a [`DataType`] for each
//! expression and checks the operations applied to it.
//!
//! Nothing found here aborts the walk. Problems that make the program wrong
//! are errors, doubtful code only gets a warning. An expression that already
//! failed has the type `error`, which is accepted everywhere so that one
//! mistake is reported once.
mod symbol_table;

pub use symbol_table::*;

use crate::{
	AnalyzerError, BinaryOperator, Expression, LiteralValue, Position, SemanticError, UnaryOperator,
	statement::{Block, CatchClause, DeclarationKind, Function, Parameter, Program, Statement},
};

/// Everything the analyzer found in one program.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
	/// True iff there are no errors. Warnings don't count.
	pub ok:       bool,
	pub errors:   Vec<SemanticError>,
	pub warnings: Vec<String>,
	pub report:   String,
}

#[derive(Debug, Default)]
pub struct Analyzer {
	symbols:   SymbolTable,
	errors:    Vec<SemanticError>,
	warnings:  Vec<String>,
	/// Types returned so far by each enclosing function, innermost last.
	functions: Vec<Vec<DataType>>,
}

impl Analyzer {
	pub fn new() -> Self { Self::default() }

	/// Analyze `program` from a fresh symbol table. Returns true iff no errors
	/// were found.
	pub fn analyze(&mut self, program: &Program) -> bool {
		*self = Self::new();
		if let Err(error) = self.statements(&program.statements) {
			self.errors.push(SemanticError::new(0, 0, format!("internal error: {error}")));
		}
		let unused: Vec<_> = self
			.symbols
			.unused_symbols()
			.into_iter()
			.map(|symbol| {
				let message = format!("{} '{}' declared but never used", symbol.kind, symbol.name);
				(Position::new(symbol.line, symbol.col), message)
			})
			.collect();
		for (position, message) in unused {
			self.warning(position, message);
		}
		self.errors.is_empty()
	}

	pub fn errors(&self) -> &[SemanticError] { &self.errors }

	pub fn warnings(&self) -> &[String] { &self.warnings }

	pub fn symbols(&self) -> &SymbolTable { &self.symbols }

	/// Errors, warnings and the scope tree as one human readable text.
	pub fn report(&self) -> String {
		let rule = "-".repeat(60);
		let banner = "=".repeat(60);
		let mut report = format!("{banner}\nSEMANTIC ANALYSIS\n{banner}\n\n");

		if self.errors.is_empty() {
			report.push_str("No semantic errors found\n\n");
		} else {
			report.push_str(&format!("ERRORS ({}):\n{rule}\n", self.errors.len()));
			for error in &self.errors {
				report.push_str(&format!("  error: {error}\n"));
			}
			report.push('\n');
		}

		if !self.warnings.is_empty() {
			report.push_str(&format!("WARNINGS ({}):\n{rule}\n", self.warnings.len()));
			for warning in &self.warnings {
				report.push_str(&format!("  warning: {warning}\n"));
			}
			report.push('\n');
		}

		report.push_str(&format!("SYMBOL TABLE:\n{rule}\n{}", self.symbols));
		report
	}

	/// Consume the analyzer, keeping what it found.
	pub fn into_result(self) -> AnalysisResult {
		let report = self.report();
		AnalysisResult { ok: self.errors.is_empty(), errors: self.errors, warnings: self.warnings, report }
	}
}

impl Analyzer {
	fn error(&mut self, position: Position, message: impl Into<String>) {
		self.errors.push(SemanticError::new(position.line, position.col, message));
	}

	fn warning(&mut self, position: Position, message: impl AsRef<str>) {
		self.warnings.push(format!("line {}, column {}: {}", position.line, position.col, message.as_ref()));
	}

	fn statements(&mut self, statements: &[Statement]) -> Result<(), AnalyzerError> {
		for statement in statements {
			self.statement(statement)?;
		}
		Ok(())
	}

	/// Analyze `statements` in a new child scope.
	fn scoped(&mut self, name: &str, statements: &[Statement]) -> Result<(), AnalyzerError> {
		self.symbols.enter_scope(name);
		self.statements(statements)?;
		self.symbols.exit_scope()?;
		Ok(())
	}

	/// The body of an `if` or a `while`. A block body gets exactly one scope.
	fn body(&mut self, name: &str, body: &Statement) -> Result<(), AnalyzerError> {
		match body {
			Statement::Block(block) => self.scoped(name, &block.statements),
			statement => self.statement(statement),
		}
	}

	fn statement(&mut self, statement: &Statement) -> Result<(), AnalyzerError> {
		match statement {
			Statement::VarDecl { kind, name, initializer, position } => {
				self.var_declaration(*kind, name, initializer.as_ref(), *position);
			}
			Statement::FunctionDecl(function) => self.function(function)?,
			Statement::ClassDecl { name, body, position } => {
				if let Some(existing) = self.symbols.lookup_local(name) {
					let message = format!("class '{name}' already declared on line {}", existing.line);
					self.error(*position, message);
				} else {
					self.symbols.define(Symbol::function(name.as_str(), None, DataType::Unknown, *position));
				}
				self.scoped(&format!("class_{name}"), body)?;
			}
			Statement::If { condition, then_branch, else_branch, position } => {
				self.condition("if", condition, *position);
				self.body("if_then", then_branch)?;
				if let Some(else_branch) = else_branch {
					self.body("if_else", else_branch)?;
				}
			}
			Statement::While { condition, body, position } => {
				self.condition("while", condition, *position);
				self.body("while", body)?;
			}
			Statement::For { init, condition, update, body, position } => {
				self.symbols.enter_scope("for");
				if let Some(init) = init {
					self.statement(init)?;
				}
				if let Some(condition) = condition {
					self.condition("for", condition, *position);
				}
				if let Some(update) = update {
					self.expression(update);
				}
				self.statement(body)?;
				self.symbols.exit_scope()?;
			}
			Statement::Return { value, position } => {
				let data_type = value.as_ref().map_or(DataType::Void, |value| self.expression(value));
				match self.functions.last_mut() {
					Some(returns) => returns.push(data_type),
					None => self.error(*position, "'return' can only be used inside a function"),
				}
			}
			Statement::Throw { value, .. } => {
				self.expression(value);
			}
			Statement::Block(block) => self.scoped("block", &block.statements)?,
			Statement::Expression(expression) => {
				self.expression(expression);
			}
			Statement::Try { block, catch, finally, .. } => {
				self.scoped("try", &block.statements)?;
				if let Some(CatchClause { parameter, block }) = catch {
					self.catch(parameter, block)?;
				}
				if let Some(finally) = finally {
					self.scoped("finally", &finally.statements)?;
				}
			}
		}
		Ok(())
	}

	fn var_declaration(
		&mut self,
		kind: DeclarationKind,
		name: &str,
		initializer: Option<&Expression>,
		position: Position,
	) {
		// A redeclaration keeps the first symbol; its initializer is still checked.
		if let Some(existing) = self.symbols.lookup_local(name) {
			let message = format!("variable '{name}' already declared on line {}", existing.line);
			self.error(position, message);
			if let Some(initializer) = initializer {
				self.expression(initializer);
			}
			return;
		}

		let data_type = initializer.map_or(DataType::Unknown, |initializer| self.expression(initializer));
		let symbol_kind = match kind {
			DeclarationKind::Let => SymbolKind::Variable,
			DeclarationKind::Const => SymbolKind::Constant,
		};
		self.symbols.define(Symbol::new(name, symbol_kind, data_type, position).initialized(initializer.is_some()));

		if kind == DeclarationKind::Const && initializer.is_none() {
			self.error(position, format!("constant '{name}' must be initialized"));
		}
	}

	fn function(&mut self, function: &Function) -> Result<(), AnalyzerError> {
		let Function { name, parameters, body, position } = function;
		let redeclared = match self.symbols.lookup_local(name) {
			Some(existing) => {
				let message = format!("function '{name}' already declared on line {}", existing.line);
				self.error(*position, message);
				true
			}
			None => {
				let parameter_types = vec![DataType::Unknown; parameters.len()];
				let symbol = Symbol::function(name.as_str(), Some(parameter_types), DataType::Unknown, *position);
				self.symbols.define(symbol);
				false
			}
		};

		self.symbols.enter_scope(format!("function_{name}"));
		for Parameter { name: parameter, position } in parameters {
			let symbol = Symbol::new(parameter.as_str(), SymbolKind::Parameter, DataType::Unknown, *position);
			if !self.symbols.define(symbol.initialized(true)) {
				self.error(*position, format!("duplicate parameter '{parameter}' in function '{name}'"));
			}
		}
		self.functions.push(Vec::new());
		let analyzed = self.statements(&body.statements);
		let returns = self.functions.pop().unwrap_or_default();
		analyzed?;
		self.symbols.exit_scope()?;

		if !redeclared {
			if let Some(symbol) = self.symbols.lookup_mut(name) {
				symbol.return_type = Some(common_type(&returns));
			}
		}
		Ok(())
	}

	fn catch(&mut self, parameter: &Parameter, block: &Block) -> Result<(), AnalyzerError> {
		self.symbols.enter_scope("catch");
		let symbol = Symbol::new(parameter.name.as_str(), SymbolKind::Parameter, DataType::Unknown, parameter.position);
		self.symbols.define(symbol.initialized(true));
		self.statements(&block.statements)?;
		self.symbols.exit_scope()?;
		Ok(())
	}

	fn condition(&mut self, statement: &str, condition: &Expression, position: Position) {
		let data_type = self.expression(condition);
		if data_type.is_known() && data_type != DataType::Boolean {
			self.warning(position, format!("'{statement}' condition should be boolean, found {data_type}"));
		}
	}

	/// Check an expression and return its type.
	fn expression(&mut self, expression: &Expression) -> DataType {
		match expression {
			Expression::Binary { left, operator, right, position } => self.binary(left, *operator, right, *position),
			Expression::Unary { operator, operand, position } => {
				let operand = self.expression(operand);
				match operator {
					UnaryOperator::Not => {
						if operand.is_known() && operand != DataType::Boolean {
							self.warning(*position, "operator '!' requires a boolean operand");
						}
						DataType::Boolean
					}
					UnaryOperator::Negate | UnaryOperator::Plus => match operand {
						DataType::Number | DataType::Unknown => DataType::Number,
						DataType::Error => DataType::Error,
						_ => {
							self.error(*position, format!("operator '{operator}' requires a numeric operand"));
							DataType::Error
						}
					},
				}
			}
			Expression::Assignment { name, value, position } => self.assignment(name, value, *position),
			Expression::Call { callee, arguments, position } => {
				for argument in arguments {
					self.expression(argument);
				}
				match callee.as_ref() {
					Expression::Identifier { name, .. } => self.call(name, arguments.len(), *position),
					callee => {
						self.expression(callee);
						DataType::Unknown
					}
				}
			}
			Expression::New { class_name, arguments, position } => {
				for argument in arguments {
					self.expression(argument);
				}
				let Some(symbol) = self.symbols.lookup(class_name) else {
					self.error(*position, format!("class '{class_name}' is not declared"));
					return DataType::Error;
				};
				if symbol.kind != SymbolKind::Function {
					self.error(*position, format!("'{class_name}' is not a class"));
					return DataType::Error;
				}
				self.symbols.mark_used(class_name);
				DataType::Unknown
			}
			Expression::Index { object, index, position } => {
				self.expression(object);
				let index = self.expression(index);
				if index.is_known() && index != DataType::Number {
					self.warning(*position, "index should be numeric");
				}
				DataType::Unknown
			}
			Expression::Member { object, .. } => {
				self.expression(object);
				DataType::Unknown
			}
			Expression::Identifier { name, position } => {
				let Some(symbol) = self.symbols.lookup(name) else {
					self.error(*position, format!("variable '{name}' is not declared"));
					return DataType::Error;
				};
				let data_type = symbol.data_type;
				if !symbol.initialized && symbol.kind != SymbolKind::Function {
					self.warning(*position, format!("variable '{name}' may not be initialized"));
				}
				self.symbols.mark_used(name);
				data_type
			}
			Expression::Literal { value, .. } => match value {
				LiteralValue::Integer(_) | LiteralValue::Float(_) => DataType::Number,
				LiteralValue::String(_) => DataType::String,
				LiteralValue::Boolean(_) => DataType::Boolean,
			},
		}
	}

	fn binary(
		&mut self,
		left: &Expression,
		operator: BinaryOperator,
		right: &Expression,
		position: Position,
	) -> DataType {
		let left = self.expression(left);
		let right = self.expression(right);

		if operator.is_arithmetic() {
			return match (left, right) {
				(DataType::Number, DataType::Number) => DataType::Number,
				(DataType::Unknown, _) | (_, DataType::Unknown) => DataType::Number,
				(DataType::Error, _) | (_, DataType::Error) => DataType::Error,
				_ => {
					let message = format!("operator '{operator}' requires numeric operands, found {left} and {right}");
					self.error(position, message);
					DataType::Error
				}
			};
		}

		if operator.is_logical() {
			for (side, data_type) in [("left", left), ("right", right)] {
				if data_type.is_known() && data_type != DataType::Boolean {
					self.warning(position, format!("{side} operand of '{operator}' should be boolean"));
				}
			}
		}
		// Comparisons and equality always produce a boolean.
		DataType::Boolean
	}

	fn assignment(&mut self, name: &str, value: &Expression, position: Position) -> DataType {
		let Some(symbol) = self.symbols.lookup(name) else {
			self.error(position, format!("variable '{name}' is not declared"));
			self.expression(value);
			return DataType::Error;
		};
		let (kind, declared) = (symbol.kind, symbol.data_type);
		if kind == SymbolKind::Constant {
			self.error(position, format!("cannot reassign constant '{name}'"));
		}
		self.symbols.mark_used(name);
		self.symbols.mark_initialized(name);

		let assigned = self.expression(value);
		if declared.is_known() && assigned.is_known() && declared != assigned {
			self.warning(position, format!("assigning {assigned} to variable of type {declared}"));
		}
		assigned
	}

	fn call(&mut self, name: &str, arguments: usize, position: Position) -> DataType {
		let Some(symbol) = self.symbols.lookup(name) else {
			self.error(position, format!("function '{name}' is not declared"));
			return DataType::Error;
		};
		if symbol.kind != SymbolKind::Function {
			self.error(position, format!("'{name}' is not a function"));
			return DataType::Error;
		}
		let arity = symbol.parameters.as_ref().map(Vec::len);
		let return_type = symbol.return_type.unwrap_or(DataType::Unknown);
		self.symbols.mark_used(name);

		if let Some(arity) = arity.filter(|&arity| arity != arguments) {
			self.error(position, format!("function '{name}' expects {arity} arguments, got {arguments}"));
		}
		return_type
	}
}

/// The type a function returns: `void` if it never returns a value, the
/// shared type if every `return` agrees, `unknown` otherwise.
fn common_type(returns: &[DataType]) -> DataType {
	match returns.split_first() {
		None => DataType::Void,
		Some((first, rest)) if rest.iter().all(|data_type| data_type == first) => *first,
		Some(_) => DataType::Unknown,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Lexer, Parser};

	fn analyze(source: &str) -> Analyzer {
		let tokens = Lexer::new(source).tokenize().unwrap();
		let (program, errors) = Parser::new(tokens).parse();
		assert!(errors.is_empty(), "{errors:?}");
		let mut analyzer = Analyzer::new();
		analyzer.analyze(&program);
		analyzer
	}

	fn messages(analyzer: &Analyzer) -> Vec<&str> {
		analyzer.errors().iter().map(|error| error.message.as_str()).collect()
	}

	/// Assert the exact list of error messages.
	fn errors(source: &str, expected: &[&str]) {
		let analyzer = analyze(source);
		assert_eq!(messages(&analyzer), expected, "{}", analyzer.report());
	}

	/// Assert the source has no errors and the given warnings.
	fn warnings(source: &str, expected: &[&str]) {
		let analyzer = analyze(source);
		assert!(analyzer.errors().is_empty(), "{}", analyzer.report());
		assert_eq!(analyzer.warnings(), expected);
	}

	#[test]
	fn const_requires_initializer() {
		let analyzer = analyze("const c;");
		assert_eq!(messages(&analyzer), ["constant 'c' must be initialized"]);
		assert_eq!(analyzer.errors()[0], SemanticError::new(1, 1, "constant 'c' must be initialized"));
		let symbol = analyzer.symbols().global().symbols.get("c").unwrap();
		assert_eq!(symbol.kind, SymbolKind::Constant);
		assert!(!symbol.initialized);
	}

	#[test]
	fn unused_variable() {
		warnings("let a = 1;", &["line 1, column 1: variable 'a' declared but never used"]);
		warnings("let a = 1; print(a);", &[]);
		warnings("function f(x) {} f(1);", &["line 1, column 12: parameter 'x' declared but never used"]);
	}

	#[test]
	fn declarations() {
		errors("let a = 1; let a = 2; print(a);", &["variable 'a' already declared on line 1"]);
		errors("function f() {} function f() {} f();", &["function 'f' already declared on line 1"]);
		errors("function f(a, a) { return a; } f(1, 2);", &["duplicate parameter 'a' in function 'f'"]);
		errors("class A {} class A {} new A();", &["class 'A' already declared on line 1"]);
		errors("let print = 1;", &["variable 'print' already declared on line 0"]);
		errors("{ let print = 1; log(print); }", &[]);
		errors("let a = 1; { let a = \"s\"; print(a); } print(a);", &[]);
	}

	#[test]
	fn redeclarations_are_still_analyzed() {
		errors(
			"let a = 1; let a = missing; function f() {} function f() { return other; } \
			 class A {} class A { let x = y; } print(a); f();",
			&[
				"variable 'a' already declared on line 1",
				"variable 'missing' is not declared",
				"function 'f' already declared on line 1",
				"variable 'other' is not declared",
				"class 'A' already declared on line 1",
				"variable 'y' is not declared",
			],
		);
		// The first declaration keeps its symbol.
		let analyzer = analyze("let n = 1; let n = \"s\"; function g() { return 1; } function g() {} n = g();");
		assert_eq!(analyzer.symbols().lookup("n").map(|symbol| symbol.data_type), Some(DataType::Number));
		assert_eq!(analyzer.symbols().lookup("g").and_then(|symbol| symbol.return_type), Some(DataType::Number));
	}

	#[test]
	fn undeclared_names() {
		errors("x = 1;", &["variable 'x' is not declared"]);
		errors("print(y);", &["variable 'y' is not declared"]);
		errors("go();", &["function 'go' is not declared"]);
		errors("missing.log(1);", &["variable 'missing' is not declared"]);
		errors("let p = new Point(); print(p);", &["class 'Point' is not declared"]);
		errors("{ let inner = 1; print(inner); } print(inner);", &["variable 'inner' is not declared"]);
	}

	#[test]
	fn assignments() {
		errors("const c = 1; c = 2;", &["cannot reassign constant 'c'"]);
		errors("const c = 1; c += 2;", &["cannot reassign constant 'c'"]);
		warnings("let n = 1; n = \"s\";", &["line 1, column 12: assigning string to variable of type number"]);
		warnings("let u; u = 1; print(u);", &[]);
	}

	#[test]
	fn arithmetic() {
		errors("let s = \"a\" + 1; print(s);", &["operator '+' requires numeric operands, found string and number"]);
		errors("let b = true * false; print(b);", &[
			"operator '*' requires numeric operands, found boolean and boolean",
		]);
		errors("let n = -\"s\"; print(n);", &["operator '-' requires a numeric operand"]);
		// An operand that already failed is not reported again.
		errors("let n = (\"a\" - 1) * 2 + -missing; print(n);", &[
			"operator '-' requires numeric operands, found string and number",
			"variable 'missing' is not declared",
		]);
		errors("function f(a) { return a * 2; } let r = f(1) + 1; print(r);", &[]);
	}

	#[test]
	fn boolean_contexts() {
		warnings("if (1) {}", &["line 1, column 1: 'if' condition should be boolean, found number"]);
		warnings("while (\"s\") {}", &["line 1, column 1: 'while' condition should be boolean, found string"]);
		warnings("for (let i = 0; i; i += 1) {}", &[
			"line 1, column 1: 'for' condition should be boolean, found number",
		]);
		warnings("let b = 1 && true; print(b);", &["line 1, column 9: left operand of '&&' should be boolean"]);
		warnings("let b = !\"s\"; print(b);", &["line 1, column 9: operator '!' requires a boolean operand"]);
		warnings("let b = 1 < 2 || 1 === 1; if (b) {} print(!b);", &[]);
		warnings("let a = 1; let x = a[\"k\"]; print(x);", &["line 1, column 20: index should be numeric"]);
	}

	#[test]
	fn returns() {
		errors("return 1;", &["'return' can only be used inside a function"]);
		errors(
			"function outer() { function inner() { return 1; } return inner(); } outer(); return;",
			&["'return' can only be used inside a function"],
		);
	}

	#[test]
	fn calls() {
		errors("let x = 1; x();", &["'x' is not a function"]);
		errors("function f(a, b) { return a + b; } f(1);", &["function 'f' expects 2 arguments, got 1"]);
		errors("print(1, 2);", &["function 'print' expects 1 arguments, got 2"]);
		// Zero-parameter functions are checked too.
		errors("let line = input(1); print(line);", &["function 'input' expects 0 arguments, got 1"]);
		errors("function tick() {} tick(1);", &["function 'tick' expects 0 arguments, got 1"]);
		errors("console.log(1, 2, 3); let line = input(); print(parseInt(line) + 1);", &[]);
		errors("function f() { return \"s\"; } let n = f() * 2; print(n);", &[
			"operator '*' requires numeric operands, found string and number",
		]);
	}

	#[test]
	fn return_types() {
		let analyzer = analyze(
			"function none() { return; } function text() { return \"a\"; } \
			 function mixed(x) { if (x) { return 1; } return \"a\"; } \
			 let a = none(); let b = text(); let c = mixed(true); print(a); print(b); print(c);",
		);
		let global = &analyzer.symbols().global().symbols;
		assert_eq!(global["none"].return_type, Some(DataType::Void));
		assert_eq!(global["text"].return_type, Some(DataType::String));
		assert_eq!(global["mixed"].return_type, Some(DataType::Unknown));
		assert_eq!(global["a"].data_type, DataType::Void);
		assert_eq!(global["b"].data_type, DataType::String);
		assert_eq!(global["c"].data_type, DataType::Unknown);
	}

	#[test]
	fn uninitialized_use() {
		warnings("let x; print(x);", &["line 1, column 14: variable 'x' may not be initialized"]);
	}

	#[test]
	fn classes_and_exceptions() {
		errors(
			"class Point { let x = 1; print(x); } let p = new Point(); \
			 try { throw p; } catch (e) { print(e); } finally { print(p); }",
			&[],
		);
		errors("let n = 1; let p = new n(); print(p);", &["'n' is not a class"]);
		warnings("try {} catch (e) {}", &["line 1, column 15: parameter 'e' declared but never used"]);
	}

	#[test]
	fn scopes() {
		let analyzer = analyze("if (true) { let y = 1; print(y); } else print(1); while (false) { } for (;;) { }");
		let table = analyzer.symbols();
		let names: Vec<_> = table.global().children.iter().map(|&id| table.scope(id).name.as_str()).collect();
		assert_eq!(names, ["if_then", "while", "for"]);
		let if_then = table.scope(table.global().children[0]);
		assert!(if_then.children.is_empty());
		assert_eq!(if_then.symbols["y"].scope_level, 1);
		let for_scope = table.scope(table.global().children[2]);
		assert_eq!(for_scope.children.len(), 1);
		assert_eq!(table.scope(for_scope.children[0]).name, "block");
	}

	#[test]
	fn report() {
		let analyzer = analyze("let a = 1; function f(b) { return a + b; } f(a); let unused;");
		let report = analyzer.report();
		let banner = "=".repeat(60);
		assert!(report.starts_with(&format!("{banner}\nSEMANTIC ANALYSIS\n{banner}\n\nNo semantic errors found\n\n")));
		assert!(report.contains("WARNINGS (1):\n"));
		assert!(report.contains("  warning: line 1, column 50: variable 'unused' declared but never used\n"));
		assert!(report.contains(
			"  a [variable:number] used:✓ init:✓\n  f [function:function] used:✓ init:✓\n  unused [variable:unknown] \
			 used:✗ init:✗\n  function_f (level 1):\n    b [parameter:unknown] used:✓ init:✓\n"
		));

		let report = analyze("x;").report();
		assert!(report.contains("ERRORS (1):\n"));
		assert!(report.contains("  error: line 1, column 1: variable 'x' is not declared\n"));
		assert!(!report.contains("WARNINGS"));
	}

	#[test]
	fn reusable() {
		let tokens = Lexer::new("let a = 1;").tokenize().unwrap();
		let (program, _) = Parser::new(tokens).parse();
		let mut analyzer = Analyzer::new();
		assert!(analyzer.analyze(&program));
		assert!(analyzer.analyze(&program));
		assert_eq!(analyzer.warnings().len(), 1);
		let result = analyzer.into_result();
		assert!(result.ok);
		assert_eq!(result.warnings.len(), 1);
	}
}
