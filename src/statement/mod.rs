//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `while` loop is always a statement.
//!
//! A [`Program`] owns its statements, and every node owns its children, so
//! the syntax tree is a plain tree with no sharing.
use std::fmt::Write;

use crate::{Expression, Position};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// A `let` or `const` declaration.
	VarDecl {
		kind:        DeclarationKind,
		name:        String,
		initializer: Option<Expression>,
		position:    Position,
	},
	FunctionDecl(Function),
	ClassDecl {
		name:     String,
		body:     Vec<Statement>,
		position: Position,
	},
	If {
		condition:   Expression,
		then_branch: Box<Statement>,
		else_branch: Option<Box<Statement>>,
		position:    Position,
	},
	While {
		condition: Expression,
		body:      Box<Statement>,
		position:  Position,
	},
	/// Each of the three header clauses may be omitted.
	For {
		init:      Option<Box<Statement>>,
		condition: Option<Expression>,
		update:    Option<Expression>,
		body:      Box<Statement>,
		position:  Position,
	},
	Return {
		value:    Option<Expression>,
		position: Position,
	},
	Throw {
		value:    Expression,
		position: Position,
	},
	Block(Block),
	/// An expression used as a statement.
	Expression(Expression),
	Try {
		block:    Block,
		catch:    Option<CatchClause>,
		finally:  Option<Block>,
		position: Position,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
	Let,
	Const,
}

impl std::fmt::Display for DeclarationKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			DeclarationKind::Let => "let",
			DeclarationKind::Const => "const",
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
	pub name:       String,
	pub parameters: Vec<Parameter>,
	pub body:       Block,
	pub position:   Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
	pub name:     String,
	pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
	pub statements: Vec<Statement>,
	pub position:   Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
	pub parameter: Parameter,
	pub block:     Block,
}

/// The root of the syntax tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
	pub statements: Vec<Statement>,
}

impl Statement {
	pub fn position(&self) -> Position {
		match self {
			Statement::VarDecl { position, .. }
			| Statement::ClassDecl { position, .. }
			| Statement::If { position, .. }
			| Statement::While { position, .. }
			| Statement::For { position, .. }
			| Statement::Return { position, .. }
			| Statement::Throw { position, .. }
			| Statement::Try { position, .. } => *position,
			Statement::FunctionDecl(function) => function.position,
			Statement::Block(block) => block.position,
			Statement::Expression(expression) => expression.position(),
		}
	}

	/// Write this statement and its children, one node per line, two spaces
	/// per level.
	pub fn write_tree(&self, out: &mut impl Write, indent: usize) -> std::fmt::Result {
		let prefix = "  ".repeat(indent);
		match self {
			Statement::VarDecl { kind, name, initializer, .. } => {
				writeln!(out, "{prefix}VarDecl({kind} {name})")?;
				if let Some(initializer) = initializer {
					initializer.write_tree(out, indent + 1)?;
				}
				Ok(())
			}
			Statement::FunctionDecl(Function { name, parameters, body, .. }) => {
				let parameters =
					parameters.iter().map(|parameter| parameter.name.as_str()).collect::<Vec<_>>().join(", ");
				writeln!(out, "{prefix}FunctionDecl({name}({parameters}))")?;
				write_statements(out, &body.statements, indent + 1)
			}
			Statement::ClassDecl { name, body, .. } => {
				writeln!(out, "{prefix}ClassDecl({name})")?;
				write_statements(out, body, indent + 1)
			}
			Statement::If { condition, then_branch, else_branch, .. } => {
				writeln!(out, "{prefix}IfStmt:")?;
				writeln!(out, "{prefix}  Condition:")?;
				condition.write_tree(out, indent + 2)?;
				writeln!(out, "{prefix}  Then:")?;
				then_branch.write_tree(out, indent + 2)?;
				if let Some(else_branch) = else_branch {
					writeln!(out, "{prefix}  Else:")?;
					else_branch.write_tree(out, indent + 2)?;
				}
				Ok(())
			}
			Statement::While { condition, body, .. } => {
				writeln!(out, "{prefix}WhileStmt:")?;
				writeln!(out, "{prefix}  Condition:")?;
				condition.write_tree(out, indent + 2)?;
				writeln!(out, "{prefix}  Body:")?;
				body.write_tree(out, indent + 2)
			}
			Statement::For { init, condition, update, body, .. } => {
				writeln!(out, "{prefix}ForStmt:")?;
				if let Some(init) = init {
					writeln!(out, "{prefix}  Init:")?;
					init.write_tree(out, indent + 2)?;
				}
				if let Some(condition) = condition {
					writeln!(out, "{prefix}  Condition:")?;
					condition.write_tree(out, indent + 2)?;
				}
				if let Some(update) = update {
					writeln!(out, "{prefix}  Update:")?;
					update.write_tree(out, indent + 2)?;
				}
				writeln!(out, "{prefix}  Body:")?;
				body.write_tree(out, indent + 2)
			}
			Statement::Return { value, .. } => {
				writeln!(out, "{prefix}ReturnStmt:")?;
				if let Some(value) = value {
					value.write_tree(out, indent + 1)?;
				}
				Ok(())
			}
			Statement::Throw { value, .. } => {
				writeln!(out, "{prefix}ThrowStmt:")?;
				value.write_tree(out, indent + 1)
			}
			Statement::Block(block) => {
				writeln!(out, "{prefix}Block:")?;
				write_statements(out, &block.statements, indent + 1)
			}
			Statement::Expression(expression) => {
				writeln!(out, "{prefix}ExprStmt:")?;
				expression.write_tree(out, indent + 1)
			}
			Statement::Try { block, catch, finally, .. } => {
				writeln!(out, "{prefix}TryStmt:")?;
				writeln!(out, "{prefix}  Try:")?;
				write_statements(out, &block.statements, indent + 2)?;
				if let Some(CatchClause { parameter, block }) = catch {
					writeln!(out, "{prefix}  Catch({}):", parameter.name)?;
					write_statements(out, &block.statements, indent + 2)?;
				}
				if let Some(finally) = finally {
					writeln!(out, "{prefix}  Finally:")?;
					write_statements(out, &finally.statements, indent + 2)?;
				}
				Ok(())
			}
		}
	}
}

fn write_statements(out: &mut impl Write, statements: &[Statement], indent: usize) -> std::fmt::Result {
	for statement in statements {
		statement.write_tree(out, indent)?;
	}
	Ok(())
}

/// The indented tree form of a program, e.g.
///
/// ```text
/// Program:
///   VarDecl(let x)
///     Literal(number: 1)
/// ```
impl std::fmt::Display for Program {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "Program:")?;
		write_statements(f, &self.statements, 1)
	}
}

/// Render a program as an indented tree.
pub fn ast_to_string(program: &Program) -> String { program.to_string() }
