//! Expression AST nodes.
//!
//! An `Expression` is a tree structure representing code like `-123 * (45.67)`
//! as nested nodes. Every node remembers where it starts in the source so
//! that later passes can point at it.
use std::fmt::Write;

use Expression::*;

use crate::{Position, TokenKind};

/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	Binary { left: Box<Expression>, operator: BinaryOperator, right: Box<Expression>, position: Position },
	Unary { operator: UnaryOperator, operand: Box<Expression>, position: Position },
	/// `name = value`. Compound assignments are desugared by the parser.
	Assignment { name: String, value: Box<Expression>, position: Position },
	Call { callee: Box<Expression>, arguments: Vec<Expression>, position: Position },
	New { class_name: String, arguments: Vec<Expression>, position: Position },
	Index { object: Box<Expression>, index: Box<Expression>, position: Position },
	Member { object: Box<Expression>, member: String, position: Position },
	Identifier { name: String, position: Position },
	Literal { value: LiteralValue, position: Position },
}

impl Expression {
	pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
		let position = left.position();
		Binary { left: Box::new(left), operator, right: Box::new(right), position }
	}

	pub fn unary(operator: UnaryOperator, operand: Expression, position: Position) -> Self {
		Unary { operator, operand: Box::new(operand), position }
	}

	pub fn assignment(name: String, value: Expression, position: Position) -> Self {
		Assignment { name, value: Box::new(value), position }
	}

	pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
		let position = callee.position();
		Call { callee: Box::new(callee), arguments, position }
	}

	pub fn index(object: Expression, index: Expression) -> Self {
		let position = object.position();
		Index { object: Box::new(object), index: Box::new(index), position }
	}

	pub fn member(object: Expression, member: String) -> Self {
		let position = object.position();
		Member { object: Box::new(object), member, position }
	}

	pub fn position(&self) -> Position {
		match self {
			Binary { position, .. }
			| Unary { position, .. }
			| Assignment { position, .. }
			| Call { position, .. }
			| New { position, .. }
			| Index { position, .. }
			| Member { position, .. }
			| Identifier { position, .. }
			| Literal { position, .. } => *position,
		}
	}

	/// Write this node and its children, one per line, two spaces per level.
	pub fn write_tree(&self, out: &mut impl Write, indent: usize) -> std::fmt::Result {
		let prefix = "  ".repeat(indent);
		match self {
			Binary { left, operator, right, .. } => {
				writeln!(out, "{prefix}BinaryOp({operator})")?;
				left.write_tree(out, indent + 1)?;
				right.write_tree(out, indent + 1)
			}
			Unary { operator, operand, .. } => {
				writeln!(out, "{prefix}UnaryOp({operator})")?;
				operand.write_tree(out, indent + 1)
			}
			Assignment { name, value, .. } => {
				writeln!(out, "{prefix}Assignment({name})")?;
				value.write_tree(out, indent + 1)
			}
			Call { callee, arguments, .. } => {
				writeln!(out, "{prefix}CallExpr:")?;
				writeln!(out, "{prefix}  Callee:")?;
				callee.write_tree(out, indent + 2)?;
				write_arguments(out, arguments, indent)
			}
			New { class_name, arguments, .. } => {
				writeln!(out, "{prefix}NewExpr(new {class_name})")?;
				write_arguments(out, arguments, indent)
			}
			Index { object, index, .. } => {
				writeln!(out, "{prefix}IndexExpr:")?;
				object.write_tree(out, indent + 1)?;
				index.write_tree(out, indent + 1)
			}
			Member { object, member, .. } => {
				writeln!(out, "{prefix}MemberExpr(.{member})")?;
				object.write_tree(out, indent + 1)
			}
			Identifier { name, .. } => writeln!(out, "{prefix}Identifier({name})"),
			Literal { value, .. } => writeln!(out, "{prefix}Literal({}: {value})", value.type_name()),
		}
	}
}

fn write_arguments(out: &mut impl Write, arguments: &[Expression], indent: usize) -> std::fmt::Result {
	if !arguments.is_empty() {
		writeln!(out, "{}  Args:", "  ".repeat(indent))?;
		for argument in arguments {
			argument.write_tree(out, indent + 2)?;
		}
	}
	Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
	Add,
	Subtract,
	Multiply,
	Divide,
	Modulo,
	Less,
	LessEqual,
	Greater,
	GreaterEqual,
	Equal,
	NotEqual,
	StrictEqual,
	StrictNotEqual,
	And,
	Or,
}

impl BinaryOperator {
	pub fn from_token(kind: TokenKind) -> Option<Self> {
		use BinaryOperator::*;
		Some(match kind {
			TokenKind::Plus | TokenKind::AddAssign => Add,
			TokenKind::Minus | TokenKind::SubAssign => Subtract,
			TokenKind::Star | TokenKind::MulAssign => Multiply,
			TokenKind::Slash => Divide,
			TokenKind::Percent => Modulo,
			TokenKind::Lt => Less,
			TokenKind::Le => LessEqual,
			TokenKind::Gt => Greater,
			TokenKind::Ge => GreaterEqual,
			TokenKind::EqEq => Equal,
			TokenKind::Neq => NotEqual,
			TokenKind::StrictEq => StrictEqual,
			TokenKind::StrictNeq => StrictNotEqual,
			TokenKind::And => And,
			TokenKind::Or => Or,
			_ => return None,
		})
	}

	pub fn symbol(&self) -> &'static str {
		use BinaryOperator::*;
		match self {
			Add => "+",
			Subtract => "-",
			Multiply => "*",
			Divide => "/",
			Modulo => "%",
			Less => "<",
			LessEqual => "<=",
			Greater => ">",
			GreaterEqual => ">=",
			Equal => "==",
			NotEqual => "!=",
			StrictEqual => "===",
			StrictNotEqual => "!==",
			And => "&&",
			Or => "||",
		}
	}

	pub fn is_arithmetic(&self) -> bool {
		matches!(self, Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo)
	}

	pub fn is_logical(&self) -> bool { matches!(self, Self::And | Self::Or) }
}

impl std::fmt::Display for BinaryOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.symbol()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
	Not,
	Negate,
	Plus,
}

impl UnaryOperator {
	pub fn from_token(kind: TokenKind) -> Option<Self> {
		match kind {
			TokenKind::Bang => Some(Self::Not),
			TokenKind::Minus => Some(Self::Negate),
			TokenKind::Plus => Some(Self::Plus),
			_ => None,
		}
	}
}

impl std::fmt::Display for UnaryOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::Not => "!",
			Self::Negate => "-",
			Self::Plus => "+",
		})
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
	Integer(i64),
	Float(f64),
	/// The text between the quotes, without escape processing.
	String(String),
	Boolean(bool),
}

impl LiteralValue {
	/// Parse a number lexeme. Anything with a fraction or an exponent, and
	/// integers too large for `i64`, become floats.
	pub fn number(lexeme: &str) -> Option<Self> {
		if !lexeme.contains(['.', 'e', 'E']) {
			if let Ok(integer) = lexeme.parse() {
				return Some(Self::Integer(integer));
			}
		}
		lexeme.parse().ok().map(Self::Float)
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Integer(_) | Self::Float(_) => "number",
			Self::String(_) => "string",
			Self::Boolean(_) => "boolean",
		}
	}
}

impl std::fmt::Display for LiteralValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Integer(n) => write!(f, "{n}"),
			Self::Float(n) => write!(f, "{n:?}"),
			Self::String(s) => write!(f, "{s}"),
			Self::Boolean(b) => write!(f, "{b}"),
		}
	}
}
