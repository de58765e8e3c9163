//! The `Lexer` uses the `Lexical grammar`: its alphabet is characters and its
//! strings are tokens. The `Parser` uses the `Syntactic grammar`: its alphabet
//! is tokens and its strings are programs.
//!
//! The grammar is LL(1), so a recursive-descent parser with one token of
//! lookahead decides every production without backtracking.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|= += -= *=|Right
//! Or|\|\||Left
//! And|&&|Left
//! Equality|== != === !==|Left
//! Relational|< <= > >=|Left
//! Additive|+ -|Left
//! Multiplicative|* / %|Left
//! Unary|! - +|Right
//! Postfix|() [] .|Left
//!
//! ``` BNF
//! program     → statement* EOF ;
//! statement   → varDecl | funDecl | classDecl | ifStmt | whileStmt | forStmt
//!             | returnStmt | throwStmt | tryStmt | block | ";" | exprStmt ;
//! varDecl     → ( "let" | "const" ) ID ( "=" expression )? ";" ;
//! funDecl     → "function" ID "(" ( ID ( "," ID )* )? ")" block ;
//! classDecl   → "class" ID "{" statement* "}" ;
//! ifStmt      → "if" "(" expression ")" statement ( "else" statement )? ;
//! whileStmt   → "while" "(" expression ")" statement ;
//! forStmt     → "for" "(" ( varDecl | exprStmt | ";" ) expression? ";" expression? ")" statement ;
//! returnStmt  → "return" expression? ";" ;
//! throwStmt   → "throw" expression ";" ;
//! tryStmt     → "try" block ( "catch" "(" ID ")" block )? ( "finally" block )? ;
//! block       → "{" statement* "}" ;
//! exprStmt    → expression ";" ;
//!
//! expression  → assignment ;
//! assignment  → or ( ( "=" | "+=" | "-=" | "*=" ) assignment )? ;
//! or          → and ( "||" and )* ;
//! and         → equality ( "&&" equality )* ;
//! equality    → relational ( ( "==" | "!=" | "===" | "!==" ) relational )* ;
//! relational  → additive ( ( "<" | "<=" | ">" | ">=" ) additive )* ;
//! additive    → multiplicative ( ( "+" | "-" ) multiplicative )* ;
//! multiplicative → unary ( ( "*" | "/" | "%" ) unary )* ;
//! unary       → ( "!" | "-" | "+" ) unary | postfix ;
//! postfix     → primary ( "(" arguments? ")" | "[" expression "]" | "." ID )* ;
//! primary     → ID | NUM | STRING | "true" | "false" | "(" expression ")"
//!             | "new" ID "(" arguments? ")" ;
//! ```
//!
//! Syntax errors never abort the parse. The error is recorded, the parser
//! skips ahead to the next statement boundary (`panic mode`) and carries on,
//! so one malformed statement yields one error.
mod expression;

use TokenKind::*;
pub use expression::*;

use crate::{
	ParseError, ParseErrorType, Token, TokenKind,
	statement::{self, Block, CatchClause, DeclarationKind, Parameter, Program, Statement},
};

/// Tokens that can only begin a statement. Panic mode stops in front of them.
const STATEMENT_START: [TokenKind; 10] = [Let, Const, Function, If, While, For, Return, Class, Throw, Try];

/// A recursive-descent parser over a token vector.
pub struct Parser {
	/// The tokens to parse, always terminated by EOF.
	tokens:  Vec<Token>,
	/// Index of the token currently being considered
	current: usize,
	errors:  Vec<ParseError>,
}

impl Parser {
	/// Whitespace and comment tokens are dropped, and an EOF token is added
	/// if the sequence lacks one.
	pub fn new(tokens: Vec<Token>) -> Self {
		let mut tokens: Vec<Token> = tokens.into_iter().filter(|token| !token.kind.is_ignored()).collect();
		if tokens.last().is_none_or(|token| token.kind != Eof) {
			let (line, col) =
				tokens.last().map_or((1, 1), |token| (token.line, token.col + token.lexeme.chars().count()));
			tokens.push(Token::new(Eof, "EOF", line, col));
		}
		Self { tokens, current: 0, errors: Vec::new() }
	}

	/// Parse the whole token sequence. Always returns a program, together
	/// with every syntax error met on the way.
	pub fn parse(mut self) -> (Program, Vec<ParseError>) {
		let statements = self.statement_list(true);
		(Program { statements }, self.errors)
	}

	/// Statements up to EOF, or up to the closing `}` of a block.
	fn statement_list(&mut self, top_level: bool) -> Vec<Statement> {
		let mut statements = Vec::new();
		loop {
			match self.peek().kind {
				Eof => break,
				RBrace if !top_level => break,
				RBrace => {
					let error = ParseError::new(self.peek(), ParseErrorType::UnmatchedBrace);
					self.errors.push(error);
					self.advance();
					continue;
				}
				_ => {}
			}
			let start = self.current;
			match self.statement() {
				Ok(Some(statement)) => statements.push(statement),
				Ok(None) => {}
				Err(error) => {
					self.errors.push(error);
					self.synchronize(start);
				}
			}
		}
		statements
	}

	/// Parse one statement. An empty statement `;` yields nothing.
	fn statement(&mut self) -> Result<Option<Statement>, ParseError> {
		let statement = match self.peek().kind {
			Let | Const => self.var_declaration()?,
			Function => self.function_declaration()?,
			Class => self.class_declaration()?,
			If => self.if_statement()?,
			While => self.while_statement()?,
			For => self.for_statement()?,
			Return => self.return_statement()?,
			Throw => self.throw_statement()?,
			Try => self.try_statement()?,
			LBrace => Statement::Block(self.block()?),
			Semi => {
				self.advance();
				return Ok(None);
			}
			_ => self.expression_statement()?,
		};
		Ok(Some(statement))
	}

	/// The body of `if`, `while` and `for`. A lone `;` becomes an empty block.
	fn body(&mut self) -> Result<Statement, ParseError> {
		let position = self.peek().position();
		Ok(self.statement()?.unwrap_or(Statement::Block(Block { statements: Vec::new(), position })))
	}

	fn var_declaration(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect_any(&[Let, Const])?;
		let kind = if keyword.kind == Const { DeclarationKind::Const } else { DeclarationKind::Let };
		let name = self.expect(Identifier)?.lexeme;
		let initializer = if self.match_any(&[Assign]).is_some() { Some(self.expression()?) } else { None };
		self.expect(Semi)?;
		Ok(Statement::VarDecl { kind, name, initializer, position: keyword.position() })
	}

	fn function_declaration(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(Function)?;
		let name = self.expect(Identifier)?.lexeme;
		self.expect(LParen)?;
		let mut parameters = Vec::new();
		if self.check(Identifier) {
			loop {
				let token = self.expect(Identifier)?;
				parameters.push(Parameter { position: token.position(), name: token.lexeme });
				if self.match_any(&[Comma]).is_none() {
					break;
				}
			}
		}
		self.expect(RParen)?;
		let body = self.block()?;
		Ok(Statement::FunctionDecl(statement::Function { name, parameters, body, position: keyword.position() }))
	}

	fn class_declaration(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(Class)?;
		let name = self.expect(Identifier)?.lexeme;
		let body = self.block()?.statements;
		Ok(Statement::ClassDecl { name, body, position: keyword.position() })
	}

	fn if_statement(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(If)?;
		self.expect(LParen)?;
		let condition = self.expression()?;
		self.expect(RParen)?;
		let then_branch = Box::new(self.body()?);
		let else_branch = if self.match_any(&[Else]).is_some() { Some(Box::new(self.body()?)) } else { None };
		Ok(Statement::If { condition, then_branch, else_branch, position: keyword.position() })
	}

	fn while_statement(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(While)?;
		self.expect(LParen)?;
		let condition = self.expression()?;
		self.expect(RParen)?;
		let body = Box::new(self.body()?);
		Ok(Statement::While { condition, body, position: keyword.position() })
	}

	fn for_statement(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(For)?;
		self.expect(LParen)?;

		let init = match self.peek().kind {
			Let | Const => Some(Box::new(self.var_declaration()?)),
			Semi => {
				self.advance();
				None
			}
			_ => Some(Box::new(self.expression_statement()?)),
		};

		let condition = if self.check(Semi) { None } else { Some(self.expression()?) };
		self.expect(Semi)?;

		let update = if self.check(RParen) { None } else { Some(self.expression()?) };
		self.expect(RParen)?;

		let body = Box::new(self.body()?);
		Ok(Statement::For { init, condition, update, body, position: keyword.position() })
	}

	fn return_statement(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(Return)?;
		let value = if self.check(Semi) { None } else { Some(self.expression()?) };
		self.expect(Semi)?;
		Ok(Statement::Return { value, position: keyword.position() })
	}

	fn throw_statement(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(Throw)?;
		let value = self.expression()?;
		self.expect(Semi)?;
		Ok(Statement::Throw { value, position: keyword.position() })
	}

	fn try_statement(&mut self) -> Result<Statement, ParseError> {
		let keyword = self.expect(Try)?;
		let block = self.block()?;

		let catch = if self.match_any(&[Catch]).is_some() {
			self.expect(LParen)?;
			let token = self.expect(Identifier)?;
			self.expect(RParen)?;
			let parameter = Parameter { position: token.position(), name: token.lexeme };
			Some(CatchClause { parameter, block: self.block()? })
		} else {
			None
		};
		let finally = if self.match_any(&[Finally]).is_some() { Some(self.block()?) } else { None };

		if catch.is_none() && finally.is_none() {
			return Err(ParseError::new(self.peek(), ParseErrorType::MissingCatchOrFinally));
		}
		Ok(Statement::Try { block, catch, finally, position: keyword.position() })
	}

	fn block(&mut self) -> Result<Block, ParseError> {
		let brace = self.expect(LBrace)?;
		let statements = self.statement_list(false);
		self.expect(RBrace)?;
		Ok(Block { statements, position: brace.position() })
	}

	fn expression_statement(&mut self) -> Result<Statement, ParseError> {
		let expression = self.expression()?;
		self.expect(Semi)?;
		Ok(Statement::Expression(expression))
	}

	fn expression(&mut self) -> Result<Expression, ParseError> { self.assignment() }

	/// Right-associative. The target must be a bare identifier; anything else
	/// is rejected as soon as the operator is seen.
	fn assignment(&mut self) -> Result<Expression, ParseError> {
		let target = self.or()?;
		let Some(operator) = self.match_any(&[Assign, AddAssign, SubAssign, MulAssign]) else {
			return Ok(target);
		};
		let Expression::Identifier { name, position } = target else {
			return Err(ParseError::new(&operator, ParseErrorType::InvalidAssignmentTarget));
		};
		let mut value = self.assignment()?;
		// `x += e` is `x = x + e`
		if let Some(binary) = BinaryOperator::from_token(operator.kind) {
			value = Expression::binary(Expression::Identifier { name: name.clone(), position }, binary, value);
		}
		Ok(Expression::assignment(name, value, position))
	}

	fn or(&mut self) -> Result<Expression, ParseError> { self.binary(&[Or], Self::and) }

	fn and(&mut self) -> Result<Expression, ParseError> { self.binary(&[And], Self::equality) }

	fn equality(&mut self) -> Result<Expression, ParseError> {
		self.binary(&[EqEq, Neq, StrictEq, StrictNeq], Self::relational)
	}

	fn relational(&mut self) -> Result<Expression, ParseError> { self.binary(&[Lt, Le, Gt, Ge], Self::additive) }

	fn additive(&mut self) -> Result<Expression, ParseError> { self.binary(&[Plus, Minus], Self::multiplicative) }

	fn multiplicative(&mut self) -> Result<Expression, ParseError> {
		self.binary(&[Star, Slash, Percent], Self::unary)
	}

	/// One left-associative precedence level.
	fn binary(
		&mut self,
		operators: &[TokenKind],
		operand: fn(&mut Self) -> Result<Expression, ParseError>,
	) -> Result<Expression, ParseError> {
		let mut expression = operand(self)?;
		while let Some(token) = self.match_any(operators) {
			let Some(operator) = BinaryOperator::from_token(token.kind) else {
				return Err(ParseError::new(&token, ParseErrorType::ExpectedExpression(token.kind)));
			};
			expression = Expression::binary(expression, operator, operand(self)?);
		}
		Ok(expression)
	}

	fn unary(&mut self) -> Result<Expression, ParseError> {
		let Some(operator) = UnaryOperator::from_token(self.peek().kind) else {
			return self.postfix();
		};
		let token = self.advance();
		let operand = self.unary()?;
		Ok(Expression::unary(operator, operand, token.position()))
	}

	fn postfix(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.primary()?;
		loop {
			if self.match_any(&[LParen]).is_some() {
				let arguments = self.arguments()?;
				expression = Expression::call(expression, arguments);
			} else if self.match_any(&[LBrack]).is_some() {
				let index = self.expression()?;
				self.expect(RBrack)?;
				expression = Expression::index(expression, index);
			} else if self.match_any(&[Dot]).is_some() {
				let member = self.expect(Identifier)?.lexeme;
				expression = Expression::member(expression, member);
			} else {
				return Ok(expression);
			}
		}
	}

	/// Comma-separated arguments and the closing `)`, the `(` already consumed.
	fn arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
		let mut arguments = Vec::new();
		if !self.check(RParen) {
			loop {
				arguments.push(self.expression()?);
				if self.match_any(&[Comma]).is_none() {
					break;
				}
			}
		}
		self.expect(RParen)?;
		Ok(arguments)
	}

	fn primary(&mut self) -> Result<Expression, ParseError> {
		let token = self.peek().clone();
		let position = token.position();
		let expression = match token.kind {
			Identifier => Expression::Identifier { name: token.lexeme.clone(), position },
			Number => {
				let value = LiteralValue::number(&token.lexeme)
					.ok_or_else(|| ParseError::new(&token, ParseErrorType::InvalidNumber))?;
				Expression::Literal { value, position }
			}
			String | Template => {
				// Quotes are stripped; no escape or `${}` processing.
				let quote = if token.kind == Template { '`' } else { '"' };
				let lexeme = token.lexeme.as_str();
				let text = lexeme.strip_prefix(quote).and_then(|text| text.strip_suffix(quote)).unwrap_or(lexeme);
				Expression::Literal { value: LiteralValue::String(text.to_string()), position }
			}
			True | False => Expression::Literal { value: LiteralValue::Boolean(token.kind == True), position },
			LParen => {
				self.advance();
				let expression = self.expression()?;
				self.expect(RParen)?;
				return Ok(expression);
			}
			New => {
				self.advance();
				let class_name = self.expect(Identifier)?.lexeme;
				self.expect(LParen)?;
				let arguments = self.arguments()?;
				return Ok(Expression::New { class_name, arguments, position });
			}
			kind => return Err(ParseError::new(&token, ParseErrorType::ExpectedExpression(kind))),
		};
		self.advance();
		Ok(expression)
	}

	/// Skip to the next statement boundary after an error.
	///
	/// If the failed statement consumed nothing, its first token is skipped so
	/// the parser always makes progress. A `{` opened since `start` is skipped
	/// through its matching `}`, which then ends the statement. Outside such a
	/// block, tokens are discarded until the previous one was `;`, or the
	/// current one starts a statement or closes a block.
	fn synchronize(&mut self, start: usize) {
		let mut depth = self.tokens[start..self.current].iter().fold(0usize, |depth, token| match token.kind {
			LBrace => depth + 1,
			RBrace => depth.saturating_sub(1),
			_ => depth,
		});
		if self.current == start {
			if self.check(LBrace) {
				depth += 1;
			}
			self.advance();
		}
		while !self.check(Eof) {
			if depth == 0
				&& (self.previous().kind == Semi || STATEMENT_START.contains(&self.peek().kind) || self.check(RBrace))
			{
				return;
			}
			match self.advance().kind {
				LBrace => depth += 1,
				RBrace => {
					depth -= 1;
					if depth == 0 {
						return;
					}
				}
				_ => {}
			}
		}
	}

	/// Consume the current token. EOF is never consumed.
	fn advance(&mut self) -> Token {
		let token = self.peek().clone();
		if self.current + 1 < self.tokens.len() {
			self.current += 1;
		}
		token
	}

	fn peek(&self) -> &Token { &self.tokens[self.current] }

	fn previous(&self) -> &Token { &self.tokens[self.current.saturating_sub(1)] }

	fn check(&self, kind: TokenKind) -> bool { self.peek().kind == kind }

	/// Consume the current token if it is one of `kinds`.
	fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
		kinds.contains(&self.peek().kind).then(|| self.advance())
	}

	fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> { self.expect_any(&[kind]) }

	fn expect_any(&mut self, kinds: &[TokenKind]) -> Result<Token, ParseError> {
		self.match_any(kinds).ok_or_else(|| {
			let found = self.peek();
			ParseError::new(found, ParseErrorType::Expected { expected: kinds.to_vec(), found: found.kind })
		})
	}
}
