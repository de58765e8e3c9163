/// A token produced by either lexer. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub kind:   TokenKind,
	pub lexeme: String,
	/// 1-based line of the first character.
	pub line:   usize,
	/// 1-based column of the first character.
	pub col:    usize,
}

impl Token {
	pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, col: usize) -> Self {
		Self { kind, lexeme: lexeme.into(), line, col }
	}

	pub fn position(&self) -> Position { Position { line: self.line, col: self.col } }
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:>4}:{:<4} {:<14} {:?}", self.line, self.col, self.kind.name(), self.lexeme)
	}
}

/// Where a token or a syntax node starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
	pub line: usize,
	pub col:  usize,
}

impl Position {
	pub fn new(line: usize, col: usize) -> Self { Self { line, col } }
}

/// The different kinds of tokens. The ordering is used by automaton accept
/// sets, so it is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
	// Keywords
	Let,
	Const,
	Function,
	If,
	Else,
	While,
	For,
	Return,
	True,
	False,
	Class,
	New,
	Throw,
	Try,
	Catch,
	Finally,
	// Literals and names
	Identifier,
	Number,
	String,
	/// A backtick template literal, `${...}` kept as text.
	Template,
	// Operators and punctuation
	StrictEq,
	StrictNeq,
	EqEq,
	Neq,
	MulAssign,
	AddAssign,
	SubAssign,
	Le,
	Ge,
	Or,
	And,
	LBrace,
	RBrace,
	LParen,
	RParen,
	LBrack,
	RBrack,
	Semi,
	Colon,
	Apostrophe,
	Comma,
	Dot,
	Assign,
	Lt,
	Gt,
	Plus,
	Minus,
	Star,
	Slash,
	Percent,
	Bang,
	TemplateStart,
	// Trivia, only produced by the automaton tokenizer
	Whitespace,
	Comment,
	/// End of file/input.
	Eof,
}

/// Reserved words. Identifiers matching one of these are reclassified.
pub const KEYWORDS: [(&str, TokenKind); 16] = [
	("let", TokenKind::Let),
	("const", TokenKind::Const),
	("function", TokenKind::Function),
	("if", TokenKind::If),
	("else", TokenKind::Else),
	("while", TokenKind::While),
	("for", TokenKind::For),
	("return", TokenKind::Return),
	("true", TokenKind::True),
	("false", TokenKind::False),
	("class", TokenKind::Class),
	("new", TokenKind::New),
	("throw", TokenKind::Throw),
	("try", TokenKind::Try),
	("catch", TokenKind::Catch),
	("finally", TokenKind::Finally),
];

/// Every operator and punctuation lexeme.
pub const OPERATORS: [(&str, TokenKind); 32] = [
	("===", TokenKind::StrictEq),
	("!==", TokenKind::StrictNeq),
	("==", TokenKind::EqEq),
	("!=", TokenKind::Neq),
	("*=", TokenKind::MulAssign),
	("+=", TokenKind::AddAssign),
	("-=", TokenKind::SubAssign),
	("<=", TokenKind::Le),
	(">=", TokenKind::Ge),
	("||", TokenKind::Or),
	("&&", TokenKind::And),
	("{", TokenKind::LBrace),
	("}", TokenKind::RBrace),
	("(", TokenKind::LParen),
	(")", TokenKind::RParen),
	("[", TokenKind::LBrack),
	("]", TokenKind::RBrack),
	(";", TokenKind::Semi),
	(":", TokenKind::Colon),
	("'", TokenKind::Apostrophe),
	(",", TokenKind::Comma),
	(".", TokenKind::Dot),
	("=", TokenKind::Assign),
	("<", TokenKind::Lt),
	(">", TokenKind::Gt),
	("+", TokenKind::Plus),
	("-", TokenKind::Minus),
	("*", TokenKind::Star),
	("/", TokenKind::Slash),
	("%", TokenKind::Percent),
	("!", TokenKind::Bang),
	("${", TokenKind::TemplateStart),
];

/// The operator table in matching order: longest first, ties by text.
pub fn operators_by_length() -> Vec<(&'static str, TokenKind)> {
	let mut operators = OPERATORS.to_vec();
	operators.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
	operators
}

impl TokenKind {
	pub fn keyword(text: &str) -> Option<Self> {
		KEYWORDS.iter().find(|(keyword, _)| *keyword == text).map(|&(_, kind)| kind)
	}

	pub fn operator(text: &str) -> Option<Self> {
		OPERATORS.iter().find(|(operator, _)| *operator == text).map(|&(_, kind)| kind)
	}

	pub fn keyword_or_identifier(text: &str) -> Self { Self::keyword(text).unwrap_or(TokenKind::Identifier) }

	pub fn is_keyword(&self) -> bool { KEYWORDS.iter().any(|(_, kind)| kind == self) }

	pub fn is_operator(&self) -> bool { OPERATORS.iter().any(|(_, kind)| kind == self) }

	/// Whitespace and comments carry no meaning for the parser.
	pub fn is_ignored(&self) -> bool { matches!(self, TokenKind::Whitespace | TokenKind::Comment) }

	/// Priority for disambiguating an automaton accept set. Higher wins.
	/// Fixed lexemes beat the character-class patterns.
	pub fn priority(&self) -> u8 {
		match self {
			TokenKind::Whitespace => 1,
			TokenKind::Comment => 2,
			TokenKind::Identifier => 3,
			TokenKind::Number => 4,
			TokenKind::String | TokenKind::Template => 5,
			TokenKind::Eof => 0,
			_ => 10,
		}
	}

	/// Upper-case token name, e.g. `LET`, `ID`, `EQEQ`.
	pub fn name(&self) -> &'static str {
		use TokenKind::*;
		match self {
			Let => "LET",
			Const => "CONST",
			Function => "FUNCTION",
			If => "IF",
			Else => "ELSE",
			While => "WHILE",
			For => "FOR",
			Return => "RETURN",
			True => "TRUE",
			False => "FALSE",
			Class => "CLASS",
			New => "NEW",
			Throw => "THROW",
			Try => "TRY",
			Catch => "CATCH",
			Finally => "FINALLY",
			Identifier => "ID",
			Number => "NUM",
			String => "STRING",
			Template => "TEMPLATE",
			StrictEq => "STRICT_EQ",
			StrictNeq => "STRICT_NEQ",
			EqEq => "EQEQ",
			Neq => "NEQ",
			MulAssign => "MUL_ASSIGN",
			AddAssign => "ADD_ASSIGN",
			SubAssign => "SUB_ASSIGN",
			Le => "LE",
			Ge => "GE",
			Or => "OR",
			And => "AND",
			LBrace => "LBRACE",
			RBrace => "RBRACE",
			LParen => "LPAREN",
			RParen => "RPAREN",
			LBrack => "LBRACK",
			RBrack => "RBRACK",
			Semi => "SEMI",
			Colon => "COLON",
			Apostrophe => "APOSTROPHE",
			Comma => "COMMA",
			Dot => "DOT",
			Assign => "ASSIGN",
			Lt => "LT",
			Gt => "GT",
			Plus => "PLUS",
			Minus => "MINUS",
			Star => "STAR",
			Slash => "SLASH",
			Percent => "PERCENT",
			Bang => "BANG",
			TemplateStart => "TEMPLATE_START",
			Whitespace => "WS",
			Comment => "COMMENT",
			Eof => "EOF",
		}
	}
}

impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}
