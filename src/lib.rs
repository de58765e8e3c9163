//! # From bare text to a checked syntax tree
//!
//! User's source code: `let average = (min + max) / 2;`

//! ## Scanning
//!
//! Also known as `lexing` or `lexical analysis`, takes in the characters and
//! converts them into tokens. Single characters `(`, `;`, numbers `2`, string
//! literals `"hi!"`, identifiers `min` and keywords `let` are all tokens.
//!
//! Whitespaces and comments are ignored. So the tokens are
//! `["let", "average", "=", "(", "min", "+", "max", ")", "/", "2", ";"]`.
//!
//! There are two scanners here. [`Lexer`] is written by hand. The
//! [`automata`] module instead compiles one regular expression per token kind
//! into an NFA, converts it to a DFA and minimizes it. Replaying that DFA
//! gives the same tokens as the hand-written lexer.

//! ## Parsing
//!
//! A `parser` builds a tree structure of tokens, the `abstract syntax tree`
//! or `AST`. The grammar is LL(1): one token of lookahead always tells which
//! rule applies, so every rule is a plain function calling the rules below
//! it.
//!
//! ``` markdown
//! average (VarDecl)
//! └── / (BinaryOp)
//!     ├── + (BinaryOp)
//!     │   ├── min (Identifier)
//!     │   └── max (Identifier)
//!     └── 2 (Literal)
//! ```
//!
//! A syntax error does not stop the parser. It records the error, skips to
//! the next statement and keeps going, so one run reports every broken
//! statement.

//! ## Static analysis
//!
//! Where we find out which declaration each name refers to. The `scope` comes
//! to play: the region of the program where a certain name refers to a certain
//! declaration.
//!
//! We also check types here. If `min` is a string, `min + max` is a `type
//! error`. Doubtful code that is still meaningful, like a number used as a
//! condition, only gets a warning.
//!
//! Everything up to this point is the `front end`. This crate stops here.

pub mod automata;
pub mod cli;
mod error;
mod frontend;
mod parser;
mod scanner;
pub mod semantic;
pub mod statement;

pub use automata::{Dfa, Nfa, build_min_dfa, compile};
pub use error::{
	AnalyzerError, FrontendError, LexError, LexErrorType, ParseError, ParseErrorType, RegexErrorType, RegexParseError,
	SemanticError,
};
pub use frontend::Frontend;
pub use parser::*;
pub use scanner::{KEYWORDS, Lexer, OPERATORS, Position, Token, TokenKind};
pub use semantic::{AnalysisResult, Analyzer};
pub use statement::{Program, Statement, ast_to_string};

/// Tokenize with the hand-written lexer. Whitespace and comments are dropped
/// and the last token is EOF.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> { Lexer::new(source).tokenize() }

/// Tokenize by replaying `dfa`, usually the one from [`build_min_dfa`].
/// Whitespace and comments are dropped and the last token is EOF.
pub fn tokenize_with_automaton(dfa: &Dfa, source: &str) -> Result<Vec<Token>, LexError> {
	let tokens = automata::AutomatonTokenizer::new(dfa, source).tokenize()?;
	Ok(automata::semantic_tokens(tokens))
}

/// Parse a token sequence. Always returns a program; syntax errors are
/// returned next to it.
pub fn parse(tokens: Vec<Token>) -> (Program, Vec<ParseError>) { Parser::new(tokens).parse() }

/// Run the semantic analyzer over a program.
pub fn analyze(program: &Program) -> AnalysisResult {
	let mut analyzer = Analyzer::new();
	analyzer.analyze(program);
	analyzer.into_result()
}
