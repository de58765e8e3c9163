pub mod parser;
pub mod regex;
pub mod scanner;
pub mod semantic;

pub use parser::{ParseError, ParseErrorType};
pub use regex::{RegexErrorType, RegexParseError};
pub use scanner::{LexError, LexErrorType};
pub use semantic::{AnalyzerError, SemanticError};

/// FrontendError is the top-level error type of the driver and the binary.
///
/// The library entry points return the stage errors directly; this type only
/// exists to give the command line one thing to report.
#[derive(thiserror::Error, Debug)]
pub enum FrontendError {
	/// Internal compiler error, should never happen
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Lexing aborted on the first unmatched character
	#[error("Lexical error at {0}")]
	LexError(#[from] LexError),
	/// A token pattern could not be compiled
	#[error("Regex error: {0}")]
	RegexError(#[from] RegexParseError),
	/// Parser errors encountered during parsing
	#[error("Generated {0} parser errors")]
	ParserErrors(usize),
	/// Semantic errors found by the analyzer
	#[error("Generated {0} semantic errors")]
	SemanticErrors(usize),
}
