/// A semantic error. Never aborts the analysis.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}, column {col}: {message}")]
pub struct SemanticError {
	pub line:    usize,
	pub col:     usize,
	pub message: String,
}

impl SemanticError {
	pub fn new(line: usize, col: usize, message: impl Into<String>) -> Self {
		Self { line, col, message: message.into() }
	}
}

/// Failures of the analyzer itself, as opposed to problems in the program.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzerError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
}
