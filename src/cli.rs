use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(
	name = "scriptfront",
	after_long_help = "Lexer, lexer generator, parser and semantic analyzer for a small C-like scripting language."
)]
pub struct Cli {
	/// Print a summary of each stage to stderr
	#[arg(long, short)]
	pub verbose: bool,
	#[command(subcommand)]
	pub mode:    Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Print the tokens of a source file
	Tokens {
		path:      PathBuf,
		/// Tokenize with the minimal DFA instead of the hand-written lexer
		#[arg(long)]
		automaton: bool,
	},
	/// Print the syntax tree of a source file
	Ast { path: PathBuf },
	/// Run the whole front end and print the semantic report
	Check { path: PathBuf },
	/// Build the minimal token DFA and write it in DOT format
	Dfa {
		/// Write the DOT text here instead of stdout
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Check lines read from stdin
	Repl,
}
