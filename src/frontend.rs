use std::{fs::read_to_string, io::Write, path::Path};

use anyhow::Context;

use crate::{
	AnalysisResult, FrontendError, Program, analyze, ast_to_string,
	automata::{Dfa, alphabet, token_nfa},
	parse, tokenize, tokenize_with_automaton,
};

/// Frontend runs source text through the pipeline and prints what each stage
/// produced. Results go to stdout, diagnostics to stderr.
pub struct Frontend {
	verbose: bool,
}

impl Frontend {
	/// With `verbose`, every stage also prints a one-line summary to stderr.
	pub fn new(verbose: bool) -> Self { Self { verbose } }

	/// Print the semantic tokens of a file, one per line.
	pub fn tokens_file<P: AsRef<Path>>(&self, path: P, automaton: bool) -> Result<(), FrontendError> {
		let source = read_source(path)?;
		let tokens = if automaton { tokenize_with_automaton(&self.build_dfa()?, &source)? } else { tokenize(&source)? };
		if self.verbose {
			eprintln!("lexer: {} tokens", tokens.len());
		}
		for token in &tokens {
			println!("{token}");
		}
		Ok(())
	}

	/// Print the syntax tree of a file. The tree is printed even when the
	/// parser had to recover from errors.
	pub fn ast_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FrontendError> {
		let (program, errors) = self.parse(&read_source(path)?)?;
		print!("{}", ast_to_string(&program));
		if errors > 0 {
			return Err(FrontendError::ParserErrors(errors));
		}
		Ok(())
	}

	/// Print the semantic report of a file.
	pub fn check_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FrontendError> {
		let result = self.check(&read_source(path)?)?;
		print!("{}", result.report);
		if !result.ok {
			return Err(FrontendError::SemanticErrors(result.errors.len()));
		}
		Ok(())
	}

	/// Print a summary of the minimal token DFA and write it as DOT text to
	/// `output`, or to stdout.
	pub fn dfa(&self, output: Option<&Path>) -> Result<(), FrontendError> {
		let dfa = self.build_dfa()?;
		let dot = dfa.to_dot();
		match output {
			Some(path) => {
				std::fs::write(path, dot).with_context(|| format!("Failed write {}", path.display()))?;
				println!("{dfa}");
				println!("written to {}", path.display());
			}
			None => {
				eprintln!("{dfa}");
				print!("{dot}");
			}
		}
		Ok(())
	}

	/// Run the REPL prompt. Each line is checked on its own.
	pub fn run_prompt(&self) {
		let mut input = String::new();
		let stdin = std::io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = std::io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited scriptfront repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			match self.check(input.trim()) {
				Ok(result) => {
					for error in &result.errors {
						eprintln!("error: {error}");
					}
					for warning in &result.warnings {
						eprintln!("warning: {warning}");
					}
					if result.ok {
						println!("ok");
					}
				}
				Err(e) => eprintln!("{e}"),
			}
		}
	}
}

impl Frontend {
	/// Tokenize and parse, printing every parse error. Returns the recovered
	/// program and the number of errors.
	fn parse(&self, source: &str) -> Result<(Program, usize), FrontendError> {
		let tokens = tokenize(source)?;
		if self.verbose {
			eprintln!("lexer: {} tokens", tokens.len());
		}
		let (program, errors) = parse(tokens);
		for error in &errors {
			eprintln!("Parse error at {error}");
		}
		if self.verbose {
			eprintln!("parser: {} statements, {} errors", program.statements.len(), errors.len());
		}
		Ok((program, errors.len()))
	}

	/// The whole pipeline. Semantic analysis only runs on a program that
	/// parsed cleanly.
	fn check(&self, source: &str) -> Result<AnalysisResult, FrontendError> {
		let (program, errors) = self.parse(source)?;
		if errors > 0 {
			return Err(FrontendError::ParserErrors(errors));
		}
		let result = analyze(&program);
		if self.verbose {
			eprintln!("analyzer: {} errors, {} warnings", result.errors.len(), result.warnings.len());
		}
		Ok(result)
	}

	fn build_dfa(&self) -> Result<Dfa, FrontendError> {
		let nfa = token_nfa()?;
		let dfa = Dfa::build(&nfa, &alphabet());
		let minimal = dfa.minimize();
		if self.verbose {
			eprintln!(
				"automata: {} NFA states, {} DFA states, {} after minimization",
				nfa.states.len(),
				dfa.states.len(),
				minimal.states.len()
			);
		}
		Ok(minimal)
	}
}

fn read_source<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
	let path = path.as_ref();
	read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))
}
