use std::process::ExitCode;

use palc::Parser;
use scriptfront::cli::*;

fn main() -> ExitCode {
	let cli = Cli::parse();
	let frontend = scriptfront::Frontend::new(cli.verbose);

	let result = match cli.mode {
		Mode::Tokens { path, automaton } => frontend.tokens_file(&path, automaton),
		Mode::Ast { path } => frontend.ast_file(&path),
		Mode::Check { path } => frontend.check_file(&path),
		Mode::Dfa { output } => frontend.dfa(output.as_deref()),
		Mode::Repl => {
			frontend.run_prompt();
			Ok(())
		}
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{e}");
			ExitCode::FAILURE
		}
	}
}
