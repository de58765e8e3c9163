#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use scriptfront::{
		Frontend, FrontendError, LexErrorType, Statement, Token, TokenKind, analyze, ast_to_string, build_min_dfa,
		parse, tokenize, tokenize_with_automaton,
	};

	fn program(name: &str) -> PathBuf {
		PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("programs").join(name)
	}

	fn source(name: &str) -> String { std::fs::read_to_string(program(name)).unwrap() }

	#[test]
	fn declaration_tokens() {
		let expected = vec![
			Token::new(TokenKind::Let, "let", 1, 1),
			Token::new(TokenKind::Identifier, "x", 1, 5),
			Token::new(TokenKind::Assign, "=", 1, 7),
			Token::new(TokenKind::Number, "42", 1, 9),
			Token::new(TokenKind::Semi, ";", 1, 11),
			Token::new(TokenKind::Eof, "EOF", 1, 12),
		];
		assert_eq!(tokenize("let x = 42;").unwrap(), expected);
		let names: Vec<_> = expected.iter().map(|token| token.kind.to_string()).collect();
		assert_eq!(names, ["LET", "ID", "ASSIGN", "NUM", "SEMI", "EOF"]);
	}

	#[test]
	fn tokenizing_is_idempotent() {
		let sample = source("sample.js");
		assert_eq!(tokenize(&sample).unwrap(), tokenize(&sample).unwrap());
		let dfa = build_min_dfa().unwrap();
		assert_eq!(tokenize_with_automaton(&dfa, &sample).unwrap(), tokenize_with_automaton(&dfa, &sample).unwrap());
	}

	#[test]
	fn lexers_agree_on_sample() {
		let sample = source("sample.js");
		let dfa = build_min_dfa().unwrap();
		assert_eq!(tokenize(&sample).unwrap(), tokenize_with_automaton(&dfa, &sample).unwrap());
	}

	#[test]
	fn unterminated_string() {
		let dfa = build_min_dfa().unwrap();
		let source = "\"unterminated";
		for error in [tokenize(source).unwrap_err(), tokenize_with_automaton(&dfa, source).unwrap_err()] {
			assert_eq!(error.r#type, LexErrorType::UnterminatedString);
			assert_eq!((error.line, error.col), (1, 1));
			assert_eq!(error.lexeme, "\"unterminated");
		}
	}

	#[test]
	fn template_literals() {
		let source = "print(`sum ${1 + 2}\n  again`);";
		let dfa = build_min_dfa().unwrap();
		let tokens = tokenize(source).unwrap();
		assert_eq!(tokens, tokenize_with_automaton(&dfa, source).unwrap());
		assert_eq!(tokens[2], Token::new(TokenKind::Template, "`sum ${1 + 2}\n  again`", 1, 7));
		assert_eq!((tokens[3].line, tokens[3].col), (2, 9));

		let (program, errors) = parse(tokens);
		assert!(errors.is_empty(), "{errors:?}");
		let result = analyze(&program);
		assert!(result.ok && result.warnings.is_empty(), "{}", result.report);

		for error in [tokenize("`open").unwrap_err(), tokenize_with_automaton(&dfa, "`open").unwrap_err()] {
			assert_eq!(error.r#type, LexErrorType::UnterminatedTemplate);
			assert_eq!(error.lexeme, "`open");
		}
	}

	#[test]
	fn non_ascii_is_rejected_by_both_lexers() {
		let dfa = build_min_dfa().unwrap();
		for source in ["\"é\"", "let s = \"naïve\";"] {
			let by_hand = tokenize(source).unwrap_err();
			assert_eq!(by_hand, tokenize_with_automaton(&dfa, source).unwrap_err());
			assert_eq!(by_hand.r#type, LexErrorType::UnterminatedString);
		}
		let by_hand = tokenize("x // ünïcode").unwrap_err();
		assert_eq!(by_hand, tokenize_with_automaton(&dfa, "x // ünïcode").unwrap_err());
		assert_eq!(by_hand.r#type, LexErrorType::UnexpectedCharacter);
	}

	#[test]
	fn longest_operator() {
		let dfa = build_min_dfa().unwrap();
		for tokens in [tokenize("===").unwrap(), tokenize_with_automaton(&dfa, "===").unwrap()] {
			let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
			assert_eq!(kinds, [TokenKind::StrictEq, TokenKind::Eof]);
		}
	}

	#[test]
	fn parse_recovers() {
		let (program, errors) = parse(tokenize("let x = 1 + ;").unwrap());
		assert!(!errors.is_empty());
		assert!(program.statements.is_empty());

		let (program, errors) = parse(tokenize(&source("broken.js")).unwrap());
		assert_eq!(errors.len(), 2, "{errors:?}");
		assert_eq!(errors.iter().map(|error| error.line).collect::<Vec<_>>(), [1, 3]);
		assert_eq!(program.statements.len(), 2);
		assert!(matches!(&program.statements[0], Statement::VarDecl { name, .. } if name == "b"));
		assert!(matches!(program.statements[1], Statement::Expression(_)));
	}

	#[test]
	fn const_without_initializer() {
		let (program, errors) = parse(tokenize("const c; ").unwrap());
		assert!(errors.is_empty());
		let result = analyze(&program);
		assert!(!result.ok);
		assert_eq!(result.errors.len(), 1);
		assert_eq!(result.errors[0].message, "constant 'c' must be initialized");
		assert!(result.report.contains("  c [constant:unknown] used:✗ init:✗\n"));
	}

	#[test]
	fn unused_variable() {
		let (program, _) = parse(tokenize("let a = 1; ").unwrap());
		let result = analyze(&program);
		assert!(result.ok);
		assert!(result.errors.is_empty());
		assert_eq!(result.warnings, ["line 1, column 1: variable 'a' declared but never used"]);
	}

	#[test]
	fn sample_is_clean() {
		let (program, errors) = parse(tokenize(&source("sample.js")).unwrap());
		assert!(errors.is_empty(), "{errors:?}");
		let result = analyze(&program);
		assert!(result.ok, "{}", result.report);
		assert!(result.warnings.is_empty(), "{}", result.report);
		assert!(result.report.contains("  class_Counter (level 1):\n    count [variable:number] used:✓ init:✓\n"));

		let tree = ast_to_string(&program);
		assert!(tree.starts_with("Program:\n  VarDecl(const limit)\n    Literal(number: 10)\n"));
		assert!(tree.contains("  ClassDecl(Counter)\n"));
		assert!(tree.contains("    Catch(err):\n"));
	}

	#[test]
	fn semantic_mistakes() {
		let (program, errors) = parse(tokenize(&source("mistakes.js")).unwrap());
		assert!(errors.is_empty(), "{errors:?}");
		let result = analyze(&program);
		let errors: Vec<_> = result.errors.iter().map(ToString::to_string).collect();
		assert_eq!(errors, [
			"line 2, column 1: cannot reassign constant 'pi'",
			"line 4, column 11: operator '*' requires numeric operands, found string and number",
			"line 5, column 1: function 'undefinedFunction' is not declared",
			"line 9, column 1: function 'pair' expects 2 arguments, got 1",
			"line 10, column 1: 'return' can only be used inside a function",
		]);
		assert_eq!(result.warnings, ["line 6, column 18: parameter 'b' declared but never used"]);
		assert!(result.report.contains("ERRORS (5):\n"));
		assert!(result.report.contains("WARNINGS (1):\n"));
	}

	#[test]
	fn frontend_files() {
		let frontend = Frontend::new(false);
		assert!(frontend.check_file(program("sample.js")).is_ok());
		assert!(frontend.ast_file(program("sample.js")).is_ok());
		assert!(frontend.tokens_file(program("sample.js"), true).is_ok());
		assert!(matches!(frontend.check_file(program("mistakes.js")), Err(FrontendError::SemanticErrors(5))));
		assert!(matches!(frontend.ast_file(program("broken.js")), Err(FrontendError::ParserErrors(2))));
		assert!(matches!(frontend.check_file(program("missing.js")), Err(FrontendError::InternalError(_))));
	}

	#[test]
	fn dfa_export() {
		let path = std::env::temp_dir().join(format!("scriptfront-{}.dot", std::process::id()));
		Frontend::new(false).dfa(Some(path.as_path())).unwrap();
		let dot = std::fs::read_to_string(&path).unwrap();
		std::fs::remove_file(&path).unwrap();
		assert_eq!(dot, build_min_dfa().unwrap().to_dot());
		assert!(dot.starts_with("digraph"));
	}
}
