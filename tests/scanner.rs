#[cfg(test)]
mod scanner_tests {
    use fia::scanner::*;
    use fia::token::*;
    use fia::FiaError;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "! != = == < <= > >= /",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "func class nolla this _tmp Print var2",
            &[
                (TokenType::FUNC, "func"),
                (TokenType::CLASS, "class"),
                (TokenType::NOLLA, "nolla"),
                (TokenType::THIS, "this"),
                (TokenType::IDENTIFIER, "_tmp"),
                (TokenType::IDENTIFIER, "Print"),
                (TokenType::IDENTIFIER, "var2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_literals() {
        let tokens: Vec<Token> = Scanner::new("12 3.5 4. \"hi there\"")
            .filter_map(Result::ok)
            .collect();

        assert!(matches!(tokens[0].token_type, TokenType::NUMBER(n) if n == 12.0));
        assert!(matches!(tokens[1].token_type, TokenType::NUMBER(n) if n == 3.5));
        // A trailing dot is not part of the number.
        assert!(matches!(tokens[2].token_type, TokenType::NUMBER(n) if n == 4.0));
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        match &tokens[4].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hi there"),
            other => panic!("expected string, got {:?}", other),
        }
        assert_eq!(tokens[4].lexeme, "\"hi there\"");
    }

    #[test]
    fn test_scanner_05_comments_and_lines() {
        let tokens: Vec<Token> = Scanner::new("a // ignored ( ) \nb\n\nc")
            .filter_map(Result::ok)
            .collect();

        let lines: Vec<(String, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.clone(), t.line))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("c".to_string(), 4),
                ("".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // 0: COMMA  1: DOT  2: error '$'  3: LEFT_PAREN  4: error '#'  5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            errors,
            vec![
                "On line 1, Unexpected character '$'.".to_string(),
                "On line 1, Unexpected character '#'.".to_string(),
            ]
        );

        fn assert_token_matches(
            result: &Result<Token, FiaError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(token.token_type, expected_type);
                    assert_eq!(token.lexeme, expected_lexeme);
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_non_ascii_letters_form_identifiers() {
        assert_token_sequence(
            "var pää = é_1 + Ωmega2;",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "pää"),
                (TokenType::EQUAL, "="),
                (TokenType::IDENTIFIER, "é_1"),
                (TokenType::PLUS, "+"),
                (TokenType::IDENTIFIER, "Ωmega2"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_non_letter_glyph_is_one_error() {
        let (tokens, errors) = Scanner::new("a € b").scan_all();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "On line 1, Unexpected character '€'.");
        assert_eq!(tokens.len(), 3); // a, b, EOF
    }

    #[test]
    fn test_unterminated_string_at_newline() {
        let (tokens, errors) = Scanner::new("\"abc\nprint").scan_all();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "On line 1, Unterminated string.");

        // Scanning carries on at the newline, so line counting stays right.
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token_type, TokenType::PRINT);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_unterminated_string_at_end() {
        let (tokens, errors) = Scanner::new("print \"oops").scan_all();

        assert_eq!(errors.len(), 1);
        assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::EOF));
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<Token> = Scanner::new("var x = 3; \"s\" 2.5")
            .filter_map(Result::ok)
            .collect();

        let shown: Vec<String> = tokens.iter().map(ToString::to_string).collect();

        assert_eq!(
            shown,
            vec![
                "VAR var null",
                "IDENTIFIER x null",
                "EQUAL = null",
                "NUMBER 3 3.0",
                "SEMICOLON ; null",
                "STRING \"s\" s",
                "NUMBER 2.5 2.5",
                "EOF  null",
            ]
        );
    }
}
