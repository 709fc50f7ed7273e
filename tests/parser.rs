#[cfg(test)]
mod parser_tests {
    use fia::ast::Stmt;
    use fia::ast_printer::AstPrinter;
    use fia::parser::Parser;
    use fia::scanner::Scanner;
    use fia::token::{Token, TokenType};
    use fia::Diagnostics;
    use pretty_assertions::assert_eq;

    /// Parse `source`, returning the printed program and rendered errors.
    fn parse(source: &str) -> (String, Vec<String>) {
        let (tokens, lex_errors) = Scanner::new(source).scan_all();
        assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);

        let mut diagnostics = Diagnostics::new();
        let statements: Vec<Stmt> = Parser::new(&tokens, &mut diagnostics).parse();

        (
            AstPrinter::print_program(&statements),
            diagnostics.iter().map(ToString::to_string).collect(),
        )
    }

    fn parse_ok(source: &str) -> String {
        let (printed, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
        printed
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse_ok("print 1 + 2 * 3 - -4;"),
            "(print (- (+ 1.0 (* 2.0 3.0)) (- 4.0)))"
        );
        assert_eq!(
            parse_ok("print (1 + 2) * 3 == 9 != !true;"),
            "(print (!= (== (* (group (+ 1.0 2.0)) 3.0) 9.0) (! true)))"
        );
    }

    #[test]
    fn test_logical_precedence() {
        assert_eq!(parse_ok("print a or b and c;"), "(print (or a (and b c)))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(parse_ok("a = b = 3;"), "(; (= a (= b 3.0)))");
    }

    #[test]
    fn test_for_is_lowered_to_while() {
        assert_eq!(
            parse_ok("for (var i = 0; i < 3; i = i + 1) print i;"),
            "(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
        );
    }

    #[test]
    fn test_for_without_clauses() {
        assert_eq!(parse_ok("for (;;) print 1;"), "(while true (print 1.0))");
        assert_eq!(
            parse_ok("for (x = 0; x < 1;) print x;"),
            "(block (; (= x 0.0)) (while (< x 1.0) (print x)))"
        );
    }

    #[test]
    fn test_else_binds_to_nearest_if() {
        assert_eq!(
            parse_ok("if (a) if (b) print 1; else print 2;"),
            "(if a (if b (print 1.0) (print 2.0)))"
        );
    }

    #[test]
    fn test_functions_and_calls() {
        assert_eq!(
            parse_ok("func add(a, b) { return a + b; } add(1, 2)(3);"),
            "(func add (a b) (return (+ a b)))\n(; (call (call add 1.0 2.0) 3.0))"
        );
    }

    #[test]
    fn test_class_with_methods() {
        assert_eq!(
            parse_ok("class P { init(x) { this.x = x; } get() { return this.x; } }"),
            "(class P (method init (x) (; (.= this x x))) (method get () (return (. this x))))"
        );
    }

    #[test]
    fn test_missing_initializer_expression_recovers() {
        let (printed, errors) = parse("var x = ;\nprint 2;");

        assert_eq!(errors, vec!["On line 1, at ';': Expect expression."]);
        assert_eq!(printed, "(print 2.0)");
    }

    #[test]
    fn test_multiple_errors_in_one_run() {
        let (printed, errors) = parse("var = 1;\nprint 2;\nprint ;\nprint 3;");

        assert_eq!(
            errors,
            vec![
                "On line 1, at '=': Expect variable name.",
                "On line 3, at ';': Expect expression.",
            ]
        );
        assert_eq!(printed, "(print 2.0)\n(print 3.0)");
    }

    #[test]
    fn test_error_inside_block_synchronizes_at_top_level() {
        let (printed, errors) = parse("{ print 1 }\nprint 2;");

        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Expect ';' after value."));
        assert_eq!(printed, "(print 2.0)");
    }

    #[test]
    fn test_invalid_assignment_target_is_reported_not_fatal() {
        let (printed, errors) = parse("a + b = c;\nprint 1;");

        assert_eq!(errors, vec!["On line 1, Invalid assignment target."]);
        assert_eq!(printed, "(; (+ a b))\n(print 1.0)");
    }

    #[test]
    fn test_missing_semicolon_at_end() {
        let (_, errors) = parse("print 1");

        assert_eq!(errors, vec!["On line 1, at end: Expect ';' after value."]);
    }

    #[test]
    fn test_too_many_arguments() {
        let args: Vec<&str> = vec!["0"; 256];
        let source = format!("f({});", args.join(", "));

        let (_, errors) = parse(&source);

        assert_eq!(errors, vec!["On line 1, Can't have more than 255 arguments."]);
    }

    #[test]
    fn test_super_is_reserved() {
        let (_, errors) = parse("super.x;");

        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_token_slice_is_empty_program() {
        let mut diagnostics = Diagnostics::new();

        let statements = Parser::new(&[], &mut diagnostics).parse();

        assert!(statements.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_tokens_without_eof_end_the_program() {
        let tokens = vec![
            Token::new(TokenType::PRINT, "print", 1),
            Token::new(TokenType::NUMBER(1.0), "1", 1),
        ];
        let mut diagnostics = Diagnostics::new();

        let statements = Parser::new(&tokens, &mut diagnostics).parse();

        assert!(statements.is_empty());
        let errors: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(errors, vec!["On line 1, at end: Expect ';' after value."]);
    }
}
