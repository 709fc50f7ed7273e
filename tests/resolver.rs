#[cfg(test)]
mod resolver_tests {
    use fia::Fia;
    use pretty_assertions::assert_eq;

    /// Run `source` in a fresh session, returning (stdout, diagnostics).
    fn run(source: &str) -> (String, Vec<String>) {
        let mut fia = Fia::new(Vec::new());
        let report = fia.run(source);
        let output = String::from_utf8(fia.into_output()).expect("output is UTF-8");

        (output, report.messages())
    }

    #[test]
    fn test_return_at_top_level() {
        let (output, errors) = run("print 1;\nreturn 2;");

        assert_eq!(errors, vec!["On line 2, Can't return from top-level code."]);
        // Nothing runs once a static error is found.
        assert_eq!(output, "");
    }

    #[test]
    fn test_return_value_from_initializer() {
        let (output, errors) = run(
            "class A {\n  init() {\n    return 1;\n  }\n}\nprint \"unreached\";",
        );

        assert_eq!(errors, vec!["On line 3, Can't return a value from an initializer."]);
        assert_eq!(output, "");
    }

    #[test]
    fn test_bare_return_in_initializer_is_allowed() {
        let (output, errors) = run(
            "class A { init() { this.x = 1; return; this.x = 2; } }\nprint A().x;",
        );

        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_this_outside_class() {
        let (_, errors) = run("print this;");

        assert_eq!(errors, vec!["On line 1, Can't use 'this' outside of a class."]);

        let (_, errors) = run("func f() { return this; }");

        assert_eq!(errors, vec!["On line 1, Can't use 'this' outside of a class."]);
    }

    #[test]
    fn test_redeclaration_in_local_scope() {
        let (_, errors) = run("{\n  var a = 1;\n  var a = 2;\n}");

        assert_eq!(errors, vec!["On line 3, Already a variable named 'a' in this scope."]);
    }

    #[test]
    fn test_duplicate_parameter() {
        let (_, errors) = run("func f(a, a) {}");

        assert_eq!(errors, vec!["On line 1, Already a variable named 'a' in this scope."]);
    }

    #[test]
    fn test_read_in_own_initializer() {
        let (_, errors) = run("var a = 1;\n{\n  var a = a;\n}");

        assert_eq!(
            errors,
            vec!["On line 3, Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_all_static_errors_are_reported() {
        let (_, errors) = run("return 1;\nprint this;\n{ var b = 1; var b = 2; }");

        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_closure_binds_where_it_is_declared() {
        let (output, errors) = run(
            r#"
var a = "global";
{
  func show() {
    print a;
  }

  show();
  var a = "block";
  show();
}
"#,
        );

        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(output, "global\nglobal\n");
    }

    #[test]
    fn test_shadowing_distances() {
        let (output, errors) = run(
            r#"
var x = "outer";
{
  var x = "middle";
  {
    var x = "inner";
    print x;
  }
  print x;
}
print x;
"#,
        );

        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(output, "inner\nmiddle\nouter\n");
    }

    #[test]
    fn test_resolver_records_only_locals() {
        let mut fia = Fia::new(Vec::new());
        let report = fia.run("var g = 1; { var l = 2; print l + g; }");

        assert!(report.is_ok());
        // `l` is resolved as a local; `g` is left to the globals.
        assert_eq!(fia.interpreter().locals().len(), 1);
        assert!(fia.interpreter().locals().values().all(|&depth| depth == 0));
    }

    #[test]
    fn test_rejected_run_records_no_locals() {
        let mut fia = Fia::new(Vec::new());

        assert!(fia.run("{ var a = 1; print a; }").is_ok());
        assert_eq!(fia.interpreter().locals().len(), 1);

        // Resolves `b` locally, but the stray `return` rejects the run.
        let report = fia.run("{ var b = 2; print b; }\nreturn;");
        assert!(report.had_static_error());

        assert_eq!(fia.interpreter().locals().len(), 1);
    }
}
