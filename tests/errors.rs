use std::io::Cursor;

use cmm::run_program;

fn error_of(source: &str) -> String {
    let mut output = Vec::new();
    match run_program(source, Cursor::new(Vec::new()), &mut output) {
        Ok(()) => panic!("Program succeeded but was expected to fail"),
        Err(e) => e.to_string(),
    }
}

fn assert_error_contains(source: &str, needle: &str) {
    let message = error_of(source);
    assert!(message.contains(needle),
            "error '{message}' does not mention '{needle}'");
}

#[test]
fn lexer_rejects_malformed_source() {
    assert_error_contains("int @;", "unknown symbol '@'");
    assert_error_contains("int x = 12ab;", "unexpected number ending in '12ab'");
    assert_error_contains("print(\"abc);", "quotes not closed");
    assert_error_contains(r#"print("a\qb");"#, "invalid escape sequence '\\q'");
    assert_error_contains("int x = 1; }", "no matching left brace");
    assert_error_contains("{ int x = 1;", "expected '}'");
    assert_error_contains("bool b = true & true;", "expected '&&'");
    assert_error_contains("bool b = true | true;", "expected '||'");
}

#[test]
fn lexer_errors_carry_positions() {
    assert_error_contains("int x = 12ab;", "(1:9)");
    assert_error_contains("int x = 1;\nint y = 3cd;", "(2:9)");
}

#[test]
fn parser_rejects_scope_violations() {
    assert_error_contains("int x; int x;", "double declaration of 'x'");
    assert_error_contains("x = 1;", "using of not declared variable 'x'");
    assert_error_contains("{ int x; } x = 1;", "using of not declared variable 'x'");
}

#[test]
fn sibling_blocks_do_not_share_declarations() {
    assert_error_contains("{ int x = 1; } { x = 2; }",
                          "using of not declared variable 'x'");
}

#[test]
fn parser_rejects_type_misuse() {
    assert_error_contains("bool b; int x = b + 1;", "invalid type");
    assert_error_contains("string s; bool b = s && true;", "no expression form matched");
    assert_error_contains("bool b = 1 == \"a\";", "cannot compare");
}

#[test]
fn switch_on_bool_is_a_parse_error() {
    assert_error_contains("bool b = true; switch (b) {}", "no expression form matched");
    assert_error_contains("switch (true) {}", "no expression form matched");
}

#[test]
fn parser_rejects_misplaced_statements() {
    assert_error_contains("break;", "'break' is forbidden here");
    assert_error_contains("case 1:", "'case' is forbidden here");
    assert_error_contains("default:", "'default' is forbidden here");
}

#[test]
fn parser_rejects_malformed_arrays() {
    assert_error_contains("int a[2] = 5;", "array declarations cannot have initializers");
    assert_error_contains("int a[0];", "array size is less than 1");
    assert_error_contains("int a[2]; a[0][1] = 1;", "incorrect number of indexes for 'a'");
    assert_error_contains("int a[2][2]; a[0] = 1;", "incorrect number of indexes for 'a'");
}

#[test]
fn analyzer_rejects_static_errors() {
    assert_error_contains("int x = 1 / 0;", "division by zero");
    assert_error_contains("int x = 1 / -0;", "division by zero");
    assert_error_contains("int x = 5 % 2.0;", "invalid mod operands");
    assert_error_contains("double d = 2.0; int x = 5 % d;", "invalid mod operands");
    assert_error_contains("switch (1.5) {}", "invalid expression in switch");
    assert_error_contains("double d = 1.0; switch (d) {}", "invalid expression in switch");
    assert_error_contains("switch (atof(\"1\")) {}", "invalid expression in switch");
    assert_error_contains("int x = 1;
                           switch (x) {
                               default:
                                   print(\"a\");
                               default:
                                   print(\"b\");
                           }",
                          "double default in switch");
}

#[test]
fn analyzer_accepts_int_conversions_in_switch() {
    let mut output = Vec::new();
    let source = "switch (atoi(\"2\")) {
                      case 2:
                          print(\"ok\");
                          break;
                  }";
    run_program(source, Cursor::new(Vec::new()), &mut output).expect("program runs");
    assert_eq!(output, b"ok".to_vec());
}

#[test]
fn runtime_failures_are_positioned() {
    assert_error_contains("int y = 0; int x = 1 / y;", "division by zero");
    assert_error_contains("int y = 0; int x = 1 % y;", "modulo by zero");
    assert_error_contains("int a[2]; a[5] = 1;", "array index out of range");
    assert_error_contains("int a[2]; a[0 - 1] = 1;", "array index out of range");
    assert_error_contains("string s = \"ab\"; s[5] = \"X\";", "string index out of range");
    assert_error_contains("string s = \"ab\"; print(s[9]);", "string index out of range");
    assert_error_contains("int x = atoi(\"abc\");", "cannot convert 'abc' to int");
    assert_error_contains("double d = atof(\"abc\");", "cannot convert 'abc' to double");
    assert_error_contains("bool b = atob(\"maybe\");", "cannot convert 'maybe' to bool");
    assert_error_contains("string s = scan();", "unexpected end of input");
}

#[test]
fn every_error_ends_with_a_position() {
    for source in ["int x = 12ab;",
                   "x = 1;",
                   "int x = 1 / 0;",
                   "int y = 0; int x = 1 / y;"]
    {
        let message = error_of(source);
        assert!(message.trim_end().ends_with(')'),
                "error '{message}' does not end with a position");
    }
}
