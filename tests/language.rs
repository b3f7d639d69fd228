use std::io::Cursor;

use cmm::run_program;

fn run(source: &str, input: &str) -> Result<String, String> {
    let mut output = Vec::new();
    match run_program(source, Cursor::new(input.as_bytes().to_vec()), &mut output) {
        Ok(()) => Ok(String::from_utf8(output).expect("program output is UTF-8")),
        Err(e) => Err(e.to_string()),
    }
}

fn assert_output(source: &str, expected: &str) {
    match run(source, "") {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Program failed: {e}"),
    }
}

fn assert_failure(source: &str) {
    if run(source, "").is_ok() {
        panic!("Program succeeded but was expected to fail")
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("print(to_string(1 + 2 * 3));", "7");
    assert_output("print(to_string((1 + 2) * 3));", "9");
    assert_output("print(to_string(10 - 2 - 3));", "5");
    assert_output("print(to_string(-7 + 2));", "-5");
}

#[test]
fn integer_division_truncates_toward_zero() {
    assert_output("print(to_string(7 / 2));", "3");
    assert_output("print(to_string(-7 / 2));", "-3");
    assert_output("print(to_string(7 % 3));", "1");
}

#[test]
fn doubles_print_with_a_decimal_point() {
    assert_output("print(to_string(1.5 + 1.5));", "3.0");
    assert_output("print(to_string(2.5));", "2.5");
    assert_output("double d = 3; print(to_string(d));", "3.0");
}

#[test]
fn assigning_a_double_to_an_int_truncates() {
    assert_output("int x = 2.9; print(to_string(x));", "2");
    assert_output("int x = -2.9; print(to_string(x));", "-2");
}

#[test]
fn literal_and_computed_zero_divisors_both_fail() {
    // A literal zero is rejected before the program runs, even in dead
    // code; a computed zero only fails when the division executes.
    assert_failure("int x = 1 / 0;");
    assert_failure("if (false) { int x = 1 / 0; }");
    assert_failure("int y = 0; int x = 1 / y;");
    assert_output("int y = 0; if (false) { int x = 1 / y; }", "");
}

#[test]
fn shadowing_uses_the_innermost_declaration() {
    assert_output("int x = 1;
                   {
                       int x = 2;
                       print(to_string(x));
                   }
                   print(to_string(x));",
                  "21");
}

#[test]
fn array_elements_are_independent() {
    assert_output("int a[2];
                   a[0] = 5;
                   print(to_string(a[0]) + to_string(a[1]));",
                  "50");
    assert_output("int m[2][3];
                   m[1][2] = 7;
                   print(to_string(m[1][2]) + to_string(m[0][0]));",
                  "70");
}

#[test]
fn switch_falls_through_until_break() {
    assert_output("int x = 1;
                   switch (x) {
                       case 1:
                           print(\"a\");
                       case 2:
                           print(\"b\");
                           break;
                       case 3:
                           print(\"c\");
                   }",
                  "ab");
}

#[test]
fn switch_uses_default_when_nothing_matches() {
    assert_output("int x = 9;
                   switch (x) {
                       case 1:
                           print(\"a\");
                           break;
                       default:
                           print(\"d\");
                   }",
                  "d");
    assert_output("int x = 9;
                   switch (x) {
                       case 1:
                           print(\"a\");
                   }",
                  "");
}

#[test]
fn switch_works_over_strings() {
    assert_output("string s = \"hi\";
                   switch (s) {
                       case \"hi\":
                           print(\"yes\");
                           break;
                       default:
                           print(\"no\");
                   }",
                  "yes");
}

#[test]
fn jumping_over_a_declaration_leaves_it_unexecuted() {
    assert_failure("int x = 2;
                    switch (x) {
                        case 1:
                            int y = 5;
                        case 2:
                            print(to_string(y));
                    }");
}

#[test]
fn string_characters_can_be_read_and_replaced() {
    assert_output("string s = \"abc\"; print(s[1]);", "b");
    assert_output("string s = \"abc\";
                   s[1] = \"X\";
                   print(s);",
                  "aXc");
}

#[test]
fn comparing_different_kinds_is_rejected() {
    assert_failure("bool b = 1 == \"a\";");
    assert_failure("bool b = \"a\" < 1;");
}

#[test]
fn string_comparison_is_lexicographic() {
    assert_output("if (\"apple\" < \"banana\") { print(\"y\"); }", "y");
    assert_output("if (\"b\" <= \"a\") { print(\"y\"); } else { print(\"n\"); }", "n");
}

#[test]
fn conversions_round_trip() {
    assert_output("print(to_string(true));", "true");
    assert_output("print(to_string(false));", "false");
    assert_output("print(to_string(atoi(to_string(42))));", "42");
    assert_output("print(to_string(atof(\"2.5\") + 0.5));", "3.0");
    assert_output("bool b = atob(\"true\"); if (b) { print(\"y\"); }", "y");
    assert_output("print(to_string(atoi(\" 7 \")));", "7");
}

#[test]
fn loops_run_and_break_stops_them() {
    assert_output("int i = 0;
                   while (i < 3) {
                       print(to_string(i));
                       i = i + 1;
                   }",
                  "012");
    assert_output("int i;
                   for (i = 0; i < 3; i = i + 1) {
                       print(to_string(i));
                   }",
                  "012");
    assert_output("int i = 0;
                   while (true) {
                       if (i == 2) {
                           break;
                       }
                       i = i + 1;
                   }
                   print(to_string(i));",
                  "2");
}

#[test]
fn for_clauses_may_be_absent() {
    assert_output("int i = 0;
                   for (; i < 2;) {
                       print(to_string(i));
                       i = i + 1;
                   }",
                  "01");
}

#[test]
fn boolean_operators_short_circuit() {
    // The right operand would divide by a computed zero if it ran.
    assert_output("int z = 0;
                   if (false && 1 / z == 1) { print(\"a\"); } else { print(\"b\"); }",
                  "b");
    assert_output("int z = 0;
                   if (true || 1 / z == 1) { print(\"a\"); }",
                  "a");
    assert_output("if (!(1 > 2)) { print(\"y\"); }", "y");
}

#[test]
fn if_else_chains_dispatch() {
    assert_output("int x = 5;
                   if (x < 0) {
                       print(\"neg\");
                   } else if (x == 0) {
                       print(\"zero\");
                   } else {
                       print(\"pos\");
                   }",
                  "pos");
}

#[test]
fn scan_reads_one_line() {
    let output = run("string name = scan(); print(\"hi \" + name);", "world\n")
        .expect("program runs");
    assert_eq!(output, "hi world");
}

#[test]
fn scan_fails_at_end_of_input() {
    assert_failure("string s = scan();");
}

#[test]
fn string_escapes_decode_in_output() {
    assert_output(r#"print("a\tb\n");"#, "a\tb\n");
    assert_output(r#"print("say \"hi\"");"#, "say \"hi\"");
}

#[test]
fn declarations_may_list_several_names() {
    assert_output("int x = 1, y = 2, z;
                   print(to_string(x + y + z));",
                  "3");
}

#[test]
fn string_concatenation_chains() {
    assert_output("string a = \"ab\";
                   string b = a + \"cd\" + to_string(7);
                   print(b);",
                  "abcd7");
}
