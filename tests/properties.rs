use std::io::Cursor;

use cmm::{
    interpreter::{lexer::tokenize, parser::core::create_syntax_tree},
    run_program,
};
use proptest::prelude::*;

fn run(source: &str, input: &str) -> Result<String, String> {
    let mut output = Vec::new();
    match run_program(source, Cursor::new(input.as_bytes().to_vec()), &mut output) {
        Ok(()) => Ok(String::from_utf8(output).expect("program output is UTF-8")),
        Err(e) => Err(e.to_string()),
    }
}

proptest! {
    #[test]
    fn atoi_round_trips_through_to_string(n in -1_000_000i64..1_000_000) {
        let source = format!("print(to_string(atoi(to_string({n}))));");
        prop_assert_eq!(run(&source, "").unwrap(), n.to_string());
    }

    #[test]
    fn integer_division_truncates_like_the_host(a in -1000i64..1000, b in 1i64..100) {
        let source = format!("print(to_string({a} / {b}));");
        prop_assert_eq!(run(&source, "").unwrap(), (a / b).to_string());
    }

    #[test]
    fn scan_then_print_echoes_the_line(line in "[a-zA-Z0-9 ]{0,40}") {
        let input = format!("{line}\n");
        prop_assert_eq!(run("print(scan());", &input).unwrap(), line);
    }

    #[test]
    fn parsing_is_deterministic(a in 0i64..100, b in 1i64..100) {
        let source = format!("int x = {a} + {b} * 2;
                              if (x > {b}) {{
                                  print(to_string(x));
                              }}");

        let (tokens_one, mut tables_one) = tokenize(&source).unwrap();
        let tree_one = create_syntax_tree(&tokens_one, &mut tables_one).unwrap();

        let (tokens_two, mut tables_two) = tokenize(&source).unwrap();
        let tree_two = create_syntax_tree(&tokens_two, &mut tables_two).unwrap();

        prop_assert_eq!(tree_one, tree_two);
        prop_assert_eq!(tables_one, tables_two);
    }

    #[test]
    fn int_double_int_truncates_at_most_once(n in -1000i64..1000) {
        let source = format!("double d = {n}; int x = d; print(to_string(x));");
        prop_assert_eq!(run(&source, "").unwrap(), n.to_string());
    }
}
