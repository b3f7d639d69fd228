use std::{fs, io::Cursor};

use cmm::run_program;
use walkdir::WalkDir;

#[test]
fn demo_programs_produce_their_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "cmm"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let input = fs::read_to_string(path.with_extension("in")).unwrap_or_default();
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("Missing expected output for {path:?}: {e}"));

        let mut output = Vec::new();
        if let Err(e) = run_program(&source, Cursor::new(input.into_bytes()), &mut output) {
            panic!("Demo {path:?} failed: {e}");
        }
        let output = String::from_utf8(output).expect("demo output is UTF-8");
        assert_eq!(output, expected, "demo {path:?} produced unexpected output");
        count += 1;
    }

    assert!(count > 0, "No demo programs found in demos/");
}
