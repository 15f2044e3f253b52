//! Golden-file tests: every `tests/fixtures/*.ccl` runs through the pipeline.
//!
//! A sibling `.expected` file holds the generated documents, each preceded
//! by `=== <file name> ===`. A sibling `.error` file holds the diagnostic
//! code the file must fail with.

use camino::Utf8PathBuf;
use datatest_stable::Utf8Path;
use footprint::{FootprintError, Settings, process_source};
use miette::Diagnostic;

fn render_documents(outcome: &footprint::FileOutcome) -> String {
    let mut out = String::new();
    for document in &outcome.documents {
        out.push_str(&format!("=== {} ===\n", document.file_name()));
        out.push_str(&document.to_string());
    }
    out
}

fn error_code(err: &FootprintError) -> Option<String> {
    match err.cause() {
        Some(cause) => cause.code().map(|c| c.to_string()),
        None => err.code().map(|c| c.to_string()),
    }
}

/// Format a colored inline diff using dissimilar
fn format_inline_diff(expected: &str, actual: &str) -> String {
    use dissimilar::Chunk;

    let mut output = String::new();
    output.push_str("\n=== Inline Diff (expected vs actual) ===\n");
    output.push_str("Legend: [-expected only-] [+actual only+] [unchanged]\n\n");

    for chunk in dissimilar::diff(expected, actual) {
        match chunk {
            Chunk::Equal(s) => output.push_str(s),
            Chunk::Delete(s) => {
                output.push_str("\x1b[31m[-");
                output.push_str(s);
                output.push_str("-]\x1b[0m");
            }
            Chunk::Insert(s) => {
                output.push_str("\x1b[32m[+");
                output.push_str(s);
                output.push_str("+]\x1b[0m");
            }
        }
    }

    output
}

fn sibling(path: &Utf8Path, extension: &str) -> Utf8PathBuf {
    path.with_extension(extension)
}

fn test_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let name = path.file_name().unwrap_or(path.as_str());

    let settings = Settings::default();
    let world = settings.world()?;
    let result = process_source(name, &source, &settings, &world);

    let expected_path = sibling(path, "expected");
    let error_path = sibling(path, "error");

    if error_path.exists() {
        let expected_code = std::fs::read_to_string(&error_path)?.trim().to_string();
        match result {
            Ok(outcome) => panic!(
                "{path}: expected failure `{expected_code}`, got:\n{}",
                render_documents(&outcome)
            ),
            Err(err) => {
                let code = error_code(&err);
                assert_eq!(
                    code.as_deref(),
                    Some(expected_code.as_str()),
                    "{path}: wrong failure: {err:?}"
                );
            }
        }
        return Ok(());
    }

    let expected = std::fs::read_to_string(&expected_path)?;
    let actual = match result {
        Ok(outcome) => render_documents(&outcome),
        Err(err) => panic!("{path}: unexpected failure: {:?}", miette::Report::new(err)),
    };

    if expected != actual {
        panic!(
            "output mismatch for {path}:\n{}",
            format_inline_diff(&expected, &actual)
        );
    }

    Ok(())
}

datatest_stable::harness! {
    { test = test_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.ccl$" },
}
