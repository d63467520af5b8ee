//! Emission of the `was-published` result flag.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Name of the result flag.
const OUTPUT_NAME: &str = "was-published";

/// Emit the `was-published` flag.
///
/// When running under GitHub Actions (`GITHUB_OUTPUT` set), the flag is
/// appended to the step-output file; otherwise it is printed to stdout in
/// the same `name=value` form.
pub fn emit_was_published(was_published: bool) -> io::Result<()> {
    match env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.trim().is_empty() => append_output(Path::new(&path), was_published),
        _ => {
            let stdout = io::stdout();
            writeln!(stdout.lock(), "{OUTPUT_NAME}={was_published}")
        }
    }
}

fn append_output(path: &Path, was_published: bool) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{OUTPUT_NAME}={was_published}")
}
