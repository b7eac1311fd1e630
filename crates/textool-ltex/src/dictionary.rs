use std::collections::HashSet;
use std::path::Path;

use crate::LtexError;

/// Combine two LTeX dictionary files into one, dropping duplicate lines.
pub fn combine_dictionaries(
    dict1: &Path,
    dict2: &Path,
    output: &Path,
) -> Result<(), LtexError> {
    let first = std::fs::read_to_string(dict1)?;
    let second = std::fs::read_to_string(dict2)?;

    let combined = combine_lines(&first, &second);
    std::fs::write(output, &combined)?;
    tracing::info!(
        output = %output.display(),
        words = combined.lines().count(),
        "wrote combined dictionary"
    );
    Ok(())
}

/// Union of the lines of both inputs, first-seen order, duplicates dropped.
pub fn combine_lines(first: &str, second: &str) -> String {
    let mut seen = HashSet::new();
    let mut out = String::new();

    for line in first.lines().chain(second.lines()) {
        if seen.insert(line) {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}
