use std::io::Write;

use owo_colors::OwoColorize;
use textool_bib::DedupResult;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the post-merge summary to the terminal.
///
/// The full breakdown lives in the report file; this is just the counts.
pub fn print_merge_summary(
    w: &mut dyn Write,
    result: &DedupResult,
    total_entries: usize,
    remove_same_doi: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(
        w,
        "Merged {} entries down to {}",
        total_entries,
        result.kept.len()
    )?;

    if !result.removed.is_empty() {
        let msg = format!("Removed {} duplicate entries", result.removed.len());
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }

    if !result.renamed.is_empty() {
        let msg = format!(
            "Renamed {} entries with colliding keys",
            result.renamed.len()
        );
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }

    if !result.doi_groups.is_empty() {
        let msg = if remove_same_doi {
            format!(
                "{} groups of entries shared a DOI (duplicates removed)",
                result.doi_groups.len()
            )
        } else {
            format!(
                "{} groups of entries share a DOI (see the report)",
                result.doi_groups.len()
            )
        };
        if color.enabled() {
            writeln!(w, "{}", msg.red())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use textool_bib::{BibEntry, deduplicate};

    #[test]
    fn test_plain_summary() {
        let input = vec![
            BibEntry::new("a", "article", vec![("doi".into(), "10.1/x".into())]),
            BibEntry::new("a", "article", vec![("doi".into(), "10.1/x".into())]),
        ];
        let result = deduplicate(&input, false).unwrap();

        let mut buf = Vec::new();
        print_merge_summary(&mut buf, &result, 2, false, ColorMode(false)).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "Merged 2 entries down to 1\nRemoved 1 duplicate entries\n"
        );
    }
}
