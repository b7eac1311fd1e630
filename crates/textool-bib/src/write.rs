use std::path::Path;

use crate::model::BibEntry;
use crate::read::BibError;

/// Render entries as BibTeX source text, in the given order.
pub fn render_bib(entries: &[BibEntry]) -> String {
    let mut out = String::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("@{}{{{},\n", entry.entry_type, entry.key));
        for (name, value) in &entry.fields {
            out.push_str(&format!("  {} = {{{}}},\n", name, value));
        }
        out.push_str("}\n");
    }

    out
}

/// Write entries to a `.bib` file.
pub fn write_bib_file(path: &Path, entries: &[BibEntry]) -> Result<(), BibError> {
    std::fs::write(path, render_bib(entries))?;
    tracing::info!(file = %path.display(), count = entries.len(), "wrote merged bib");
    Ok(())
}
