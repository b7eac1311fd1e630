use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::BibEntry;

#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no BibTeX entries found in {0}")]
    NoEntries(PathBuf),
    #[error("not a folder: {0}")]
    NotAFolder(PathBuf),
}

/// Read all entries from a single `.bib` file.
pub fn read_bib_file(path: &Path) -> Result<Vec<BibEntry>, BibError> {
    let content = std::fs::read_to_string(path)?;
    read_bib_str(&content).ok_or_else(|| BibError::NoEntries(path.to_path_buf()))
}

/// Parse `.bib` content from a string. Returns `None` if nothing parses.
pub fn read_bib_str(content: &str) -> Option<Vec<BibEntry>> {
    // Try parsing the whole file first (fast path)
    match biblatex::Bibliography::parse(content) {
        Ok(bibliography) => {
            let entries: Vec<BibEntry> = bibliography.iter().map(convert_entry).collect();
            if entries.is_empty() {
                return None;
            }
            Some(entries)
        }
        Err(_) => {
            // Fallback: split by @ entries and parse each individually.
            // Real .bib files often have minor syntax errors (extra braces,
            // non-standard entry types, raw text separators) that make the
            // whole-file parse fail. Parsing entry by entry recovers
            // whatever we can.
            parse_entries_individually(content)
        }
    }
}

/// Read and concatenate all `.bib` files in a folder, in filename order.
///
/// A file that cannot be read or yields no entries aborts the whole merge;
/// partial input would silently drop citations from the output.
pub fn read_bib_folder(folder: &Path) -> Result<Vec<BibEntry>, BibError> {
    if !folder.is_dir() {
        return Err(BibError::NotAFolder(folder.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("bib"))
        })
        .collect();
    paths.sort();

    let mut entries = Vec::new();
    for path in &paths {
        let file_entries = read_bib_file(path)?;
        tracing::debug!(
            file = %path.display(),
            count = file_entries.len(),
            "read bib file"
        );
        entries.extend(file_entries);
    }

    Ok(entries)
}

/// Split `.bib` content into individual entry strings and parse each one.
fn parse_entries_individually(content: &str) -> Option<Vec<BibEntry>> {
    // Find positions of @ followed by a letter (entry type)
    static ENTRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^@[a-zA-Z]").unwrap());

    let positions: Vec<usize> = ENTRY_RE.find_iter(content).map(|m| m.start()).collect();
    if positions.is_empty() {
        return None;
    }

    let mut entries = Vec::new();
    for i in 0..positions.len() {
        let start = positions[i];
        let end = if i + 1 < positions.len() {
            positions[i + 1]
        } else {
            content.len()
        };
        let chunk = &content[start..end];

        if let Ok(bib) = biblatex::Bibliography::parse(chunk) {
            entries.extend(bib.iter().map(convert_entry));
        }
    }

    if entries.is_empty() { None } else { Some(entries) }
}

/// Convert a parsed biblatex entry into our owned field bag.
fn convert_entry(entry: &biblatex::Entry) -> BibEntry {
    let fields = entry
        .fields
        .iter()
        .map(|(name, chunks)| (name.clone(), chunks_to_string(chunks)))
        .collect();

    BibEntry {
        key: entry.key.clone(),
        entry_type: entry.entry_type.to_string(),
        fields,
    }
}

/// Convert biblatex chunks to a plain string.
fn chunks_to_string(chunks: &[biblatex::Spanned<biblatex::Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            biblatex::Chunk::Normal(s) => s.as_str(),
            biblatex::Chunk::Verbatim(s) => s.as_str(),
            biblatex::Chunk::Math(s) => s.as_str(),
        })
        .collect::<Vec<_>>()
        .join("")
}
