use std::path::Path;

use textool_bib::DedupResult;

/// Render the merge report.
///
/// Layout: the count summary, a details divider, then one section each for
/// removed entries, cross-key DOI groups, and renamed entries. Kept as a
/// pure function so callers can route the text anywhere.
pub fn render_report(result: &DedupResult, total_entries: usize, remove_same_doi: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("Total entries: {}\n", total_entries));
    out.push_str(&format!("Merged entries: {}\n", result.kept.len()));
    out.push_str(&format!("Removed entries: {}\n", result.removed.len()));

    if remove_same_doi {
        out.push_str(&format!(
            "Different entry same doi: {} (removed)\n",
            result.doi_groups.len()
        ));
    } else {
        out.push_str(&format!(
            "Different entry same doi: {} (only reported)\n",
            result.doi_groups.len()
        ));
    }

    out.push_str(&format!(
        "Same entry different doi: {} (only reported)\n",
        result.renamed.len()
    ));
    out.push('\n');
    out.push_str("--------------- details ---------------\n\n");

    out.push_str("Removed entries:\n");
    for removed in &result.removed {
        out.push_str(&format!("{}:\n", removed.entry.key));
        out.push_str(&format!("    Removed reason: {}\n", removed.reason));
        out.push_str(&format!(
            "    DOI: {}\n",
            removed.entry.doi().unwrap_or("None")
        ));
    }

    out.push_str("\nDifferent entry same doi:\n");
    for group in &result.doi_groups {
        let doi = group.first().and_then(|e| e.doi()).unwrap_or("None");
        out.push_str(&format!("Same doi: {}\n", doi));
        for entry in group {
            out.push_str(&format!("    {}\n", entry.key));
            out.push_str(&format!("        DOI: {}\n", entry.doi().unwrap_or("None")));
        }
        out.push('\n');
    }

    out.push_str("\nSame entry different doi:\n");
    for entry in &result.renamed {
        out.push_str(&format!("{}:\n", entry.key));
        out.push_str(&format!("    DOI: {}\n", entry.doi().unwrap_or("None")));
    }

    out
}

/// Render the report and write it to a file.
pub fn write_report(
    path: &Path,
    result: &DedupResult,
    total_entries: usize,
    remove_same_doi: bool,
) -> std::io::Result<()> {
    std::fs::write(path, render_report(result, total_entries, remove_same_doi))
}
