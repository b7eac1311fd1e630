use std::path::{Path, PathBuf};
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Name of the external cleaning tool on PATH.
const CLEANER_BIN: &str = "arxiv_latex_cleaner";

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),
    #[error("not a .tex file: {0}")]
    NotTex(PathBuf),
    #[error("failed to run {CLEANER_BIN} (is it installed?): {0}")]
    Spawn(std::io::Error),
    #[error("{CLEANER_BIN} failed: {stderr}")]
    CleanerFailed { stderr: String },
    #[error("{CLEANER_BIN} produced no cleaned file")]
    MissingCleanedOutput,
}

/// Options for cleaning a single LaTeX file.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Explicit output path. Default: `<stem>_cleaned.tex` next to the input.
    pub output: Option<PathBuf>,
    /// Keep runs of blank lines instead of collapsing them.
    pub keep_newlines: bool,
}

/// Strip comments from a `.tex` file by driving `arxiv_latex_cleaner` over
/// a scratch copy. Returns the path of the cleaned file.
///
/// The input is staged into `<tmp>/to_clean/`, the tool is run on that
/// directory, and its `to_clean_arXiv/` output is copied to the final
/// location. Nothing outside the scratch directory is touched until the
/// tool has succeeded.
pub fn clean_tex_file(input: &Path, options: &CleanOptions) -> Result<PathBuf, CleanError> {
    if !input.is_file() {
        return Err(CleanError::MissingInput(input.to_path_buf()));
    }
    if !input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tex"))
    {
        return Err(CleanError::NotTex(input.to_path_buf()));
    }

    let Some(file_name) = input.file_name() else {
        return Err(CleanError::MissingInput(input.to_path_buf()));
    };
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    let staging = tempfile::tempdir()?;
    let to_clean = staging.path().join("to_clean");
    std::fs::create_dir(&to_clean)?;
    std::fs::copy(input, to_clean.join(file_name))?;

    tracing::info!(input = %input.display(), "running {}", CLEANER_BIN);
    let run = Command::new(CLEANER_BIN)
        .arg(&to_clean)
        .output()
        .map_err(CleanError::Spawn)?;
    if !run.status.success() {
        return Err(CleanError::CleanerFailed {
            stderr: String::from_utf8_lossy(&run.stderr).into_owned(),
        });
    }

    // The tool writes its result next to the input directory, suffixed _arXiv
    let cleaned = staging.path().join("to_clean_arXiv").join(file_name);
    if !cleaned.is_file() {
        return Err(CleanError::MissingCleanedOutput);
    }
    std::fs::copy(&cleaned, &output)?;

    if !options.keep_newlines {
        collapse_blank_lines(&output)?;
    }

    tracing::info!(output = %output.display(), "cleaned file written");
    Ok(output)
}

/// `<stem>_cleaned.tex` next to the input file.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_cleaned.tex", stem))
}

/// Collapse runs of 3+ newlines in a file down to a single blank line.
pub fn collapse_blank_lines(path: &Path) -> Result<(), CleanError> {
    let content = std::fs::read_to_string(path)?;
    std::fs::write(path, collapse_blank_lines_str(&content))?;
    Ok(())
}

fn collapse_blank_lines_str(content: &str) -> String {
    static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

    let collapsed = BLANK_RUN_RE.replace_all(content, "\n\n");
    format!("{}\n", collapsed.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_blank_runs() {
        let text = "a\n\n\n\nb\n\nc\n";
        assert_eq!(collapse_blank_lines_str(text), "a\n\nb\n\nc\n");
    }

    #[test]
    fn test_collapse_adds_trailing_newline() {
        assert_eq!(collapse_blank_lines_str("\n\nbody"), "body\n");
    }

    #[test]
    fn test_collapse_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.tex");
        std::fs::write(&path, "intro\n\n\n\n\nbody\n").unwrap();

        collapse_blank_lines(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "intro\n\nbody\n");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/papers/main.tex")),
            Path::new("/papers/main_cleaned.tex")
        );
    }

    #[test]
    fn test_missing_input_rejected() {
        let err = clean_tex_file(Path::new("/nonexistent/main.tex"), &CleanOptions::default())
            .unwrap_err();
        assert!(matches!(err, CleanError::MissingInput(_)));
    }

    #[test]
    fn test_non_tex_input_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.pdf");
        std::fs::write(&path, "%PDF").unwrap();

        let err = clean_tex_file(&path, &CleanOptions::default()).unwrap_err();
        assert!(matches!(err, CleanError::NotTex(_)));
    }
}
