use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::LtexError;

/// Build the LTeX settings map from `\newcommand` declaration lines.
///
/// Each non-blank line contributes its first braced group (the command
/// name, e.g. `\highlight` from `\newcommand{\highlight}[1]{...}`) mapped
/// to the placeholder value `"dummy"`. A non-blank line without a braced
/// group is a parse error.
pub fn settings_from_lines(content: &str) -> Result<BTreeMap<String, String>, LtexError> {
    static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(.*?)\}").unwrap());

    let mut settings = BTreeMap::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let caps = NAME_RE
            .captures(line)
            .ok_or_else(|| LtexError::NoCommandName {
                line: i + 1,
                text: line.to_string(),
            })?;
        settings.insert(caps[1].to_string(), "dummy".to_string());
    }

    Ok(settings)
}

/// Convert a file of `\newcommand` declarations into an LTeX settings JSON.
pub fn convert_new_commands(input: &Path, output: &Path) -> Result<(), LtexError> {
    let content = std::fs::read_to_string(input)?;
    let settings = settings_from_lines(&content)?;

    let mut json = serde_json::to_string_pretty(&settings)?;
    json.push('\n');
    std::fs::write(output, json)?;
    tracing::info!(
        output = %output.display(),
        commands = settings.len(),
        "wrote LTeX settings"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_command_names() {
        let content = "\\newcommand{\\highlight}[1]{\\textbf{#1}}\n\
                       \\newcommand{\\etal}{et al.}\n";
        let settings = settings_from_lines(content).unwrap();

        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get("\\highlight").map(String::as_str), Some("dummy"));
        assert_eq!(settings.get("\\etal").map(String::as_str), Some("dummy"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let content = "\n  \n\\newcommand{\\etal}{et al.}\n\n";
        let settings = settings_from_lines(content).unwrap();
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn test_braceless_line_is_an_error() {
        let content = "\\newcommand{\\etal}{et al.}\nnot a declaration\n";
        let err = settings_from_lines(content).unwrap_err();
        assert!(matches!(err, LtexError::NoCommandName { line: 2, .. }));
    }

    #[test]
    fn test_convert_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("new_command.tex");
        let output = dir.path().join("setting.json");
        std::fs::write(&input, "\\newcommand{\\etal}{et al.}\n").unwrap();

        convert_new_commands(&input, &output).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["\\etal"], "dummy");
    }
}
