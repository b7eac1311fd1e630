use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub merge: Option<MergeSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeSection {
    pub folder: Option<String>,
    pub output: Option<String>,
    pub report: Option<String>,
    pub remove_same_doi: Option<bool>,
}

/// Platform config directory path: `<config_dir>/textool/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("textool").join("config.toml"))
}

/// Load config by cascading CWD `.textool.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".textool.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        merge: Some(MergeSection {
            folder: overlay
                .merge
                .as_ref()
                .and_then(|m| m.folder.clone())
                .or_else(|| base.merge.as_ref().and_then(|m| m.folder.clone())),
            output: overlay
                .merge
                .as_ref()
                .and_then(|m| m.output.clone())
                .or_else(|| base.merge.as_ref().and_then(|m| m.output.clone())),
            report: overlay
                .merge
                .as_ref()
                .and_then(|m| m.report.clone())
                .or_else(|| base.merge.as_ref().and_then(|m| m.report.clone())),
            remove_same_doi: overlay
                .merge
                .as_ref()
                .and_then(|m| m.remove_same_doi)
                .or_else(|| base.merge.as_ref().and_then(|m| m.remove_same_doi)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_wins_per_field() {
        let base = ConfigFile {
            merge: Some(MergeSection {
                folder: Some("bib".into()),
                output: Some("base.bib".into()),
                report: None,
                remove_same_doi: Some(true),
            }),
        };
        let overlay = ConfigFile {
            merge: Some(MergeSection {
                folder: Some("refs".into()),
                output: None,
                report: Some("out.txt".into()),
                remove_same_doi: None,
            }),
        };

        let merged = merge(base, overlay).merge.unwrap();
        assert_eq!(merged.folder.as_deref(), Some("refs"));
        assert_eq!(merged.output.as_deref(), Some("base.bib"));
        assert_eq!(merged.report.as_deref(), Some("out.txt"));
        assert_eq!(merged.remove_same_doi, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ConfigFile = toml::from_str("[merge]\nfolder = \"bibs\"\n").unwrap();
        let merge = config.merge.unwrap();
        assert_eq!(merge.folder.as_deref(), Some("bibs"));
        assert_eq!(merge.remove_same_doi, None);
    }
}
