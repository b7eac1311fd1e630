use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod config_file;
mod output;

use config_file::ConfigFile;
use output::ColorMode;

/// LaTeX authoring utilities - merge bibliographies, combine LTeX
/// dictionaries, convert command declarations, strip comments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge all .bib files in a folder, de-duplicating entries
    MergeBib {
        /// Folder containing .bib files (default: files)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Merged .bib output filename (default: merged.bib)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report output filename (default: report.txt)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Remove later entries sharing a DOI with an earlier one
        /// (default: report them only)
        #[arg(long)]
        remove_same_doi: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Combine two LTeX dictionary files, dropping duplicate words
    CombineDict {
        /// First dictionary file
        dict1: PathBuf,

        /// Second dictionary file
        dict2: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "dict_combine.txt")]
        output: PathBuf,
    },

    /// Convert \newcommand declarations to an LTeX settings JSON
    NewCommand {
        /// Path to the new-command .tex file
        #[arg(short, long, default_value = "new_command.tex")]
        input: PathBuf,

        /// Output settings JSON
        #[arg(short, long, default_value = "setting.json")]
        output: PathBuf,
    },

    /// Strip comments from a LaTeX file via arxiv_latex_cleaner
    Clean {
        /// Input .tex file
        input: PathBuf,

        /// Output filename (default: <stem>_cleaned.tex next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep consecutive blank lines (default: collapse)
        #[arg(long)]
        keep_newlines: bool,
    },
}

/// Effective merge-bib settings after flag > config file > default
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MergeSettings {
    folder: PathBuf,
    output: PathBuf,
    report: PathBuf,
    remove_same_doi: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("files"),
            output: PathBuf::from("merged.bib"),
            report: PathBuf::from("report.txt"),
            remove_same_doi: false,
        }
    }
}

fn resolve_merge_settings(
    folder: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    remove_same_doi: bool,
    config: &ConfigFile,
) -> MergeSettings {
    let defaults = MergeSettings::default();
    let section = config.merge.clone().unwrap_or_default();

    MergeSettings {
        folder: folder
            .or_else(|| section.folder.map(PathBuf::from))
            .unwrap_or(defaults.folder),
        output: output
            .or_else(|| section.output.map(PathBuf::from))
            .unwrap_or(defaults.output),
        report: report
            .or_else(|| section.report.map(PathBuf::from))
            .unwrap_or(defaults.report),
        remove_same_doi: remove_same_doi || section.remove_same_doi.unwrap_or(false),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::MergeBib {
            folder,
            output,
            report,
            remove_same_doi,
            no_color,
        } => merge_bib(folder, output, report, remove_same_doi, no_color),
        Command::CombineDict {
            dict1,
            dict2,
            output,
        } => {
            textool_ltex::combine_dictionaries(&dict1, &dict2, &output)?;
            println!("Combined dictionary written to {}", output.display());
            Ok(())
        }
        Command::NewCommand { input, output } => {
            textool_ltex::convert_new_commands(&input, &output)?;
            println!("Settings written to {}", output.display());
            Ok(())
        }
        Command::Clean {
            input,
            output,
            keep_newlines,
        } => {
            let options = textool_clean::CleanOptions {
                output,
                keep_newlines,
            };
            let cleaned = textool_clean::clean_tex_file(&input, &options)?;
            println!("Cleaned file written to {}", cleaned.display());
            Ok(())
        }
    }
}

fn merge_bib(
    folder: Option<PathBuf>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    remove_same_doi: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    let settings = resolve_merge_settings(
        folder,
        output,
        report,
        remove_same_doi,
        &config_file::load_config(),
    );

    if !settings.folder.is_dir() {
        anyhow::bail!("Folder not found: {}", settings.folder.display());
    }

    let entries = textool_bib::read_bib_folder(&settings.folder)?;
    let result = textool_bib::deduplicate(&entries, settings.remove_same_doi)?;

    // Both files are written only after the full computation succeeded
    textool_bib::write_bib_file(&settings.output, &result.kept)?;
    textool_reporting::write_report(
        &settings.report,
        &result,
        entries.len(),
        settings.remove_same_doi,
    )?;

    let color = ColorMode(!no_color);
    let mut stdout = std::io::stdout();
    output::print_merge_summary(
        &mut stdout,
        &result,
        entries.len(),
        settings.remove_same_doi,
        color,
    )?;
    println!("Merged bibliography: {}", settings.output.display());
    println!("Report: {}", settings.report.display());

    Ok(())
}
