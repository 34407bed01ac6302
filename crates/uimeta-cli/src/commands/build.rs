//! Build command implementation

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use uimeta_core::{Config, CorpusBuilder, ManifestVersion, Storage};

use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildSummary {
    version: String,
    components: usize,
    documents: usize,
    failures: usize,
    duplicates: usize,
    corpus_path: String,
}

/// Execute the build command
pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
    let storage = Storage::with_root(config.paths.data_dir.clone())?;
    let builder = CorpusBuilder::new(
        &config.paths.docs_dir,
        config.parse.clone(),
        ManifestVersion::new(&config.paths.manifest),
    );
    let (corpus, report) = builder.build_and_persist(&storage)?;

    let summary = BuildSummary {
        version: corpus.version,
        components: corpus.components.len(),
        documents: report.documents,
        failures: report.failures,
        duplicates: report.duplicates,
        corpus_path: storage.corpus_path().display().to_string(),
    };

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => {
            println!(
                "{} {} components from {} documents (version {})",
                "Built".green().bold(),
                summary.components,
                summary.documents,
                summary.version
            );
            if summary.failures > 0 {
                println!(
                    "  {} {} documents fell back to empty models",
                    "warning:".yellow(),
                    summary.failures
                );
            }
            println!("  {}", summary.corpus_path.bright_black());
        },
    }
    Ok(())
}
