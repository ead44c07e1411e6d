//! Batch processing command for multiple bill text files.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use bolletta_core::{BillParser, BillPipeline, ExtractionResult};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file JSON results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also generate a summary CSV (summary.csv)
    #[arg(long)]
    summary: bool,

    /// Continue on unreadable files instead of aborting
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: ExtractionResult,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pipeline = BillPipeline::from_config(&config.extraction);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(std::result::Result::ok)
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.input);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results = Vec::new();
    for path in files {
        pb.set_message(path.display().to_string());

        let result = match fs::read_to_string(&path) {
            Ok(text) => pipeline.extract(&text),
            Err(e) => {
                // Unreadable input is the hard-failure case; bad bill
                // content never is.
                if !args.continue_on_error {
                    pb.finish_and_clear();
                    anyhow::bail!("Failed to read {}: {e}", path.display());
                }
                warn!("Skipping {}: {e}", path.display());
                ExtractionResult::failure(e.to_string())
            }
        };

        if let Some(dir) = &args.output_dir {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("result");
            let out_path = dir.join(format!("{stem}.json"));
            fs::write(&out_path, serde_json::to_string_pretty(&result)?)?;
        }

        results.push(FileResult { path, result });
        pb.inc(1);
    }
    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!("Summary written to {}", summary_path.display());
    }

    let failed = results.iter().filter(|r| !r.result.success).count();
    let extracted = results.iter().filter(|r| !r.result.data.is_empty()).count();
    println!(
        "{} {} files processed, {} with data, {} unreadable",
        style("Done:").green().bold(),
        results.len(),
        extracted,
        failed
    );
    if failed > 0 {
        error!("{failed} files could not be read");
    }

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "file",
        "success",
        "provider",
        "confidence",
        "bill_type",
        "pod",
        "pdr",
        "fiscal_code",
        "client_name",
        "city",
        "error",
    ])?;

    for file_result in results {
        let data = &file_result.result.data;
        writer.write_record([
            file_result.path.display().to_string(),
            file_result.result.success.to_string(),
            file_result.result.provider.as_str().to_string(),
            file_result.result.confidence.to_string(),
            data.bill_type.map(|t| t.as_str()).unwrap_or("").to_string(),
            data.pod.clone().unwrap_or_default(),
            data.pdr.clone().unwrap_or_default(),
            data.fiscal_code.clone().unwrap_or_default(),
            data.client_name.clone().unwrap_or_default(),
            data.city.clone().unwrap_or_default(),
            file_result.result.error.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
