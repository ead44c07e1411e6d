//! Process command - extract data from a single bill text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use bolletta_core::{BillParser, BillPipeline, ExtractionResult};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file with already-decoded bill text
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show the confidence score on stderr
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let text = fs::read_to_string(&args.input)?;

    let pipeline = BillPipeline::from_config(&config.extraction);
    let result = pipeline.extract(&text);

    if args.show_confidence {
        eprintln!(
            "{} {}",
            style("Confidence:").bold(),
            style(result.confidence).cyan()
        );
    }

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text => render_text(&result),
    };

    match args.output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Human-readable summary of the extraction result.
fn render_text(result: &ExtractionResult) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Provider:   {}", result.provider.as_str()));
    lines.push(format!("Confidence: {}/100", result.confidence));

    let data = &result.data;
    let mut push = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            lines.push(format!("{label:<22} {value}"));
        }
    };

    push("Client name:", data.client_name.clone());
    push("First name:", data.first_name.clone());
    push("Last name:", data.last_name.clone());
    push("Fiscal code:", data.fiscal_code.clone());
    push("VAT number:", data.vat_number.clone());
    push("Company:", data.company.clone());
    push("Address:", data.address.clone());
    push("City:", data.city.clone());
    push("Province:", data.province.clone());
    push("Postal code:", data.postal_code.clone());
    push("POD:", data.pod.clone());
    push("PDR:", data.pdr.clone());
    push("Customer number:", data.customer_number.clone());
    push(
        "Electric consumption:",
        data.electric_consumption.map(|n| format!("{n} kWh")),
    );
    push(
        "Gas consumption:",
        data.gas_consumption.map(|n| format!("{n} Smc")),
    );
    push(
        "Power committed:",
        data.power_committed.map(|p| format!("{p} kW")),
    );
    push("Supplier:", data.supplier.clone());
    push("Contract number:", data.contract_number.clone());
    push("Bill date:", data.bill_date.map(|d| d.to_string()));
    push("Period from:", data.from_date.map(|d| d.to_string()));
    push("Period to:", data.to_date.map(|d| d.to_string()));
    push(
        "Bill type:",
        data.bill_type.map(|t| t.as_str().to_string()),
    );

    if result.data.is_empty() {
        lines.push("No fields extracted - manual entry suggested".to_string());
    }

    lines.join("\n")
}
