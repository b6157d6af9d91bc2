//! CLI entry point for the Titanic exploratory analysis.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use titanic_eda::io::load_csv;
use titanic_eda::{AnalysisConfig, AnalysisReport, Analyzer, ReportDocument};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory statistics for the Titanic passenger dataset",
    long_about = "Computes missing-value reports, imputes and derives features, \
                  and summarizes survival by passenger attributes.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  titanic-eda -i train.csv\n\n  \
                  # Export the processed dataset and a full JSON report\n  \
                  titanic-eda -i train.csv --export -r -o results/\n\n  \
                  # Machine-readable output\n  \
                  titanic-eda -i train.csv --json | jq .key_finding"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for exported files and reports
    ///
    /// Overrides `output_dir` from --config. Defaults to "output".
    #[arg(short, long)]
    output: Option<String>,

    /// Custom report name (without extension)
    ///
    /// If not specified, the input file stem is used
    #[arg(long)]
    output_name: Option<String>,

    /// Number of histogram bins
    #[arg(long)]
    bins: Option<usize>,

    /// Number of cleaned rows to include in the preview
    #[arg(long)]
    preview: Option<usize>,

    /// Load analysis configuration from a JSON file
    ///
    /// Command line flags take precedence over values in the file
    #[arg(long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the processed CSV and summary JSON to the output directory
    #[arg(long)]
    export: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = build_config(&args)?;
    let analyzer = Analyzer::builder().config(config).build()?;

    let data = load_csv(&args.input)?;

    info!("{}", "=".repeat(80));
    info!("Starting analysis...");
    info!("{}", "=".repeat(80));

    let run = analyzer.run_dataframe(&data).map_err(|e| {
        error!("Analysis failed: {}", e);
        anyhow!("Analysis failed: {}", e)
    })?;

    let document = ReportDocument::new(run.report, Some(args.input.clone()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let report_path = analyzer.writer().write_report(&document, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&document.report, &run.exported_files, &args);

    Ok(())
}

/// Start from the --config file (or defaults) and apply flag overrides.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(ref output) = args.output {
        config.output_dir = PathBuf::from(output);
    }
    if let Some(ref name) = args.output_name {
        config.output_name = Some(name.clone());
    }
    if let Some(bins) = args.bins {
        config.histogram_bins = bins;
    }
    if let Some(rows) = args.preview {
        config.preview_rows = rows;
    }
    if args.export {
        config.save_to_disk = true;
    }

    config.validate()?;
    Ok(config)
}

fn load_config(path: &str) -> Result<AnalysisConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid config file {}", path))
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Print a human-readable summary of the analysis.
///
/// This is the default output when `--json` is not specified.
fn print_human_readable_summary(report: &AnalysisReport, exported: &[PathBuf], args: &Args) {
    let shape = &report.shape_summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("ANALYSIS COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        args.input,
        shape.row_count,
        shape.column_names.len()
    );
    if !report.rejected_records.is_empty() {
        println!("Rejected records: {}", report.rejected_records.len());
        for rejected in report.rejected_records.iter().take(5) {
            println!("  ! row {}: {}", rejected.row_index, rejected.reason);
        }
    }
    println!();

    println!("MISSING VALUES");
    println!("{}", "-".repeat(40));
    println!("{:<14} {:>8} {:>10}", "Column", "Missing", "Percent");
    for (field, entry) in &report.missing_report {
        println!("{:<14} {:>8} {:>9.1}%", field.as_str(), entry.count, entry.percent);
    }
    println!();

    if !report.imputation_steps.is_empty() {
        println!("Actions Taken:");
        for step in &report.imputation_steps {
            println!("  - {}", step);
        }
        println!();
    }

    println!("NUMERIC STATS (grouped by Survived)");
    println!("{}", "-".repeat(40));
    println!(
        "{:<8} {:<6} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Column", "Group", "Mean", "Std", "Median", "Min", "Max"
    );
    for (field, groups) in &report.numeric_stats_by_outcome {
        for (group, stats) in groups {
            println!(
                "{:<8} {:<6} {:>8} {:>8} {:>8} {:>8} {:>8}",
                field.as_str(),
                group,
                fmt_opt(stats.mean),
                fmt_opt(stats.std),
                fmt_opt(stats.median),
                fmt_opt(stats.min),
                fmt_opt(stats.max)
            );
        }
    }
    println!();

    println!("CATEGORICAL COUNTS (grouped by Survived)");
    println!("{}", "-".repeat(40));
    println!(
        "{:<10} {:<10} {:>8} {:>10} {:>10}",
        "Column", "Value", "Count", "Survived", "Rate"
    );
    for (field, categories) in &report.categorical_counts_by_outcome {
        for (category, stats) in categories {
            let rate = stats
                .survival_rate_percent
                .map_or_else(|| "-".to_string(), |r| format!("{:.1}%", r));
            println!(
                "{:<10} {:<10} {:>8} {:>10} {:>10}",
                field.as_str(),
                category,
                stats.count,
                stats.survived_count,
                rate
            );
        }
    }
    println!();

    println!("CORRELATION WITH SURVIVED");
    println!("{}", "-".repeat(40));
    for (field, r) in &report.correlations {
        println!("  {:<12} {:>7.3}", field.as_str(), r);
    }
    println!();

    match &report.key_finding {
        Some(finding) => {
            println!("Key Finding: {}", finding.factor_name);
            println!("  {}", finding.explanation_text);
        }
        None => println!("Key Finding: none (no factor could be scored)"),
    }
    println!();

    if !exported.is_empty() {
        println!("Exported:");
        for path in exported {
            println!("  - {}", path.display());
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}
