//! autobi CLI: clean a CSV, infer its schema, recommend and resolve charts.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use autobi_charts::{recommend, resolve, Aggregation, ChartSpec, ResolvedPlot};
use autobi_clean::{CleaningReport, DataCleaner};
use autobi_core::config::AnalysisConfig;
use autobi_core::types::Table;
use autobi_infer::{Schema, SchemaInferer};
use autobi_io::{
    load_chart_specs, load_config_file, read_table, write_export, CsvWriter, ExportDocument,
    JsonlWriter,
};

#[derive(Parser)]
#[command(name = "autobi")]
#[command(about = "Auto-BI: clean a table, infer roles and recommend charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
struct Common {
    /// Path to the input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// YAML config file (overrides environment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Distinct count above which a numeric column is a measure
    #[arg(long)]
    measure_threshold: Option<usize>,

    /// Placeholder for missing text values
    #[arg(long)]
    missing_placeholder: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the inferred schema of the cleaned table as JSON
    Schema {
        #[command(flatten)]
        common: Common,
    },

    /// Clean the table; print the cleaning report as JSON
    Clean {
        #[command(flatten)]
        common: Common,

        /// Write the cleaned table here (.csv or .jsonl)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the schema and recommended charts as JSON
    Recommend {
        #[command(flatten)]
        common: Common,
    },

    /// Resolve chart specs against the cleaned table
    Build {
        #[command(flatten)]
        common: Common,

        /// JSON or YAML file with one spec, a list, or an export document
        #[arg(long, conflicts_with = "chart_type")]
        spec: Option<PathBuf>,

        /// Chart type for a single hand-built chart
        #[arg(long = "type", value_name = "TYPE")]
        chart_type: Option<String>,

        #[arg(long, requires = "chart_type")]
        x: Option<String>,

        #[arg(long, requires = "chart_type")]
        y: Option<String>,

        #[arg(long, requires = "chart_type")]
        color: Option<String>,

        #[arg(long, default_value = "sum")]
        agg: Aggregation,
    },

    /// Full pipeline: write cleaned_data.csv and chart_specs.json, print plots
    Run {
        #[command(flatten)]
        common: Common,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Schema { common } => show_schema(&common),
        Commands::Clean { common, output } => clean_table(&common, output.as_deref()),
        Commands::Recommend { common } => recommend_charts(&common),
        Commands::Build {
            common,
            spec,
            chart_type,
            x,
            y,
            color,
            agg,
        } => build_charts(&common, spec.as_deref(), chart_type, x, y, color, agg),
        Commands::Run { common, out_dir } => run_pipeline(&common, &out_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Everything derived from one input file.
struct Analysis {
    cleaned: Table,
    report: CleaningReport,
    schema: Schema,
}

fn analyze(common: &Common) -> Result<Analysis, Box<dyn Error>> {
    let cfg = resolve_config(common)?;
    let raw = read_table(&common.input)?;
    let (cleaned, report) = DataCleaner::new(cfg.clone()).clean(&raw);
    let schema = SchemaInferer::new(&cfg).infer_schema(&cleaned);
    tracing::info!(
        rows_before = report.rows_before,
        rows_after = report.rows_after,
        fields = schema.fields.len(),
        "analyzed input"
    );
    Ok(Analysis {
        cleaned,
        report,
        schema,
    })
}

/// Defaults, then environment, then config file, then flags.
fn resolve_config(common: &Common) -> Result<AnalysisConfig, Box<dyn Error>> {
    let mut cfg = AnalysisConfig::from_env();
    if let Some(path) = &common.config {
        cfg.apply_file(&load_config_file(path)?);
    }
    apply_cli_overrides(&mut cfg, common);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_cli_overrides(cfg: &mut AnalysisConfig, common: &Common) {
    if let Some(threshold) = common.measure_threshold {
        cfg.measure_distinct_threshold = threshold;
    }
    if let Some(placeholder) = &common.missing_placeholder {
        cfg.missing_text_placeholder = placeholder.clone();
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show_schema(common: &Common) -> Result<(), Box<dyn Error>> {
    let analysis = analyze(common)?;
    print_json(&analysis.schema)
}

fn clean_table(common: &Common, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let analysis = analyze(common)?;
    if let Some(path) = output {
        write_table(path, &analysis.cleaned)?;
    }
    print_json(&analysis.report)
}

fn write_table(path: &Path, table: &Table) -> Result<(), Box<dyn Error>> {
    let jsonl = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"));
    if jsonl {
        JsonlWriter::to_path(path)?.write_table(table)?;
    } else {
        CsvWriter::to_path(path)?.write_table(table)?;
    }
    Ok(())
}

fn recommend_charts(common: &Common) -> Result<(), Box<dyn Error>> {
    let analysis = analyze(common)?;
    let recs = recommend(&analysis.schema, &analysis.cleaned);
    print_json(&ExportDocument::new(analysis.schema, recs))
}

fn build_charts(
    common: &Common,
    spec_path: Option<&Path>,
    chart_type: Option<String>,
    x: Option<String>,
    y: Option<String>,
    color: Option<String>,
    agg: Aggregation,
) -> Result<(), Box<dyn Error>> {
    let analysis = analyze(common)?;
    let specs = match (spec_path, chart_type) {
        (Some(path), _) => load_chart_specs(path)?,
        (None, Some(kind)) => {
            let x = x.ok_or("--x is required with --type")?;
            check_axes(&analysis.schema, &[Some(x.as_str()), y.as_deref(), color.as_deref()])?;
            vec![ChartSpec::custom(
                kind.as_str(),
                x,
                y.as_deref(),
                color.as_deref(),
                agg,
            )]
        }
        (None, None) => return Err("either --spec or --type is required".into()),
    };

    let plots: Vec<ResolvedPlot> = specs
        .iter()
        .map(|spec| resolve(&analysis.cleaned, spec))
        .collect();
    print_json(&plots)
}

/// Hand-built charts may only name columns offered as axis candidates.
fn check_axes(schema: &Schema, axes: &[Option<&str>]) -> Result<(), Box<dyn Error>> {
    let candidates = schema.axis_candidates();
    for axis in axes.iter().flatten().filter(|a| !a.is_empty()) {
        if !candidates.contains(axis) {
            return Err(format!(
                "unknown column '{}', expected one of: {}",
                axis,
                candidates.join(", ")
            )
            .into());
        }
    }
    Ok(())
}

fn run_pipeline(common: &Common, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let analysis = analyze(common)?;
    let recs = recommend(&analysis.schema, &analysis.cleaned);

    CsvWriter::to_path(out_dir.join("cleaned_data.csv"))?.write_table(&analysis.cleaned)?;
    let plots: Vec<ResolvedPlot> = recs
        .iter()
        .map(|spec| resolve(&analysis.cleaned, spec))
        .collect();
    write_export(
        out_dir.join("chart_specs.json"),
        &ExportDocument::new(analysis.schema, recs),
    )?;

    eprintln!(
        "✓ Cleaned {} → {} rows, {} charts written to {}",
        analysis.report.rows_before,
        analysis.report.rows_after,
        plots.len(),
        out_dir.display()
    );
    print_json(&plots)
}
