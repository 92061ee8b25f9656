//! Listing converter CLI
//!
//! Command-line tool for converting marketplace product-listing exports
//! into the fixed six-column target format.

use chrono::Local;
use clap::{Parser, Subcommand};
use listing_core::{
    convert, default_output_path, export, read_table, sample_table, ColumnIndex, ConvertConfig,
    ExportFormat, Table,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "listing-convert")]
#[command(about = "Marketplace listing export converter", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a source export into the target format
    Convert {
        /// Input file (.csv, .xlsx, .xls, .ods)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (defaults to <input>_<suffix>_<date>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (xlsx, csv or json)
        #[arg(long, default_value = "xlsx")]
        format: String,

        /// Config file (TOML) overriding aliases and output headers
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of converted rows to print before writing
        #[arg(short, long, default_value_t = 10)]
        preview: usize,
    },

    /// Show basic information about an input file
    Inspect {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show which source column each field resolves to
    Resolve {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a sample source export
    Sample {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (xlsx, csv or json)
        #[arg(long, default_value = "xlsx")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Commands) -> listing_core::Result<()> {
    match command {
        Commands::Convert {
            input,
            output,
            format,
            config,
            preview,
        } => cmd_convert(&input, output, &format, config.as_deref(), preview),
        Commands::Inspect { input } => cmd_inspect(&input),
        Commands::Resolve { input, config } => cmd_resolve(&input, config.as_deref()),
        Commands::Sample { output, format } => cmd_sample(&output, &format),
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    format: &str,
    config_path: Option<&Path>,
    preview: usize,
) -> listing_core::Result<()> {
    let format: ExportFormat = format.parse()?;
    let config = ConvertConfig::load_or_default(config_path)?;

    let table = read_table(input)?;
    println!("Read {} rows from {}", table.row_count(), input.display());

    let conversion = convert(&table, &config)?;
    let report = &conversion.report;

    println!("Converted {} rows", report.rows);
    println!("  Barcode column:             {}", report.barcode_column);
    println!(
        "  Product name column:        {}",
        report.product_name_column.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Supplier stock code column: {}",
        report.supplier_code_column.as_deref().unwrap_or("(none, filled from barcode)")
    );
    println!("  Supplier codes filled from barcode: {}", report.fallback_fills);

    if preview > 0 {
        println!();
        print_table(&conversion.table, preview);
    }

    let output = output
        .unwrap_or_else(|| default_output_path(input, &config, Local::now().date_naive(), format));
    export(&conversion.table, &output, format, &config.sheet_name)?;
    info!(path = %output.display(), "wrote converted table");

    println!();
    println!("Exported {} rows to {}", conversion.table.row_count(), output.display());

    Ok(())
}

fn cmd_inspect(input: &Path) -> listing_core::Result<()> {
    let table = read_table(input)?;

    println!("File: {}", input.display());
    println!("Rows: {}", table.row_count());
    println!("Columns: {}", table.column_count());

    let first: Vec<&str> = table.column_names().into_iter().take(5).collect();
    println!("First columns: {}", first.join(", "));

    Ok(())
}

fn cmd_resolve(input: &Path, config_path: Option<&Path>) -> listing_core::Result<()> {
    let config = ConvertConfig::load_or_default(config_path)?;
    let table = read_table(input)?;
    let index = ColumnIndex::new(&table);
    if index.is_empty() {
        println!("{} has no named columns", input.display());
        return Ok(());
    }
    println!("{} distinct headers in {}", index.len(), input.display());

    let fields = [
        ("Barcode", &config.aliases.barcode),
        ("Product Name", &config.aliases.product_name),
        ("Supplier Stock Code", &config.aliases.supplier_stock_code),
    ];

    for (field, aliases) in fields {
        match index.resolve_match(aliases) {
            Some(hit) => println!("{:<20} -> '{}' (alias '{}')", field, hit.column, hit.alias),
            None => println!("{:<20} -> not found", field),
        }
    }

    Ok(())
}

fn cmd_sample(output: &Path, format: &str) -> listing_core::Result<()> {
    let format: ExportFormat = format.parse()?;
    let table = sample_table();
    export(&table, output, format, "Sheet1")?;

    println!("Created sample file: {}", output.display());
    println!();
    println!("Convert it with:");
    println!("  listing-convert convert --input {}", output.display());

    Ok(())
}

/// Print the first `limit` rows as tab-separated text
fn print_table(table: &Table, limit: usize) {
    println!("{}", table.column_names().join("\t"));
    println!("{}", "-".repeat(table.column_count() * 12));

    let preview = table.head(limit);
    for index in 0..preview.row_count() {
        if let Some(row) = preview.row(index) {
            let values: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            println!("{}", values.join("\t"));
        }
    }

    if table.row_count() > limit {
        println!("... ({} more rows)", table.row_count() - limit);
    }
}
