use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tally_ingest::{CellTable, PdfPage, StatementSource, parse_statement};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Normalize bank statement exports into one ledger")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one statement export and print the normalized ledger as JSON
    Extract {
        /// Statement file: a .csv export, or extracted table rows as .json
        file: PathBuf,

        /// Source format (default: inferred from the file extension)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Line-oriented CSV-like export, parsed from raw bytes
    Delimited,
    /// Word-processor tables as JSON: tables of rows of cells
    DocxTables,
    /// PDF tables as JSON: pages of tables of rows of nullable cells
    PdfTables,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract { file, format } => extract(&file, format),
    }
}

fn extract(file: &Path, format: Option<Format>) -> Result<()> {
    let format = match format {
        Some(f) => f,
        None => infer_format(file)?,
    };

    let source = match format {
        Format::Delimited => {
            let bytes =
                fs::read(file).with_context(|| format!("reading {}", file.display()))?;
            StatementSource::DelimitedText(bytes)
        }
        Format::DocxTables => {
            let tables: Vec<CellTable> = read_extracted_rows(file)?;
            StatementSource::DocxTables(tables)
        }
        Format::PdfTables => {
            let pages: Vec<PdfPage> = read_extracted_rows(file)?;
            StatementSource::PdfTables(pages)
        }
    };

    let ledger = parse_statement(source);
    if ledger.is_empty() {
        eprintln!("no transactions could be extracted");
    }
    println!("{}", serde_json::to_string_pretty(&ledger)?);
    Ok(())
}

/// Table formats are handed over by the extraction step as JSON rows; the
/// parsers never see document bytes.
fn read_extracted_rows<T: serde::de::DeserializeOwned>(file: &Path) -> Result<T> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("decoding extracted rows from {}", file.display()))
}

fn infer_format(file: &Path) -> Result<Format> {
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "csv" | "txt" => Ok(Format::Delimited),
        _ => bail!(
            "unsupported file type: {} (use --format docx-tables or --format pdf-tables for extracted .json rows)",
            file.display()
        ),
    }
}
