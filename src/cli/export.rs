//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_full_json, export_full_yaml, FullExport};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expense rows)
    Csv,
    /// JSON format (expenses plus metadata)
    Json,
    /// YAML format (expenses plus metadata, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all expenses
    All {
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show what an export would contain without writing it
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    clock: &dyn Clock,
    cmd: ExportCommands,
) -> ExpenseResult<()> {
    let export = FullExport::new(storage.expenses.get_all()?, clock.now());

    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    ExpenseError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let mut writer = BufWriter::new(file);
                write_export(&export, format, pretty, &mut writer)?;
                writer.flush()?;
                println!(
                    "Exported {} expenses to: {}",
                    export.metadata.count,
                    path.display()
                );
            }
            None => {
                let stdout = std::io::stdout();
                let mut writer = stdout.lock();
                write_export(&export, format, pretty, &mut writer)?;
                writeln!(writer)?;
            }
        },

        ExportCommands::Info => {
            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("App version:    {}", export.app_version);
            println!("Expenses:       {}", export.metadata.count);
            println!("Total:          {}", export.metadata.total);
            if let (Some(earliest), Some(latest)) =
                (&export.metadata.earliest, &export.metadata.latest)
            {
                println!("Date range:     {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    export: &FullExport,
    format: ExportFormat,
    pretty: bool,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => export_expenses_csv(&export.expenses, writer),
        ExportFormat::Json => export_full_json(export, writer, pretty),
        ExportFormat::Yaml => export_full_yaml(export, writer),
    }
}
