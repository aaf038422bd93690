//! Waste Registry CLI
//!
//! Front-end for the municipal waste/wastewater record set: the shared
//! spreadsheet is the read model, local storage absorbs the writes that
//! cannot be pushed back, and every read reconciles the two.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;
use waste_registry::cli::{Cli, Command};
use waste_registry::config::Config;
use waste_registry::error::DataError;
use waste_registry::format::{OutputFormat, format_records_markdown, format_stats_markdown};
use waste_registry::service::DataService;
use waste_registry::sheet::SheetClient;
use waste_registry::stats::Stats;
use waste_registry::store::{LocalStore, MemoryStore, SqliteStore};
use waste_registry::{export, import};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;

    // Override config from CLI arguments
    if let Some(store_path) = &cli.store {
        config.store_path = store_path.into();
    }
    if let Some(sheet_id) = &cli.sheet_id {
        config.sheet_id = sheet_id.clone();
    }
    if let Some(sheet_name) = &cli.sheet_name {
        config.sheet_name = sheet_name.clone();
    }

    let service = build_service(&config);

    match cli.command {
        Some(Command::List { format }) => {
            let format = OutputFormat::from_str(&format)
                .ok_or_else(|| anyhow::anyhow!("unknown format: {format}"))?;
            run_list(&service, format).await?;
        }
        None => {
            run_list(&service, OutputFormat::Markdown).await?;
        }
        Some(Command::Stats) => {
            let records = service.load_all().await;
            print!("{}", format_stats_markdown(&Stats::collect(&records)));
        }
        Some(Command::Add(args)) => {
            let record = service.add(args.into_draft()?).await.map_err(user_error)?;
            println!("Added {} ({})", record.full_name, record.id);
        }
        Some(Command::Import(args)) => {
            run_import(&service, args).await?;
        }
        Some(Command::Export(args)) => {
            run_export(&service, args).await?;
        }
        Some(Command::Delete { id }) => {
            service.delete(&id).await.map_err(user_error)?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}

/// Wire the service from config: durable store when it opens, ephemeral
/// otherwise. A broken store file must not keep the registry from running.
fn build_service(config: &Config) -> DataService {
    let store = match SqliteStore::open(&config.store_path) {
        Ok(store) => LocalStore::new(Box::new(store)),
        Err(err) => {
            warn!(
                path = %config.store_path.display(),
                "could not open local store, running ephemeral: {err:#}"
            );
            LocalStore::new(Box::new(MemoryStore::new()))
        }
    };
    let sheet = SheetClient::new(config.sheet_id.clone(), config.sheet_name.clone());
    DataService::new(Arc::new(store), sheet)
}

async fn run_list(service: &DataService, format: OutputFormat) -> Result<()> {
    let records = service.load_all().await;
    match format {
        OutputFormat::Markdown => print!("{}", format_records_markdown(&records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}

async fn run_import(
    service: &DataService,
    args: waste_registry::cli::import::ImportArgs,
) -> Result<()> {
    if args.show_template {
        println!("{}", import::template_headers().join(","));
        return Ok(());
    }

    // clap guarantees the file is present when --show-template is absent.
    let file = args
        .file
        .ok_or_else(|| anyhow::anyhow!("no import file given"))?;
    let batch = import::parse_import_path(&file).map_err(user_error)?;
    println!(
        "Parsed {} rows: {} accepted, {} dropped",
        batch.total_rows,
        batch.accepted(),
        batch.dropped()
    );

    if args.dry_run {
        return Ok(());
    }

    let records = service.add_batch(batch.records).await.map_err(user_error)?;
    println!("Imported {} records", records.len());
    Ok(())
}

async fn run_export(
    service: &DataService,
    args: waste_registry::cli::export::ExportArgs,
) -> Result<()> {
    let records = service.load_all().await;

    match args.output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            export::write_report_csv(&records, file)?;
            println!("Wrote {} records to {}", records.len(), path.display());
        }
        None => match export::pending_rows(&records) {
            Some(blob) => println!("{blob}"),
            None => println!("No pending local records to export"),
        },
    }
    Ok(())
}

/// Keep the structured error context when surfacing to the terminal.
fn user_error(err: DataError) -> anyhow::Error {
    match &err.field {
        Some(field) => anyhow::anyhow!("{} (field: {})", err, field),
        None => anyhow::anyhow!("{}", err),
    }
}
