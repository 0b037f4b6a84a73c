//! `printpost` - deliver a PDF to a physical printer.
//!
//! One job per invocation: the file is sent through the email-to-print
//! gateway by default, or handed to the local CUPS spooler with `--cups`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printpost_core::{
    Config, Duplex, Orientation, PageRange, PaperSize, PrintOptions, PrintRoute, page_count,
    print_job, printer_status,
};

const USAGE: &str = "Usage: printpost [OPTIONS] <file.pdf>

Options:
  --cups               print through the local spooler instead of the gateway
  --copies <N>         number of copies (default 1)
  --pages <RANGE>      page range for the spooler route, e.g. 1-5
  --duplex <EDGE>      two-sided printing: long-edge or short-edge
  --paper <SIZE>       a4 or letter (default a4)
  --landscape          landscape orientation
  --status             report printer status and exit";

/// Parsed command line.
struct CliArgs {
    route: PrintRoute,
    options: PrintOptions,
    status: bool,
    file: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        route: PrintRoute::Email,
        options: PrintOptions::default(),
        status: false,
        file: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--cups" => cli.route = PrintRoute::Spooler,
            "--status" => cli.status = true,
            "--landscape" => cli.options.orientation = Orientation::Landscape,
            "--copies" => {
                let value = args.next().ok_or("--copies requires a value")?;
                cli.options.copies = value
                    .parse()
                    .map_err(|_| format!("invalid copy count: {value}"))?;
            }
            "--pages" => {
                let value = args.next().ok_or("--pages requires a value")?;
                cli.options.pages = PageRange::Range(value);
            }
            "--duplex" => {
                let value = args.next().ok_or("--duplex requires a value")?;
                cli.options.duplex = match value.as_str() {
                    "long-edge" => Duplex::LongEdge,
                    "short-edge" => Duplex::ShortEdge,
                    other => return Err(format!("invalid duplex mode: {other}")),
                };
            }
            "--paper" => {
                let value = args.next().ok_or("--paper requires a value")?;
                cli.options.paper = match value.as_str() {
                    "a4" => PaperSize::A4,
                    "letter" => PaperSize::Letter,
                    other => return Err(format!("invalid paper size: {other}")),
                };
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {other}"));
            }
            _ => {
                if cli.file.is_some() {
                    return Err("only one file per invocation".to_string());
                }
                cli.file = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "printpost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::load().await {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if cli.status {
        println!("{}", printer_status(&config.printer.name).await);
        return ExitCode::SUCCESS;
    }

    let Some(file) = cli.file else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match page_count(&file) {
        Ok(pages) => info!(pages, file = %file.display(), "document loaded"),
        Err(error) => {
            warn!(%error, "could not inspect PDF");
            eprintln!("Failed to process the PDF: {error}");
            return ExitCode::FAILURE;
        }
    }

    match print_job(&config, cli.route, &file, &cli.options, None).await {
        Ok(confirmation) => {
            println!("{confirmation}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Print failed: {error}");
            ExitCode::FAILURE
        }
    }
}
