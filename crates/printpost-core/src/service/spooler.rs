//! Local print spooler invocation.
//!
//! The spooler route hands the PDF to CUPS through `lp`; option flags are
//! built from [`PrintOptions`] and the job is identified by the request id
//! line `lp` prints on success.

use crate::error::{Error, Result};
use crate::job::{Orientation, PageRange, PrintOptions};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Builds the `lp` argument list for a job.
#[must_use]
pub fn build_lp_args(path: &Path, options: &PrintOptions, printer: &str) -> Vec<String> {
    let mut args = vec![
        "-d".to_string(),
        printer.to_string(),
        "-n".to_string(),
        options.copies.to_string(),
    ];

    if let Some(sides) = options.duplex.lp_sides() {
        args.push("-o".to_string());
        args.push(format!("sides={sides}"));
    }

    if let PageRange::Range(range) = &options.pages {
        args.push("-o".to_string());
        args.push(format!("page-ranges={range}"));
    }

    args.push("-o".to_string());
    args.push(format!("media={}", options.paper.media()));

    if options.orientation == Orientation::Landscape {
        args.push("-o".to_string());
        args.push("landscape".to_string());
    }

    args.push(path.display().to_string());
    args
}

/// Submits a job to the local spooler.
///
/// # Errors
///
/// Returns a spooler error when `lp` cannot be invoked or exits non-zero;
/// the error carries `lp`'s stderr.
pub async fn print_via_spooler(
    path: &Path,
    options: &PrintOptions,
    printer: &str,
) -> Result<String> {
    let args = build_lp_args(path, options, printer);
    debug!(?args, "invoking lp");

    let output = Command::new("lp")
        .args(&args)
        .output()
        .await
        .map_err(|e| Error::Spooler(format!("failed to invoke lp: {e}")))?;

    if !output.status.success() {
        return Err(Error::Spooler(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Reports the printer's spooler status.
///
/// Any failure — `lpstat` missing, queue unknown — collapses to a fixed
/// fallback string rather than an error; status is informational only.
pub async fn printer_status(printer: &str) -> String {
    let result = Command::new("lpstat").args(["-p", printer]).output().await;
    match result {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        _ => "Printer status unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Duplex, PaperSize};
    use std::path::PathBuf;

    const PRINTER: &str = "Brother_HL_L2440DW";

    fn args_for(options: &PrintOptions) -> Vec<String> {
        build_lp_args(&PathBuf::from("/tmp/test.pdf"), options, PRINTER)
    }

    #[test]
    fn default_options() {
        let args = args_for(&PrintOptions::default());
        assert!(args.contains(&"-d".to_string()));
        assert!(args.contains(&PRINTER.to_string()));
        assert!(args.contains(&"-n".to_string()));
        assert!(args.contains(&"1".to_string()));
        assert!(args.contains(&"-o".to_string()));
        assert!(args.contains(&"media=a4".to_string()));
        assert!(args.contains(&"/tmp/test.pdf".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("sides=")));
        assert!(!args.contains(&"landscape".to_string()));
    }

    #[test]
    fn duplex_long_edge() {
        let options = PrintOptions {
            duplex: Duplex::LongEdge,
            ..PrintOptions::default()
        };
        assert!(args_for(&options).contains(&"sides=two-sided-long-edge".to_string()));
    }

    #[test]
    fn duplex_short_edge() {
        let options = PrintOptions {
            duplex: Duplex::ShortEdge,
            ..PrintOptions::default()
        };
        assert!(args_for(&options).contains(&"sides=two-sided-short-edge".to_string()));
    }

    #[test]
    fn landscape_orientation() {
        let options = PrintOptions {
            orientation: Orientation::Landscape,
            ..PrintOptions::default()
        };
        assert!(args_for(&options).contains(&"landscape".to_string()));
    }

    #[test]
    fn page_range() {
        let options = PrintOptions {
            pages: PageRange::Range("1-3".to_string()),
            ..PrintOptions::default()
        };
        assert!(args_for(&options).contains(&"page-ranges=1-3".to_string()));
    }

    #[test]
    fn multiple_copies() {
        let options = PrintOptions {
            copies: 3,
            ..PrintOptions::default()
        };
        assert!(args_for(&options).contains(&"3".to_string()));
    }

    #[test]
    fn letter_paper_size() {
        let options = PrintOptions {
            paper: PaperSize::Letter,
            ..PrintOptions::default()
        };
        assert!(args_for(&options).contains(&"media=letter".to_string()));
    }

    #[test]
    fn file_path_comes_last() {
        let args = args_for(&PrintOptions::default());
        assert_eq!(args.last(), Some(&"/tmp/test.pdf".to_string()));
    }

    #[tokio::test]
    async fn status_always_yields_a_string() {
        let status = printer_status("No_Such_Printer_Queue").await;
        assert!(!status.is_empty());
    }
}
