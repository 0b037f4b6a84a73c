//! PDF introspection.

use crate::error::{Error, Result};
use std::path::Path;

/// Counts the pages of a PDF document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a parseable PDF.
pub fn page_count(path: &Path) -> Result<usize> {
    let document = lopdf::Document::load(path).map_err(|e| Error::Pdf(e.to_string()))?;
    Ok(document.get_pages().len())
}
