//! Print job option model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-sided printing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Duplex {
    /// Single-sided.
    #[default]
    Off,
    /// Two-sided, flip on the long edge.
    LongEdge,
    /// Two-sided, flip on the short edge.
    ShortEdge,
}

impl Duplex {
    /// The CUPS `sides` option value, if duplex is on.
    #[must_use]
    pub const fn lp_sides(self) -> Option<&'static str> {
        match self {
            Self::Off => None,
            Self::LongEdge => Some("two-sided-long-edge"),
            Self::ShortEdge => Some("two-sided-short-edge"),
        }
    }
}

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// ISO A4.
    #[default]
    A4,
    /// US Letter.
    Letter,
}

impl PaperSize {
    /// The CUPS `media` option value.
    #[must_use]
    pub const fn media(self) -> &'static str {
        match self {
            Self::A4 => "a4",
            Self::Letter => "letter",
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tall.
    #[default]
    Portrait,
    /// Wide.
    Landscape,
}

/// Pages to print: everything, or an explicit range like `1-5`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageRange {
    /// All pages.
    #[default]
    All,
    /// An explicit `lp` page-ranges expression.
    Range(String),
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Range(range) => write!(f, "{range}"),
        }
    }
}

/// Options for one print job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
    /// Number of copies.
    pub copies: u32,
    /// Two-sided printing mode.
    pub duplex: Duplex,
    /// Pages to print.
    pub pages: PageRange,
    /// Paper size.
    pub paper: PaperSize,
    /// Page orientation.
    pub orientation: Orientation,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            copies: 1,
            duplex: Duplex::Off,
            pages: PageRange::All,
            paper: PaperSize::A4,
            orientation: Orientation::Portrait,
        }
    }
}
