//! Export format enumeration
//!
//! The set of supported output formats is closed: adding a format means
//! adding a variant here and a dispatch arm in the multi-format exporter,
//! which the compiler enforces through exhaustive matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native extension of documents the walker will process. Files with any
/// other extension are skipped, not errored.
pub const NATIVE_EXTENSION: &str = "f3d";

/// A target output format for a document version export.
///
/// Each format has a canonical lowercase extension token that is used both
/// in output filenames and in user-facing selection labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Native archive of the document
    #[serde(rename = "f3d")]
    F3d,
    /// STEP (ISO 10303) solid model
    #[serde(rename = "step")]
    Step,
    /// STL triangle mesh
    #[serde(rename = "stl")]
    Stl,
    /// IGES surface model
    #[serde(rename = "igs")]
    Iges,
    /// ACIS SAT solid model
    #[serde(rename = "sat")]
    Sat,
    /// Shape Manager SMT solid model
    #[serde(rename = "smt")]
    Smt,
}

impl ExportFormat {
    /// Every supported format, in canonical order.
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::F3d,
        ExportFormat::Step,
        ExportFormat::Stl,
        ExportFormat::Iges,
        ExportFormat::Sat,
        ExportFormat::Smt,
    ];

    /// Canonical lowercase extension token for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::F3d => "f3d",
            ExportFormat::Step => "step",
            ExportFormat::Stl => "stl",
            ExportFormat::Iges => "igs",
            ExportFormat::Sat => "sat",
            ExportFormat::Smt => "smt",
        }
    }

    /// The formats selected by default when the user picks none.
    pub fn default_selection() -> Vec<ExportFormat> {
        vec![ExportFormat::F3d, ExportFormat::Step]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f3d" => Ok(ExportFormat::F3d),
            "step" => Ok(ExportFormat::Step),
            "stl" => Ok(ExportFormat::Stl),
            "igs" | "iges" => Ok(ExportFormat::Iges),
            "sat" => Ok(ExportFormat::Sat),
            "smt" => Ok(ExportFormat::Smt),
            other => Err(format!(
                "Unknown export format '{other}'. Supported: f3d, step, stl, igs, sat, smt"
            )),
        }
    }
}
