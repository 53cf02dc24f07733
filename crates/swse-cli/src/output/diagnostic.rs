//! Miette diagnostic wrapper for sheet files that fail to load.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::fs::read_to_string;
use std::path::Path;

use miette::{miette, Diagnostic, NamedSource, SourceSpan};
use swse::{AttributeSheet, LoadError};
use thiserror::Error;
use tracing::debug;

/// A miette-compatible diagnostic for invalid sheet JSON.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid sheet: {message}")]
#[diagnostic(code(swse::sheet))]
pub struct SheetDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl SheetDiagnostic {
    /// Create a diagnostic from a JSON error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // serde_json reports 1-based lines and columns.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);

        // The span must stay inside the content.
        let offset = offset.min(content.len());

        let help = err.is_data().then(|| {
            "a sheet has the shape { \"variables\": {...}, \"attributes\": {\"key\": [...]} }"
                .to_string()
        });

        SheetDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
            help,
        }
    }
}

/// Load a sheet, reporting JSON errors with their location in the file.
pub fn load_sheet(path: &Path) -> miette::Result<AttributeSheet> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read sheet file {}: {}", path.display(), e))?;
    match AttributeSheet::from_json_str(&content) {
        Ok(sheet) => {
            debug!(
                path = %path.display(),
                attributes = sheet.attributes.len(),
                "loaded sheet"
            );
            Ok(sheet)
        }
        Err(LoadError::Json { source }) => {
            Err(SheetDiagnostic::from_json_error(path, &content, &source).into())
        }
        Err(e) => Err(miette!("{}", e)),
    }
}
