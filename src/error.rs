use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("no pages available after applying selection")]
    NoPagesSelected,

    #[error("matched literal is not a valid number: '{0}'")]
    BadNumericLiteral(String),

    #[error("unit vocabulary out of sync: unknown suffix or phrase '{0}'")]
    UnknownUnit(String),
}
