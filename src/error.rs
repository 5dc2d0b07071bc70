// src/error.rs
//! Error type shared by both renderers

use std::path::PathBuf;
use thiserror::Error;

use crate::image_validator::ImageValidationError;
use crate::OutputFormat;

pub type Result<T, E = RenderError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid style: {0}")]
    Style(String),

    #[error(transparent)]
    Image(#[from] ImageValidationError),

    #[error("Failed to load template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("DOCX packaging failed: {0}")]
    Docx(String),
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Payload(_) => "INVALID_PAYLOAD",
            Self::Style(_) => "STYLE_INVALID",
            Self::Image(e) => e.error_type.code(),
            Self::Template { .. } => "TEMPLATE_ERROR",
            Self::Rasterize(_) => "RASTERIZE_ERROR",
            Self::Docx(_) => "DOCX_GENERATION_FAILED",
        }
    }

    /// Coarse code reported to callers, independent of the failure cause.
    pub fn generation_code(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Docx => "DOCX_GENERATION_FAILED",
            OutputFormat::Pdf => "PDF_GENERATION_FAILED",
        }
    }
}
