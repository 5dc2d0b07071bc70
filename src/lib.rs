// src/lib.rs
//! Resume rendering: a structured resume record to DOCX (document structure)
//! or to PDF (HTML print layout).

pub mod cli;
pub mod config;
pub mod document;
pub mod enhance;
pub mod error;
pub mod extraction;
pub mod generator;
pub mod image_validator;
pub mod markup;
pub mod pitch;
pub mod print;
pub mod types;
pub mod utils;

pub use config::RendererConfig;
pub use error::{RenderError, Result};
pub use generator::ResumeRenderer;
pub use types::{OutputFormat, RenderedDocument, ResumePayload, ResumeRecord};

/// Render a JSON payload to DOCX with the default configuration.
pub fn render_docx(json: &str) -> Result<RenderedDocument> {
    ResumeRenderer::new(&RendererConfig::default()).render_json(json, OutputFormat::Docx)
}

/// Render a JSON payload to PDF using `config`'s template and rasterizer.
pub fn render_pdf(json: &str, config: &RendererConfig) -> Result<RenderedDocument> {
    ResumeRenderer::new(config).render_json(json, OutputFormat::Pdf)
}
