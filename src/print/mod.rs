// src/print/mod.rs
//! Print-layout renderer: record -> HTML template -> PDF via a rasterizer.

pub mod rasterizer;
pub mod sections;
pub mod template;

pub use rasterizer::{CommandRasterizer, Rasterizer};
pub use template::HtmlTemplate;

use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use crate::config::RendererConfig;
use crate::error::Result;
use crate::types::{ResolvedStyle, ResumeRecord};

pub struct PrintRenderer {
    template_path: PathBuf,
    rasterizer: Box<dyn Rasterizer>,
}

impl PrintRenderer {
    pub fn new(template_path: impl Into<PathBuf>, rasterizer: Box<dyn Rasterizer>) -> Self {
        Self {
            template_path: template_path.into(),
            rasterizer,
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(
            config.template_path(),
            Box::new(CommandRasterizer::from_config(&config.rasterizer)),
        )
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Fill the template without rasterizing. The template is read on every
    /// call so edits on disk apply to the next render.
    pub fn render_html(&self, record: &ResumeRecord, style: &ResolvedStyle) -> Result<String> {
        let template = HtmlTemplate::load(&self.template_path)?;
        Ok(template.render(&sections::variables(record, style)))
    }

    pub fn render(&self, record: &ResumeRecord, style: &ResolvedStyle) -> Result<Vec<u8>> {
        let span = info_span!("pdf_render", candidate = %record.personal.name);
        let _guard = span.enter();

        let html = self.render_html(record, style)?;
        let pdf = self.rasterizer.rasterize(&html)?;
        info!("Rendered PDF ({} bytes)", pdf.len());
        Ok(pdf)
    }
}
