// src/generator.rs
use tracing::{error, info};

use crate::config::RendererConfig;
use crate::document;
use crate::error::Result;
use crate::print::{PrintRenderer, Rasterizer};
use crate::types::{OutputFormat, RenderedDocument, ResolvedStyle, ResumePayload};

/// Entry point for both output formats.
pub struct ResumeRenderer {
    print: PrintRenderer,
}

impl ResumeRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            print: PrintRenderer::from_config(config),
        }
    }

    /// Use a custom rasterizer instead of the configured external program.
    pub fn with_rasterizer(config: &RendererConfig, rasterizer: Box<dyn Rasterizer>) -> Self {
        Self {
            print: PrintRenderer::new(config.template_path(), rasterizer),
        }
    }

    pub fn render_json(&self, json: &str, format: OutputFormat) -> Result<RenderedDocument> {
        let payload = ResumePayload::from_json(json)?;
        self.render(payload, format)
    }

    pub fn render(&self, payload: ResumePayload, format: OutputFormat) -> Result<RenderedDocument> {
        let (record, options) = payload.normalize();
        let style = ResolvedStyle::resolve(&options)?;

        let data = match format {
            OutputFormat::Docx => document::render(&record, &style),
            OutputFormat::Pdf => self.print.render(&record, &style),
        }
        .map_err(|e| {
            error!(code = e.code(), "{} generation failed: {}", format.extension(), e);
            e
        })?;

        let rendered = RenderedDocument::new(data, &record.personal.name, format);
        info!(
            "Generated {} ({} bytes)",
            rendered.filename,
            rendered.data.len()
        );
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    struct Stub;

    impl Rasterizer for Stub {
        fn rasterize(&self, html: &str) -> Result<Vec<u8>> {
            Ok(html.as_bytes().to_vec())
        }
    }

    fn renderer(dir: &tempfile::TempDir) -> ResumeRenderer {
        std::fs::write(dir.path().join("resume_template.html"), "<h1>{{name}}</h1>").unwrap();
        let config = RendererConfig {
            templates_path: dir.path().to_path_buf(),
            ..RendererConfig::default()
        };
        ResumeRenderer::with_rasterizer(&config, Box::new(Stub))
    }

    #[test]
    fn test_docx_download_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let doc = renderer(&dir)
            .render_json(r#"{"personal": {"name": " Jane  Doe "}}"#, OutputFormat::Docx)
            .unwrap();
        assert_eq!(doc.filename, "Jane_Doe.docx");
        assert!(doc.data.starts_with(b"PK"));
        assert_eq!(
            doc.content_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
    }

    #[test]
    fn test_pdf_goes_through_rasterizer() {
        let dir = tempfile::tempdir().unwrap();
        let doc = renderer(&dir)
            .render_json(r#"{"personal": {"name": "Ada"}}"#, OutputFormat::Pdf)
            .unwrap();
        assert_eq!(doc.filename, "Ada.pdf");
        assert_eq!(doc.data, b"<h1>Ada</h1>");
        assert_eq!(doc.content_type(), "application/pdf");
    }

    #[test]
    fn test_bad_style_fails_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = renderer(&dir);
        for format in [OutputFormat::Docx, OutputFormat::Pdf] {
            let err = renderer
                .render_json(r#"{"styleOptions": {"accentColor": "blue"}}"#, format)
                .unwrap_err();
            assert!(matches!(err, RenderError::Style(_)));
        }
    }

    #[test]
    fn test_invalid_json_is_payload_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = renderer(&dir)
            .render_json("[1, 2]", OutputFormat::Docx)
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PAYLOAD");
    }
}
