// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::utils::safe_filename_base;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Docx,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A finished document ready to be handed back to the caller.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub data: Vec<u8>,
    pub filename: String,
    pub format: OutputFormat,
}

impl RenderedDocument {
    pub fn new(data: Vec<u8>, candidate_name: &str, format: OutputFormat) -> Self {
        Self {
            data,
            filename: format!("{}.{}", safe_filename_base(candidate_name), format.extension()),
            format,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_candidate_name() {
        let doc = RenderedDocument::new(vec![1, 2], "  Jane   Doe ", OutputFormat::Docx);
        assert_eq!(doc.filename, "Jane_Doe.docx");
        assert_eq!(
            doc.content_disposition(),
            "attachment; filename=\"Jane_Doe.docx\""
        );
    }

    #[test]
    fn test_filename_fallback() {
        let doc = RenderedDocument::new(Vec::new(), "", OutputFormat::Pdf);
        assert_eq!(doc.filename, "resume.pdf");
        assert_eq!(doc.content_type(), "application/pdf");
    }
}
