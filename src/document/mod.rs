// src/document/mod.rs
//! Document-structure renderer: record -> block model -> DOCX bytes.

pub mod builder;
pub mod docx;
pub mod model;

pub use builder::DocumentBuilder;
pub use model::Document;

use tracing::info_span;

use crate::error::Result;
use crate::types::{ResolvedStyle, ResumeRecord};

/// Build the document model for `record` and package it as DOCX.
pub fn render(record: &ResumeRecord, style: &ResolvedStyle) -> Result<Vec<u8>> {
    let span = info_span!(
        "docx_render",
        candidate = %record.personal.name,
        experience = record.experience.len(),
        education = record.education.len(),
    );
    let _guard = span.enter();

    let document = DocumentBuilder::new(record, style).build()?;
    docx::write(&document)
}
