// src/types/mod.rs
pub mod cv_data;
pub mod response;

pub use cv_data::{ResolvedStyle, ResumePayload, ResumeRecord, Rgb, StyleOptions};
pub use response::{OutputFormat, RenderedDocument};
