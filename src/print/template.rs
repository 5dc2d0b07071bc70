// src/print/template.rs
//! `{{name}}` placeholder templates for the print layout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RenderError, Result};

#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    path: PathBuf,
    content: String,
}

impl HtmlTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RenderError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded template {} ({} bytes)", path.display(), content.len());
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, variables: &HashMap<&str, String>) -> String {
        process_variables(&self.content, variables)
    }
}

/// Replace every `{{key}}` in one left-to-right pass. Substituted values are
/// never rescanned, so user text that happens to contain `{{...}}` stays
/// literal. Unknown keys render as nothing.
pub fn process_variables(content: &str, variables: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = after[..end].trim();
        match variables.get(key) {
            Some(value) => out.push_str(value),
            None => warn!("Template placeholder '{}' has no value", key),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_substitution() {
        let out = process_variables(
            "<h1>{{name}}</h1><p>{{ contact }}</p>",
            &vars(&[("name", "Ada"), ("contact", "a@b.com")]),
        );
        assert_eq!(out, "<h1>Ada</h1><p>a@b.com</p>");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = process_variables(
            "{{summary}}|{{name}}",
            &vars(&[("summary", "{{name}}"), ("name", "Ada")]),
        );
        assert_eq!(out, "{{name}}|Ada");
    }

    #[test]
    fn test_unknown_key_and_unclosed_placeholder() {
        assert_eq!(process_variables("a{{missing}}b", &vars(&[])), "ab");
        assert_eq!(process_variables("a{{open", &vars(&[])), "a{{open");
    }

    #[test]
    fn test_load_missing_file_is_template_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HtmlTemplate::load(&dir.path().join("nope.html")).unwrap_err();
        assert_eq!(err.code(), "TEMPLATE_ERROR");
    }

    #[test]
    fn test_load_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.html");
        std::fs::write(&path, "<title>{{name}}</title>").unwrap();
        let template = HtmlTemplate::load(&path).unwrap();
        assert_eq!(template.path(), path.as_path());
        assert_eq!(
            template.render(&vars(&[("name", "Ada")])),
            "<title>Ada</title>"
        );
    }
}
