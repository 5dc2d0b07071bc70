// src/print/rasterizer.rs
use std::process::Command;

use tracing::{debug, error, info};

use crate::config::RasterizerConfig;
use crate::error::{RenderError, Result};

const INPUT_FILE: &str = "resume.html";
const OUTPUT_FILE: &str = "resume.pdf";

/// Turns a complete HTML document into PDF bytes.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, html: &str) -> Result<Vec<u8>>;
}

/// Runs an external HTML to PDF program inside a scratch directory.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
    args: Vec<String>,
}

impl CommandRasterizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &RasterizerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

impl Default for CommandRasterizer {
    fn default() -> Self {
        Self::from_config(&RasterizerConfig::default())
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, html: &str) -> Result<Vec<u8>> {
        let workdir = tempfile::tempdir()
            .map_err(|e| RenderError::Rasterize(format!("Cannot create work directory: {}", e)))?;
        let input = workdir.path().join(INPUT_FILE);
        let output = workdir.path().join(OUTPUT_FILE);

        std::fs::write(&input, html)
            .map_err(|e| RenderError::Rasterize(format!("Cannot write HTML input: {}", e)))?;

        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input.to_string_lossy())
                    .replace("{output}", &output.to_string_lossy())
            })
            .collect();

        debug!("Running {} {:?}", self.program, args);
        let result = Command::new(&self.program)
            .args(&args)
            .current_dir(workdir.path())
            .output()
            .map_err(|e| {
                error!("Failed to execute {}: {}", self.program, e);
                RenderError::Rasterize(format!("Failed to execute {}: {}", self.program, e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            error!("{} failed ({}): {}", self.program, result.status, stderr.trim());
            return Err(RenderError::Rasterize(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        let pdf = std::fs::read(&output).map_err(|e| {
            RenderError::Rasterize(format!("{} produced no output: {}", self.program, e))
        })?;
        if pdf.is_empty() {
            return Err(RenderError::Rasterize(format!(
                "{} produced an empty file",
                self.program
            )));
        }

        info!("Rasterized {} bytes of HTML into {} bytes of PDF", html.len(), pdf.len());
        Ok(pdf)
    }
}
