// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{RendererConfig, DEFAULT_CONFIG_FILE};
use crate::enhance::enhance_prompt;
use crate::extraction::parse_model_output;
use crate::generator::ResumeRenderer;
use crate::pitch::{pitch_context, pitch_prompt};
use crate::types::{OutputFormat, ResumePayload};

#[derive(Parser)]
#[command(name = "cv-renderer")]
#[command(about = "Render structured resumes to DOCX or PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a resume JSON file to DOCX
    Docx {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a resume JSON file to PDF through the HTML template
    Pdf {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the elevator pitch prompt for a resume JSON file
    PitchPrompt { input: PathBuf },
    /// Print the rewrite prompt for one section's text
    EnhancePrompt {
        /// Section name, e.g. "Summary" or "Skills"
        section: String,
        input: PathBuf,
    },
    /// Normalize a model's JSON reply into a resume payload
    ParseOutput { input: PathBuf },
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render(
    config: &RendererConfig,
    input: &Path,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let json = read_input(input)?;
    let document = ResumeRenderer::new(config)
        .render_json(&json, format)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    let output = output.unwrap_or_else(|| PathBuf::from(&document.filename));
    std::fs::write(&output, &document.data)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Wrote {} ({})", output.display(), document.content_type());
    Ok(output)
}

pub fn handle_command(command: Command, config: &RendererConfig) -> Result<()> {
    match command {
        Command::Docx { input, output } => {
            let path = render(config, &input, output, OutputFormat::Docx)?;
            println!("{}", path.display());
        }
        Command::Pdf { input, output } => {
            let path = render(config, &input, output, OutputFormat::Pdf)?;
            println!("{}", path.display());
        }
        Command::PitchPrompt { input } => {
            let payload = ResumePayload::from_json(&read_input(&input)?)
                .with_context(|| format!("Invalid resume JSON in {}", input.display()))?;
            let (record, _) = payload.normalize();
            println!("{}", pitch_prompt(&pitch_context(&record)));
        }
        Command::EnhancePrompt { section, input } => {
            println!("{}", enhance_prompt(&section, read_input(&input)?.trim()));
        }
        Command::ParseOutput { input } => {
            let payload = parse_model_output(&read_input(&input)?);
            let json = serde_json::to_string_pretty(&payload)
                .context("Failed to serialize parsed resume")?;
            println!("{}", json);
        }
    }
    Ok(())
}
