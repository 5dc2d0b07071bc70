// src/pitch.rs
//! Elevator pitch generation from a resume record.

use tracing::{error, info};

use crate::extraction::TextGenerator;
use crate::markup::plain_text;
use crate::types::ResumeRecord;

pub const PITCH_FALLBACK: &str = "Could not generate elevator pitch at this time.";

/// Plain-text context for the pitch prompt. Markup fields are reduced to
/// their text; empty sections are left out.
pub fn pitch_context(record: &ResumeRecord) -> String {
    let mut parts = Vec::new();
    let personal = &record.personal;

    if !personal.name.is_empty() {
        parts.push(format!("Name: {}", personal.name));
    }
    if let Some(title) = personal.job_title.as_deref() {
        parts.push(format!("Current Role: {}", title));
    }
    if record.has_summary() {
        parts.push(format!("Summary: {}", plain_text(&record.summary)));
    }

    if !record.experience.is_empty() {
        let lines: Vec<String> = record
            .experience
            .iter()
            .map(|exp| {
                format!(
                    "- {} at {} ({}). Description: {}",
                    exp.job_title,
                    exp.company,
                    exp.dates,
                    plain_text(&exp.description)
                )
            })
            .collect();
        parts.push(format!("Experience:\n{}", lines.join("\n")));
    }

    if !record.skills.is_empty() {
        let lines: Vec<String> = record
            .skills
            .iter()
            .filter(|skill| !skill.skills_list.is_empty())
            .map(|skill| {
                if skill.category.is_empty() {
                    format!("- {}", skill.skills_list)
                } else {
                    format!("- {}: {}", skill.category, skill.skills_list)
                }
            })
            .collect();
        parts.push(format!("Skills:\n{}", lines.join("\n")));
    }

    if !record.projects.is_empty() {
        let lines: Vec<String> = record
            .projects
            .iter()
            .map(|proj| {
                format!(
                    "- {} ({}). Description: {}",
                    proj.title,
                    proj.date,
                    plain_text(&proj.description)
                )
            })
            .collect();
        parts.push(format!("Projects:\n{}", lines.join("\n")));
    }

    if !record.education.is_empty() {
        let lines: Vec<String> = record
            .education
            .iter()
            .map(|edu| {
                format!(
                    "- {} from {} ({}). Achievements: {}",
                    edu.degree,
                    edu.institution,
                    edu.graduation_year,
                    plain_text(&edu.achievements)
                )
            })
            .collect();
        parts.push(format!("Education:\n{}", lines.join("\n")));
    }

    parts.join("\n\n")
}

pub fn pitch_prompt(context: &str) -> String {
    format!(
        "Based on the following resume data, generate a compelling and concise 30-second elevator pitch.\n\
         The pitch should be professional, engaging, and highlight the candidate's key strengths, experiences, and career goals.\n\
         Focus on what makes the candidate unique and valuable.\n\
         Keep it under 100 words.\n\n\
         Resume Details:\n---\n{}\n---\n\nElevator Pitch:\n",
        context
    )
}

/// Generate the pitch, falling back to a fixed sentence when the generator
/// fails.
pub fn generate_elevator_pitch(generator: &dyn TextGenerator, record: &ResumeRecord) -> String {
    let prompt = pitch_prompt(&pitch_context(record));
    match generator.generate(&prompt) {
        Ok(pitch) => {
            info!("Generated elevator pitch ({} chars)", pitch.len());
            pitch.trim().to_string()
        }
        Err(e) => {
            error!("Elevator pitch generation failed: {:#}", e);
            PITCH_FALLBACK.to_string()
        }
    }
}
