// src/types/cv_data.rs
//! Resume data model: the loosely-shaped wire payload and the normalized
//! record the renderers consume.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RenderError, Result};

pub const DEFAULT_FONT: &str = "Calibri";
pub const DEFAULT_FONT_SIZE: f32 = 11.0;
pub const DEFAULT_ACCENT: &str = "#34495e";
pub const LEGAL_STATUS_UNDISCLOSED: &str = "Prefer not to say";

// ===== Wire payload =====
// Every field may be missing or null; defaults are filled once in `normalize`.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePayload {
    pub personal: Option<PersonalPayload>,
    pub summary: Option<String>,
    pub experience: Option<Vec<ExperiencePayload>>,
    pub education: Option<Vec<EducationPayload>>,
    pub skills: Option<Vec<SkillPayload>>,
    pub projects: Option<Vec<ProjectPayload>>,
    pub publications: Option<Vec<PublicationPayload>>,
    pub certifications: Option<Vec<CertificationPayload>>,
    #[serde(alias = "organizationLogoBase64")]
    pub pamten_logo_base64: Option<String>,
    pub profile_pic_base64: Option<String>,
    pub style_options: Option<StyleOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub legal_status: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePayload {
    pub id: Option<Value>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPayload {
    pub id: Option<Value>,
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub graduation_year: Option<Value>,
    pub gpa: Option<Value>,
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillPayload {
    pub id: Option<Value>,
    pub category: Option<String>,
    pub skills_list: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPayload {
    pub id: Option<Value>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationPayload {
    pub id: Option<Value>,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationPayload {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub accent_color: Option<String>,
}

// ===== Normalized record =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeRecord {
    pub personal: Personal,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub publications: Vec<Publication>,
    pub certifications: Vec<Certification>,
    pub organization_logo: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Personal {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub legal_status: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
    pub gpa: Option<String>,
    pub achievements: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillGroup {
    pub id: String,
    pub category: String,
    pub skills_list: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub date: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Ids and years arrive as strings or numbers depending on the producer.
fn scalar(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

impl ResumePayload {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RenderError::from)
    }

    /// Split the payload into the normalized record and the style options.
    pub fn normalize(self) -> (ResumeRecord, StyleOptions) {
        let personal = self.personal.unwrap_or_default();

        let record = ResumeRecord {
            personal: Personal {
                name: text(personal.name),
                email: text(personal.email),
                phone: text(personal.phone),
                location: text(personal.location),
                legal_status: non_empty(personal.legal_status),
                job_title: non_empty(personal.job_title),
            },
            summary: text(self.summary),
            experience: self
                .experience
                .unwrap_or_default()
                .into_iter()
                .map(|e| Experience {
                    id: scalar(e.id),
                    job_title: text(e.job_title),
                    company: text(e.company),
                    dates: text(e.dates),
                    description: text(e.description),
                })
                .collect(),
            education: self
                .education
                .unwrap_or_default()
                .into_iter()
                .map(|e| Education {
                    id: scalar(e.id),
                    degree: text(e.degree),
                    institution: text(e.institution),
                    graduation_year: scalar(e.graduation_year),
                    gpa: Some(scalar(e.gpa)).filter(|g| !g.trim().is_empty()),
                    achievements: text(e.achievements),
                })
                .collect(),
            skills: self
                .skills
                .unwrap_or_default()
                .into_iter()
                .map(|s| SkillGroup {
                    id: scalar(s.id),
                    category: text(s.category),
                    skills_list: text(s.skills_list),
                })
                .collect(),
            projects: self
                .projects
                .unwrap_or_default()
                .into_iter()
                .map(|p| Project {
                    id: scalar(p.id),
                    title: text(p.title),
                    date: text(p.date),
                    description: text(p.description),
                })
                .collect(),
            publications: self
                .publications
                .unwrap_or_default()
                .into_iter()
                .map(|p| Publication {
                    id: scalar(p.id),
                    title: text(p.title),
                    authors: text(p.authors),
                    journal: text(p.journal),
                    date: text(p.date),
                    link: non_empty(p.link),
                })
                .collect(),
            certifications: self
                .certifications
                .unwrap_or_default()
                .into_iter()
                .map(|c| Certification {
                    id: scalar(c.id),
                    name: text(c.name),
                    issuer: text(c.issuer),
                    date: text(c.date),
                })
                .collect(),
            organization_logo: non_empty(self.pamten_logo_base64),
            profile_picture: non_empty(self.profile_pic_base64),
        };

        (record, self.style_options.unwrap_or_default())
    }
}

impl ResumeRecord {
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }

    pub fn has_experience(&self) -> bool {
        self.experience.iter().any(|e| !e.job_title.is_empty())
    }

    pub fn has_education(&self) -> bool {
        self.education.iter().any(|e| !e.degree.is_empty())
    }

    pub fn has_skills(&self) -> bool {
        self.skills
            .iter()
            .any(|s| !s.category.is_empty() && !s.skills_list.is_empty())
    }

    pub fn has_projects(&self) -> bool {
        self.projects.iter().any(|p| !p.title.is_empty())
    }

    pub fn has_publications(&self) -> bool {
        self.publications.iter().any(|p| !p.title.is_empty())
    }

    pub fn has_certifications(&self) -> bool {
        self.certifications.iter().any(|c| !c.name.is_empty())
    }

    /// Email, phone, location and a disclosed legal status joined by " | ".
    pub fn contact_line(&self) -> String {
        let p = &self.personal;
        let mut items = vec![p.email.as_str(), p.phone.as_str(), p.location.as_str()];
        if let Some(status) = p.legal_status.as_deref() {
            if status != LEGAL_STATUS_UNDISCLOSED {
                items.push(status);
            }
        }
        items
            .into_iter()
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

// ===== Style =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RenderError::Style(format!(
                "accent color must be a 6-digit hex RGB value, got '{}'",
                hex
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| RenderError::Style(format!("bad accent color '{}': {}", hex, e)))
        };
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase hex without the leading `#`.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Style options after defaults are applied and the accent color is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font_family: String,
    pub font_size: f32,
    pub accent: Rgb,
}

impl ResolvedStyle {
    pub fn resolve(options: &StyleOptions) -> Result<Self> {
        let font_family = options
            .font_family
            .as_deref()
            .and_then(|list| list.split(',').next())
            .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT.to_string());

        let font_size = options
            .font_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE);

        let accent = Rgb::parse(options.accent_color.as_deref().unwrap_or(DEFAULT_ACCENT))?;

        Ok(Self {
            font_family,
            font_size,
            accent,
        })
    }

    /// Size used for publication detail lines.
    pub fn small_size(&self) -> f32 {
        (self.font_size - 1.0).max(8.0)
    }
}
