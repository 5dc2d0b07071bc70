// src/extraction.rs
//! Turning raw resume text into a structured payload through a text model.

use anyhow::Result;
use tracing::{error, info};

use crate::types::ResumePayload;

/// Opaque text-generation collaborator (a hosted language model in
/// production, a canned reply in tests).
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

const RESUME_SCHEMA: &str = r#"{
  "personal": {"name": "", "email": "", "phone": "", "location": "", "legalStatus": ""},
  "summary": "",
  "experience": [
    {"id": "string", "jobTitle": "", "company": "", "dates": "", "description": ""}
  ],
  "education": [
    {"id": "string", "degree": "", "institution": "", "graduationYear": "", "gpa": "", "achievements": ""}
  ],
  "skills": [
    {"id": "string", "category": "", "skills_list": ""}
  ],
  "projects": [
    {"id": "string", "title": "", "date": "", "description": ""}
  ],
  "publications": [
    {"id": "string", "title": "", "authors": "", "journal": "", "date": "", "link": ""}
  ],
  "certifications": [
    {"id": "string", "name": "", "issuer": "", "date": ""}
  ]
}"#;

pub fn extraction_prompt(raw_text: &str) -> String {
    format!(
        r#"You are an expert resume parsing assistant. Analyze the following raw text extracted from a resume and convert it into a structured JSON object.
The JSON object must follow this exact schema.
Do not add any fields that are not in the schema. Do not enclose the JSON in markdown backticks.

For the 'summary', 'description', and 'achievements' fields, if the original text contains bullet points, format them as an unordered HTML list (`<ul><li>...</li><li>...</li></ul>`). If the original text contains paragraphs, format them as HTML paragraphs (`<p>...</p>`). If text is bold or italic, use `<strong>` or `<em>` HTML tags. Ensure nested structures are correctly represented in HTML.

For the 'skills' array:
- Identify distinct skill categories (e.g., "Programming Languages", "Tools", "Cloud Platforms", "Soft Skills", "Databases", "Operating Systems", "Frameworks", "Libraries").
- For each identified category, create a separate object within the 'skills' array.
- Populate the 'category' field with the inferred category name.
- Populate the 'skills_list' field with the relevant skills for that category. The 'skills_list' should be plain text, comma-separated. If skills were presented in subsections in the original resume, ensure a newline character (`\n`) separates each distinct group within the 'skills_list'. Do NOT use any HTML tags (`<p>`, `<ul>`, `<li>`, `<strong>`, `<em>`) for 'skills_list'.
- If skills are listed without explicit categories, group them under a general category like "Technical Skills" or "Key Skills".

If a section (like 'projects' or 'publications') is not present in the text, provide an empty list for that key.

**JSON Schema to follow:**
```json
{schema}
```

**Raw Resume Text to Parse:**
```
{raw_text}
```
"#,
        schema = RESUME_SCHEMA,
        raw_text = raw_text
    )
}

/// Payload with every section present and empty.
pub fn empty_payload() -> ResumePayload {
    ResumePayload {
        personal: Some(Default::default()),
        summary: Some(String::new()),
        experience: Some(Vec::new()),
        education: Some(Vec::new()),
        skills: Some(Vec::new()),
        projects: Some(Vec::new()),
        publications: Some(Vec::new()),
        certifications: Some(Vec::new()),
        ..ResumePayload::default()
    }
}

fn strip_code_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a model reply into a payload. Replies that are not valid JSON of
/// the right shape yield the empty payload.
pub fn parse_model_output(text: &str) -> ResumePayload {
    let cleaned = strip_code_fences(text);
    match ResumePayload::from_json(&cleaned) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Could not parse model output as a resume: {}", e);
            empty_payload()
        }
    }
}

/// Ask `generator` to structure `raw_text`. Generator failures are logged
/// and yield the empty payload, like unparsable replies.
pub fn structure_text(generator: &dyn TextGenerator, raw_text: &str) -> ResumePayload {
    match generator.generate(&extraction_prompt(raw_text)) {
        Ok(reply) => {
            info!("Received {} bytes of structured resume text", reply.len());
            parse_model_output(&reply)
        }
        Err(e) => {
            error!("Resume extraction failed: {:#}", e);
            empty_payload()
        }
    }
}
