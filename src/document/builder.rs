// src/document/builder.rs
//! Walks a resume record section by section and accumulates document blocks.

use tracing::debug;

use super::model::{
    Alignment, BaseStyle, Block, Document, HeadingStyle, Paragraph, Picture, RunStyle, TableCell,
};
use crate::error::Result;
use crate::image_validator::ImageValidator;
use crate::markup;
use crate::types::{ResolvedStyle, ResumeRecord};
use crate::utils::clean_text;

pub const HEADING_STYLE_ID: &str = "SectionHeading";
const HEADING_SIZE_PT: f32 = 14.0;
const NAME_SIZE_PT: f32 = 26.0;
const ENTRY_SPACING_PT: f32 = 12.0;
const SKILL_SPACING_PT: f32 = 6.0;

const LOGO_COLUMN_IN: f32 = 2.0;
const CENTER_COLUMN_IN: f32 = 4.5;
const PROFILE_COLUMN_IN: f32 = 2.0;
const LOGO_WIDTH_IN: f32 = 1.4;
const PROFILE_WIDTH_IN: f32 = 1.3;

pub struct DocumentBuilder<'a> {
    record: &'a ResumeRecord,
    style: &'a ResolvedStyle,
    base: BaseStyle,
    blocks: Vec<Block>,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(record: &'a ResumeRecord, style: &'a ResolvedStyle) -> Self {
        Self {
            record,
            style,
            base: BaseStyle {
                font_family: style.font_family.clone(),
                size_pt: style.font_size,
            },
            blocks: Vec::new(),
        }
    }

    pub fn build(mut self) -> Result<Document> {
        self.header()?;

        if self.record.has_summary() {
            self.summary();
        }
        if self.record.has_experience() {
            self.experience();
        }
        if self.record.has_education() {
            self.education();
        }
        if self.record.has_skills() {
            self.skills();
        }
        if self.record.has_projects() {
            self.projects();
        }
        if self.record.has_publications() {
            self.publications();
        }
        if self.record.has_certifications() {
            self.certifications();
        }

        debug!("Built document with {} blocks", self.blocks.len());

        Ok(Document {
            heading: HeadingStyle {
                id: HEADING_STYLE_ID,
                font_family: self.base.font_family.clone(),
                size_pt: HEADING_SIZE_PT,
                bold: true,
                color: self.style.accent,
                space_before_pt: 12.0,
                space_after_pt: 6.0,
            },
            base: self.base,
            blocks: self.blocks,
        })
    }

    fn header(&mut self) -> Result<()> {
        let mut logo = Paragraph::new().aligned(Alignment::Left);
        if let Some(encoded) = self.record.organization_logo.as_deref() {
            let image = ImageValidator::decode_embedded("organization_logo", encoded)?;
            logo.push_picture(Picture::new(image, LOGO_WIDTH_IN));
        }

        let mut name = Paragraph::new().aligned(Alignment::Center);
        name.push_text(
            self.record.personal.name.as_str(),
            RunStyle {
                bold: true,
                font: Some(self.base.font_family.clone()),
                ..RunStyle::default()
            }
            .sized(NAME_SIZE_PT)
            .colored(self.style.accent),
        );

        let mut contact = Paragraph::new().aligned(Alignment::Center);
        let contact_line = self.record.contact_line();
        if !contact_line.is_empty() {
            contact.push_text(contact_line, RunStyle::plain());
        }

        let mut profile = Paragraph::new().aligned(Alignment::Right);
        if let Some(encoded) = self.record.profile_picture.as_deref() {
            let image = ImageValidator::decode_embedded("profile_picture", encoded)?;
            profile.push_picture(Picture::new(image, PROFILE_WIDTH_IN));
        }

        self.blocks.push(Block::Table(vec![
            TableCell {
                width_in: LOGO_COLUMN_IN,
                paragraphs: vec![logo],
            },
            TableCell {
                width_in: CENTER_COLUMN_IN,
                paragraphs: vec![name, contact],
            },
            TableCell {
                width_in: PROFILE_COLUMN_IN,
                paragraphs: vec![profile],
            },
        ]));
        // spacer
        self.blocks.push(Block::Paragraph(Paragraph::new()));
        Ok(())
    }

    fn heading(&mut self, title: &str) {
        self.blocks.push(Block::Paragraph(Paragraph::heading(title)));
    }

    /// Emit an entry: the lead paragraph, any paragraphs the markup opened,
    /// and trailing spacing on the last of them.
    fn entry(&mut self, lead: Paragraph, markup: &str, spacing_pt: f32) {
        let mut paragraphs = vec![lead];
        markup::lower_into(&markup::parse(markup), &self.base, &mut paragraphs);
        if let Some(last) = paragraphs.last_mut() {
            last.space_after_pt = Some(spacing_pt);
        }
        self.blocks
            .extend(paragraphs.into_iter().map(Block::Paragraph));
    }

    fn summary(&mut self) {
        self.heading("Summary");
        let mut paragraphs = vec![Paragraph::new()];
        markup::lower_into(&markup::parse(&self.record.summary), &self.base, &mut paragraphs);
        self.blocks
            .extend(paragraphs.into_iter().map(Block::Paragraph));
    }

    fn experience(&mut self) {
        self.heading("Experience");
        let record = self.record;
        for exp in &record.experience {
            let mut p = Paragraph::new();
            p.push_text(exp.job_title.as_str(), RunStyle::bold());
            p.push_text(
                format!("\n{} | {}\n", exp.company, exp.dates),
                RunStyle::italic(),
            );
            self.entry(p, &exp.description, ENTRY_SPACING_PT);
        }
    }

    fn education(&mut self) {
        self.heading("Education");
        let record = self.record;
        for edu in &record.education {
            let mut p = Paragraph::new();
            p.push_text(edu.degree.as_str(), RunStyle::bold());
            p.push_text(format!(", {}\n", edu.institution), RunStyle::plain());
            let gpa = edu
                .gpa
                .as_deref()
                .map(|gpa| format!(" | GPA: {}", gpa))
                .unwrap_or_default();
            p.push_text(
                format!("{}{}\n", edu.graduation_year, gpa),
                RunStyle::italic(),
            );
            self.entry(p, &edu.achievements, ENTRY_SPACING_PT);
        }
    }

    fn skills(&mut self) {
        self.heading("Skills");
        let record = self.record;
        for skill in &record.skills {
            let mut p = Paragraph::new();
            p.push_text(format!("{}: ", skill.category), RunStyle::bold());
            p.push_text(clean_text(&skill.skills_list), RunStyle::plain());
            p.space_after_pt = Some(SKILL_SPACING_PT);
            self.blocks.push(Block::Paragraph(p));
        }
    }

    fn projects(&mut self) {
        self.heading("Projects");
        let record = self.record;
        for proj in &record.projects {
            let mut p = Paragraph::new();
            p.push_text(proj.title.as_str(), RunStyle::bold());
            p.push_text(format!(" ({})\n", proj.date), RunStyle::italic());
            self.entry(p, &proj.description, ENTRY_SPACING_PT);
        }
    }

    fn publications(&mut self) {
        self.heading("Publications");
        let record = self.record;
        let small = self.style.small_size();
        for publication in &record.publications {
            let mut p = Paragraph::new();
            p.push_text(publication.title.as_str(), RunStyle::bold());
            p.push_text(format!(" ({})\n", publication.date), RunStyle::italic());
            p.push_text(
                format!("{} - {}\n", publication.authors, publication.journal),
                RunStyle::plain().sized(small),
            );
            if let Some(link) = publication.link.as_deref() {
                p.push_text(format!("Link: {}", link), RunStyle::plain().sized(small));
            }
            p.space_after_pt = Some(ENTRY_SPACING_PT);
            self.blocks.push(Block::Paragraph(p));
        }
    }

    fn certifications(&mut self) {
        self.heading("Certifications");
        let record = self.record;
        for cert in &record.certifications {
            let mut p = Paragraph::new();
            p.push_text(cert.name.as_str(), RunStyle::bold());
            let mut issuer_date = cert.issuer.clone();
            if !cert.date.is_empty() {
                issuer_date.push_str(&format!(" | {}", cert.date));
            }
            p.push_text(format!("\n{}", issuer_date), RunStyle::italic());
            p.space_after_pt = Some(ENTRY_SPACING_PT);
            self.blocks.push(Block::Paragraph(p));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{Indent, Inline, BULLET_PREFIX};
    use crate::image_validator::tests::PIXEL_PNG;
    use crate::types::{ResumePayload, Rgb};

    fn build(json: &str) -> Result<Document> {
        let (record, options) = ResumePayload::from_json(json)?.normalize();
        let style = ResolvedStyle::resolve(&options)?;
        DocumentBuilder::new(&record, &style).build()
    }

    fn center_cell(doc: &Document) -> &TableCell {
        match &doc.blocks[0] {
            Block::Table(cells) => &cells[1],
            other => panic!("expected header table, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_record_has_header_only() {
        let doc = build(r#"{"personal": {"name": "Ada"}}"#).unwrap();
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[0], Block::Table(_)));
        assert!(doc.headings().is_empty());
    }

    #[test]
    fn test_section_without_presence_field_is_skipped() {
        let doc = build(
            r#"{"experience": [{"company": "Acme"}], "projects": [{"date": "2020"}],
                "certifications": [{"issuer": "AWS"}]}"#,
        )
        .unwrap();
        assert!(doc.headings().is_empty());
    }

    #[test]
    fn test_summary_paragraph_runs() {
        let doc = build(r#"{"summary": "<p>Built <strong>scalable</strong> systems.</p>"}"#)
            .unwrap();
        assert_eq!(doc.headings(), vec!["Summary"]);
        let body: Vec<&Paragraph> = doc.paragraphs().skip(2).collect();
        assert_eq!(body.len(), 1);
        let runs = body[0].runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, "Built ");
        assert!(runs[1].1.bold);
        assert_eq!(runs[2].0, " systems.");
    }

    #[test]
    fn test_summary_bullets() {
        let doc = build(
            r#"{"summary": "<ul><li>Led team of 5</li><li>Shipped <em>v2</em></li></ul>"}"#,
        )
        .unwrap();
        let body: Vec<&Paragraph> = doc.paragraphs().skip(2).collect();
        assert_eq!(body.len(), 2);
        assert!(body.iter().all(|p| p.indent == Some(Indent::BULLET)));
        let runs = body[1].runs();
        assert_eq!(runs[0].0, BULLET_PREFIX);
        assert_eq!((runs[1].0, runs[1].1.italic), ("Shipped ", false));
        assert_eq!((runs[2].0, runs[2].1.italic), ("v2", true));
    }

    #[test]
    fn test_header_name_and_contact() {
        let doc = build(
            r##"{"personal": {"name": "Ada Lovelace", "email": "a@b.com", "phone": "",
                "location": "NYC", "legalStatus": "Prefer not to say"},
                "styleOptions": {"accentColor": "2c3e50"}}"##,
        )
        .unwrap();
        let cell = center_cell(&doc);
        let name_runs = cell.paragraphs[0].runs();
        assert_eq!(name_runs[0].0, "Ada Lovelace");
        assert_eq!(name_runs[0].1.color, Some(Rgb(0x2c, 0x3e, 0x50)));
        assert_eq!(name_runs[0].1.size_pt, Some(26.0));
        assert!(name_runs[0].1.bold);
        assert_eq!(cell.paragraphs[1].text(), "a@b.com | NYC");
        assert_eq!(doc.heading.color.hex(), "2c3e50");
    }

    #[test]
    fn test_experience_entry_layout() {
        let doc = build(
            r#"{"experience": [
                {"jobTitle": "Engineer", "company": "Acme", "dates": "2020-2023",
                 "description": "<ul><li>Did things</li></ul>"},
                {"jobTitle": "Intern", "company": "Beta", "dates": "2019"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.headings(), vec!["Experience"]);
        let body: Vec<&Paragraph> = doc.paragraphs().skip(2).collect();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].text(), "Engineer\nAcme | 2020-2023\n");
        assert_eq!(body[0].space_after_pt, None);
        assert_eq!(body[1].text(), "•\tDid things");
        assert_eq!(body[1].space_after_pt, Some(12.0));
        assert_eq!(body[2].space_after_pt, Some(12.0));
    }

    #[test]
    fn test_education_with_gpa() {
        let doc = build(
            r#"{"education": [{"degree": "BSc", "institution": "MIT",
                "graduationYear": "2018", "gpa": "3.9"}]}"#,
        )
        .unwrap();
        let p = doc.paragraphs().nth(2).unwrap();
        assert_eq!(p.text(), "BSc, MIT\n2018 | GPA: 3.9\n");
        assert!(p.runs()[2].1.italic);
    }

    #[test]
    fn test_skills_are_cleaned_not_parsed() {
        let doc = build(
            r#"{"skills": [{"category": "Languages", "skills_list": "Python,  Go\n\nRust"}]}"#,
        )
        .unwrap();
        let p = doc.paragraphs().nth(2).unwrap();
        let runs = p.runs();
        assert_eq!(runs[0].0, "Languages: ");
        assert!(runs[0].1.bold);
        assert_eq!(runs[1].0, "Python, Go\nRust");
        assert_eq!(p.space_after_pt, Some(6.0));
    }

    #[test]
    fn test_publication_small_font_and_link() {
        let doc = build(
            r#"{"publications": [{"title": "Paper", "authors": "A, B", "journal": "J",
                "date": "2021", "link": "https://doi.org/x"}],
                "styleOptions": {"fontSize": 12}}"#,
        )
        .unwrap();
        let p = doc.paragraphs().nth(2).unwrap();
        let runs = p.runs();
        assert_eq!(runs[2].0, "A, B - J\n");
        assert_eq!(runs[2].1.size_pt, Some(11.0));
        assert_eq!(runs[3].0, "Link: https://doi.org/x");
    }

    #[test]
    fn test_certification_line() {
        let doc = build(r#"{"certifications": [{"name": "CKA", "issuer": "CNCF"}]}"#).unwrap();
        let p = doc.paragraphs().nth(2).unwrap();
        assert_eq!(p.text(), "CKA\nCNCF");
    }

    #[test]
    fn test_images_are_placed_at_fixed_widths() {
        let json = format!(
            r#"{{"pamtenLogoBase64": "data:image/png;base64,{0}", "profilePicBase64": "{0}"}}"#,
            PIXEL_PNG
        );
        let doc = build(&json).unwrap();
        let Block::Table(cells) = &doc.blocks[0] else {
            panic!("expected header table");
        };
        let widths: Vec<f32> = [&cells[0], &cells[2]]
            .iter()
            .map(|cell| match &cell.paragraphs[0].inlines[0] {
                Inline::Picture(picture) => picture.width_in,
                other => panic!("expected picture, got {:?}", other),
            })
            .collect();
        assert_eq!(widths, vec![1.4, 1.3]);
    }

    #[test]
    fn test_malformed_image_propagates() {
        let err = build(r#"{"profilePicBase64": "data:image/png;base64,%%%"}"#).unwrap_err();
        assert_eq!(err.code(), "IMAGE_INVALID_ENCODING");
    }

    #[test]
    fn test_build_is_deterministic() {
        let json = r#"{"summary": "<p>x <em>y</em></p>", "skills": [{"category": "c", "skills_list": "a"}]}"#;
        assert_eq!(build(json).unwrap(), build(json).unwrap());
    }
}
