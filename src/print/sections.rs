// src/print/sections.rs
//! Template variables for the print layout: escaped scalars, re-serialized
//! markup and one pre-rendered HTML block per resume section.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::markup;
use crate::types::{ResolvedStyle, ResumeRecord};
use crate::utils::clean_text;

fn esc(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Value placed inside the template's `<style>` block, where HTML entities
/// are not decoded: drop characters that could end the declaration or the
/// element, keep everything else (spaces included).
fn css_value(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '"' | '\\' | '<' | '>' | ';' | '{' | '}'))
        .collect()
}

fn rich(fragment: &str) -> String {
    markup::to_html(&markup::parse(fragment))
}

/// `<img>` for an embedded image field; the source passes through as sent.
fn image(src: Option<&str>, class: &str) -> String {
    match src {
        Some(src) => format!(r#"<img class="{}" src="{}" alt="">"#, class, esc(src)),
        None => String::new(),
    }
}

fn section(title: &str, body: &str) -> String {
    format!(
        "<section class=\"section\">\n<h2 class=\"section-heading\">{}</h2>\n{}</section>\n",
        esc(title),
        body
    )
}

pub fn variables(record: &ResumeRecord, style: &ResolvedStyle) -> HashMap<&'static str, String> {
    let personal = &record.personal;
    let mut vars = HashMap::new();

    vars.insert("font_family", css_value(&style.font_family));
    vars.insert("font_size", format!("{}pt", style.font_size));
    vars.insert("small_font_size", format!("{}pt", style.small_size()));
    vars.insert("accent_color", format!("#{}", style.accent.hex()));

    vars.insert("name", esc(&personal.name));
    vars.insert(
        "job_title",
        esc(personal.job_title.as_deref().unwrap_or_default()),
    );
    vars.insert("contact", esc(&record.contact_line()));
    vars.insert(
        "logo",
        image(record.organization_logo.as_deref(), "organization-logo"),
    );
    vars.insert(
        "profile_picture",
        image(record.profile_picture.as_deref(), "profile-picture"),
    );

    vars.insert("summary_section", summary(record));
    vars.insert("experience_section", experience(record));
    vars.insert("education_section", education(record));
    vars.insert("skills_section", skills(record));
    vars.insert("projects_section", projects(record));
    vars.insert("publications_section", publications(record));
    vars.insert("certifications_section", certifications(record));
    vars
}

fn summary(record: &ResumeRecord) -> String {
    if !record.has_summary() {
        return String::new();
    }
    section(
        "Summary",
        &format!("<div class=\"summary\">{}</div>\n", rich(&record.summary)),
    )
}

fn experience(record: &ResumeRecord) -> String {
    if !record.has_experience() {
        return String::new();
    }
    let mut body = String::new();
    for exp in &record.experience {
        let _ = writeln!(
            body,
            "<div class=\"entry\"><div class=\"entry-title\"><strong>{}</strong></div>\
             <div class=\"entry-meta\"><em>{} | {}</em></div>\
             <div class=\"entry-body\">{}</div></div>",
            esc(&exp.job_title),
            esc(&exp.company),
            esc(&exp.dates),
            rich(&exp.description)
        );
    }
    section("Experience", &body)
}

fn education(record: &ResumeRecord) -> String {
    if !record.has_education() {
        return String::new();
    }
    let mut body = String::new();
    for edu in &record.education {
        let gpa = edu
            .gpa
            .as_deref()
            .map(|gpa| format!(" | GPA: {}", esc(gpa)))
            .unwrap_or_default();
        let _ = writeln!(
            body,
            "<div class=\"entry\"><div class=\"entry-title\"><strong>{}</strong>, {}</div>\
             <div class=\"entry-meta\"><em>{}{}</em></div>\
             <div class=\"entry-body\">{}</div></div>",
            esc(&edu.degree),
            esc(&edu.institution),
            esc(&edu.graduation_year),
            gpa,
            rich(&edu.achievements)
        );
    }
    section("Education", &body)
}

fn skills(record: &ResumeRecord) -> String {
    if !record.has_skills() {
        return String::new();
    }
    let mut body = String::new();
    for skill in &record.skills {
        // Skill text is cleaned, never parsed as markup; line breaks survive.
        let lines: Vec<String> = clean_text(&skill.skills_list)
            .lines()
            .map(esc)
            .collect();
        let _ = writeln!(
            body,
            "<p class=\"skill\"><strong>{}:</strong> {}</p>",
            esc(&skill.category),
            lines.join("<br>")
        );
    }
    section("Skills", &body)
}

fn projects(record: &ResumeRecord) -> String {
    if !record.has_projects() {
        return String::new();
    }
    let mut body = String::new();
    for proj in &record.projects {
        let _ = writeln!(
            body,
            "<div class=\"entry\"><div class=\"entry-title\"><strong>{}</strong> <em>({})</em></div>\
             <div class=\"entry-body\">{}</div></div>",
            esc(&proj.title),
            esc(&proj.date),
            rich(&proj.description)
        );
    }
    section("Projects", &body)
}

fn publications(record: &ResumeRecord) -> String {
    if !record.has_publications() {
        return String::new();
    }
    let mut body = String::new();
    for publication in &record.publications {
        let link = publication
            .link
            .as_deref()
            .map(|link| format!("<div class=\"small\">Link: {}</div>", esc(link)))
            .unwrap_or_default();
        let _ = writeln!(
            body,
            "<div class=\"entry\"><div class=\"entry-title\"><strong>{}</strong> <em>({})</em></div>\
             <div class=\"small\">{} - {}</div>{}</div>",
            esc(&publication.title),
            esc(&publication.date),
            esc(&publication.authors),
            esc(&publication.journal),
            link
        );
    }
    section("Publications", &body)
}

fn certifications(record: &ResumeRecord) -> String {
    if !record.has_certifications() {
        return String::new();
    }
    let mut body = String::new();
    for cert in &record.certifications {
        let date = if cert.date.is_empty() {
            String::new()
        } else {
            format!(" | {}", esc(&cert.date))
        };
        let _ = writeln!(
            body,
            "<div class=\"entry\"><div class=\"entry-title\"><strong>{}</strong></div>\
             <div class=\"entry-meta\"><em>{}{}</em></div></div>",
            esc(&cert.name),
            esc(&cert.issuer),
            date
        );
    }
    section("Certifications", &body)
}
