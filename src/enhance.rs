// src/enhance.rs
//! Rewrite suggestions for a single resume section.

use tracing::{error, info};

use crate::extraction::TextGenerator;

const SKILLS_INSTRUCTION: &str = "Rewrite the following skills list to be more organized and impactful.\n\
     Maintain the categorization (e.g., \"Programming Languages:\"). Separate different categories or groups of skills with a newline character. \
     Do NOT use any HTML tags (like <p>, <ul>, <li>, <strong>, <em>).\n\
     Provide 3 different versions. Return each version on a new line.";

fn markup_instruction(section_name: &str) -> String {
    format!(
        "Rewrite the following {} to be more impactful, professional, and concise.\n\
         If the original text contains bullet points, format them as an unordered HTML list (`<ul><li>...</li><li>...</li></ul>`). \
         If the original text contains paragraphs, format them as HTML paragraphs (`<p>...</p>`). \
         If text should be bold or italic, use `<strong>` or `<em>` HTML tags. \
         Ensure nested structures are correctly represented in HTML.\n\
         Provide 3 different versions. Return each version on a new line.",
        section_name
    )
}

/// Skills are plain text with one group per line; every other section is
/// rewritten as markup.
pub fn enhance_prompt(section_name: &str, text: &str) -> String {
    let instruction = if section_name.eq_ignore_ascii_case("skills") {
        SKILLS_INSTRUCTION.to_string()
    } else {
        markup_instruction(section_name)
    };
    format!(
        "{}\n\nOriginal {}:\n{}\n\nEnhanced Versions:\n",
        instruction, section_name, text
    )
}

/// One suggestion per non-blank line of the reply. A failed generator or an
/// empty reply yields the original text as the only suggestion.
pub fn enhance_section(generator: &dyn TextGenerator, section_name: &str, text: &str) -> Vec<String> {
    let reply = match generator.generate(&enhance_prompt(section_name, text)) {
        Ok(reply) => reply,
        Err(e) => {
            error!("Enhancing section '{}' failed: {:#}", section_name, e);
            return vec![text.to_string()];
        }
    };

    let versions: Vec<String> = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if versions.is_empty() {
        return vec![text.to_string()];
    }
    info!(
        "Generated {} versions for section '{}'",
        versions.len(),
        section_name
    );
    versions
}
