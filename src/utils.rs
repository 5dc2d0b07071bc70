// src/utils.rs

/// Normalize plain-text skill lists: collapse spaces/tabs, drop blank lines,
/// trim every line.
pub fn clean_text(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_blank = false;
    let mut newlines = 0usize;

    for c in text.chars() {
        match c {
            ' ' | '\t' => {
                if !in_blank {
                    collapsed.push(' ');
                    in_blank = true;
                }
            }
            '\n' => {
                in_blank = false;
                newlines += 1;
                if newlines == 1 {
                    collapsed.push('\n');
                }
                continue;
            }
            _ => {
                in_blank = false;
                collapsed.push(c);
            }
        }
        newlines = 0;
    }

    collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Normalize whitespace in a markup fragment before parsing so the parser
/// does not produce whitespace-only text nodes between tags.
pub fn collapse_markup_whitespace(html: &str) -> String {
    let chars: Vec<char> = html.chars().collect();
    let mut out = String::with_capacity(html.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            let start = i;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            let run = &chars[start..i];

            let between_tags = out.ends_with('>') && chars.get(i) == Some(&'<');
            if between_tags {
                continue;
            }

            if run.len() >= 2 {
                out.push(' ');
            } else {
                out.push(run[0]);
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

/// Base of a download filename derived from the candidate's name.
pub fn safe_filename_base(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.is_empty() {
        "resume".to_string()
    } else {
        parts.join("_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_skills_list() {
        assert_eq!(clean_text("Python,  Go\n\nRust"), "Python, Go\nRust");
        assert_eq!(clean_text("  a\t\tb  \n  c  "), "a b\nc");
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("\n\n\nx\n\n"), "x");
    }

    #[test]
    fn test_collapse_markup_whitespace() {
        assert_eq!(
            collapse_markup_whitespace("<ul>\n  <li>A</li>\n  <li>B</li>\n</ul>"),
            "<ul><li>A</li><li>B</li></ul>"
        );
        assert_eq!(
            collapse_markup_whitespace("<p>Built   <strong>x</strong></p>"),
            "<p>Built <strong>x</strong></p>"
        );
        assert_eq!(collapse_markup_whitespace("a b"), "a b");
        assert_eq!(collapse_markup_whitespace("a\nb"), "a\nb");
    }

    #[test]
    fn test_safe_filename_base() {
        assert_eq!(safe_filename_base("Jane  Q Doe"), "Jane_Q_Doe");
        assert_eq!(safe_filename_base("   "), "resume");
        assert_eq!(safe_filename_base(""), "resume");
    }
}
