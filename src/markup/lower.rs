// src/markup/lower.rs
//! Lowering of the markup AST into the document paragraph/run model.

use super::Node;
use crate::document::model::{BaseStyle, Indent, Paragraph, RunStyle, BULLET_PREFIX};

/// Append `nodes` to `paragraphs`, flowing into the last paragraph (the
/// caller's current paragraph) and opening new ones for list items and
/// paragraphs that do not fit into it.
pub fn lower_into(nodes: &[Node], base: &BaseStyle, paragraphs: &mut Vec<Paragraph>) {
    if nodes.is_empty() {
        return;
    }
    if paragraphs.is_empty() {
        paragraphs.push(Paragraph::new());
    }

    // Top-level content after a list must not flow into its last bullet.
    let mut after_list = false;
    for node in nodes {
        match node {
            Node::List(children) => {
                let mut items = Vec::new();
                collect_items(children, &mut items);
                for item in items {
                    let paragraph = open_paragraph(paragraphs);
                    paragraph.indent = Some(Indent::BULLET);
                    paragraph.push_text(BULLET_PREFIX, RunStyle::plain());
                    let content: Vec<&Node> = item
                        .iter()
                        .filter(|n| !matches!(n, Node::List(_)))
                        .collect();
                    for child in content {
                        lower_inline(child, paragraph);
                    }
                }
                after_list = true;
            }
            Node::Paragraph(children) => {
                let paragraph = open_paragraph(paragraphs);
                children.iter().for_each(|c| lower_inline(c, paragraph));
                after_list = false;
            }
            Node::Text(text) => {
                let text = flatten_newlines(text.trim());
                if !text.is_empty() {
                    flow_target(paragraphs, &mut after_list)
                        .push_text(text, RunStyle::base(base));
                }
            }
            other => lower_inline(other, flow_target(paragraphs, &mut after_list)),
        }
    }
}

/// Paragraph receiving top-level inline content: the current one, or a
/// fresh one when a list was just emitted.
fn flow_target<'p>(paragraphs: &'p mut Vec<Paragraph>, after_list: &mut bool) -> &'p mut Paragraph {
    if std::mem::take(after_list) {
        paragraphs.push(Paragraph::new());
    }
    current(paragraphs)
}

fn current(paragraphs: &mut [Paragraph]) -> &mut Paragraph {
    let last = paragraphs.len() - 1;
    &mut paragraphs[last]
}

/// The current paragraph when it is still empty, otherwise a fresh one.
fn open_paragraph(paragraphs: &mut Vec<Paragraph>) -> &mut Paragraph {
    if paragraphs.last().is_some_and(|p| !p.is_empty()) {
        paragraphs.push(Paragraph::new());
    }
    current(paragraphs)
}

/// Every `<li>` below `nodes` in document order, nested lists included.
fn collect_items<'a>(nodes: &'a [Node], items: &mut Vec<&'a [Node]>) {
    for node in nodes {
        if let Node::ListItem(children) = node {
            items.push(children);
        }
        collect_items(node.children(), items);
    }
}

fn lower_inline(node: &Node, paragraph: &mut Paragraph) {
    match node {
        Node::Bold(_) => push_non_empty(paragraph, node.text_content(), RunStyle::bold()),
        Node::Italic(_) => push_non_empty(paragraph, node.text_content(), RunStyle::italic()),
        // DOCX keeps only the link text.
        Node::Link { .. } => push_non_empty(paragraph, node.text_content(), RunStyle::hyperlink()),
        Node::LineBreak => paragraph.push_break(),
        Node::Text(text) => {
            if !text.trim().is_empty() {
                paragraph.push_text(flatten_newlines(text), RunStyle::plain());
            }
        }
        other => other
            .children()
            .iter()
            .for_each(|child| lower_inline(child, paragraph)),
    }
}

fn push_non_empty(paragraph: &mut Paragraph, text: String, style: RunStyle) {
    let text = flatten_newlines(&text);
    if !text.trim().is_empty() {
        paragraph.push_text(text, style);
    }
}

/// Source newlines are whitespace in markup; only `<br>` breaks a line.
fn flatten_newlines(text: &str) -> String {
    text.replace(['\r', '\n', '\t'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{Inline, HYPERLINK_COLOR};
    use crate::markup::parse;

    fn base() -> BaseStyle {
        BaseStyle {
            font_family: "Calibri".to_string(),
            size_pt: 11.0,
        }
    }

    fn lower(fragment: &str) -> Vec<Paragraph> {
        let mut paragraphs = vec![Paragraph::new()];
        lower_into(&parse(fragment), &base(), &mut paragraphs);
        paragraphs
    }

    #[test]
    fn test_paragraph_with_bold_run() {
        let paragraphs = lower("<p>Built <strong>scalable</strong> systems.</p>");
        assert_eq!(paragraphs.len(), 1);
        let runs = paragraphs[0].runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, "Built ");
        assert_eq!(*runs[0].1, RunStyle::plain());
        assert_eq!(runs[1].0, "scalable");
        assert!(runs[1].1.bold);
        assert_eq!(runs[2].0, " systems.");
        assert_eq!(*runs[2].1, RunStyle::plain());
    }

    #[test]
    fn test_bullet_list() {
        let paragraphs = lower("<ul><li>Led team of 5</li><li>Shipped <em>v2</em></li></ul>");
        assert_eq!(paragraphs.len(), 2);
        for p in &paragraphs {
            assert_eq!(p.indent, Some(Indent::BULLET));
            assert_eq!(p.runs()[0].0, BULLET_PREFIX);
        }
        assert_eq!(paragraphs[0].text(), "•\tLed team of 5");

        let runs = paragraphs[1].runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].0, "Shipped ");
        assert!(!runs[1].1.italic);
        assert_eq!(runs[2].0, "v2");
        assert!(runs[2].1.italic);
    }

    #[test]
    fn test_bullet_indent_values() {
        assert_eq!(Indent::BULLET.left_pt, 36.0);
        assert_eq!(Indent::BULLET.first_line_pt, -18.0);
    }

    #[test]
    fn test_list_after_existing_text_starts_new_paragraph() {
        let mut paragraphs = vec![Paragraph::new()];
        paragraphs[0].push_text("Engineer", RunStyle::bold());
        lower_into(&parse("<ul><li>One</li></ul>"), &base(), &mut paragraphs);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "Engineer");
        assert_eq!(paragraphs[1].text(), "•\tOne");
    }

    #[test]
    fn test_nested_list_items_get_own_bullets() {
        let paragraphs = lower("<ul><li>Outer<ul><li>Inner</li></ul></li><li>Last</li></ul>");
        let texts: Vec<String> = paragraphs.iter().map(Paragraph::text).collect();
        assert_eq!(texts, vec!["•\tOuter", "•\tInner", "•\tLast"]);
    }

    #[test]
    fn test_second_paragraph_opens_new_block() {
        let paragraphs = lower("<p>First</p><p>Second</p>");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text(), "First");
        assert_eq!(paragraphs[1].text(), "Second");
        assert_eq!(paragraphs[1].indent, None);
    }

    #[test]
    fn test_bare_text_is_trimmed_with_base_font() {
        let paragraphs = lower("  loose text  ");
        let runs = paragraphs[0].runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].0, "loose text");
        assert_eq!(runs[0].1.font.as_deref(), Some("Calibri"));
        assert_eq!(runs[0].1.size_pt, Some(11.0));
    }

    #[test]
    fn test_line_break_stays_in_paragraph() {
        let paragraphs = lower("<p>one<br>two</p>");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "one\ntwo");
        assert_eq!(paragraphs[0].inlines[1], Inline::LineBreak);
    }

    #[test]
    fn test_link_drops_href() {
        let paragraphs = lower(r#"<p>See <a href="https://x.dev">my site</a></p>"#);
        let runs = paragraphs[0].runs();
        assert_eq!(runs[1].0, "my site");
        assert!(runs[1].1.underline);
        assert_eq!(runs[1].1.color, Some(HYPERLINK_COLOR));
        assert!(!paragraphs[0].text().contains("x.dev"));
    }

    #[test]
    fn test_top_level_inline_elements_keep_formatting() {
        let paragraphs = lower("<strong>Bold</strong><em>It</em>");
        let runs = paragraphs[0].runs();
        assert!(runs[0].1.bold);
        assert!(runs[1].1.italic);
    }

    #[test]
    fn test_unknown_tags_fall_through() {
        let paragraphs = lower("<div><span>inside <strong>x</strong></span></div>");
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(), "inside x");
    }

    #[test]
    fn test_empty_fragment_is_noop() {
        let mut paragraphs = Vec::new();
        lower_into(&parse(""), &base(), &mut paragraphs);
        assert!(paragraphs.is_empty());
    }

    #[test]
    fn test_text_after_list_opens_plain_paragraph() {
        let paragraphs = lower("<ul><li>Led team</li></ul>Trailing note");
        let texts: Vec<String> = paragraphs.iter().map(Paragraph::text).collect();
        assert_eq!(texts, vec!["•\tLed team", "Trailing note"]);
        assert_eq!(paragraphs[0].indent, Some(Indent::BULLET));
        assert_eq!(paragraphs[1].indent, None);

        let paragraphs = lower("<ul><li>A</li></ul><strong>B</strong>");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1].runs()[0].0, "B");
        assert!(paragraphs[1].runs()[0].1.bold);
    }

    #[test]
    fn test_break_after_list_does_not_touch_bullet() {
        let paragraphs = lower("<ul><li>One</li></ul><br>after");
        assert_eq!(paragraphs[0].text(), "•\tOne");
        assert_eq!(paragraphs[1].text(), "\nafter");
        assert_eq!(paragraphs[1].indent, None);
    }
}
