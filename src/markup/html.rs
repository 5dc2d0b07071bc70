// src/markup/html.rs
//! Re-serialization of the markup AST to HTML for the print template.
//! Only the supported tag set survives; text and attributes are escaped.

use super::Node;

const SAFE_SCHEMES: [&str; 4] = ["http://", "https://", "mailto:", "tel:"];

pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Paragraph(children) => wrap("p", children, out),
        Node::List(children) => wrap("ul", children, out),
        Node::ListItem(children) => wrap("li", children, out),
        Node::Bold(children) => wrap("strong", children, out),
        Node::Italic(children) => wrap("em", children, out),
        Node::Link { href, children } => {
            match href.as_deref().filter(|h| is_safe_href(h)) {
                Some(href) => {
                    out.push_str("<a href=\"");
                    out.push_str(&ammonia::clean_text(href));
                    out.push_str("\">");
                }
                None => out.push_str("<a>"),
            }
            children.iter().for_each(|c| write_node(c, out));
            out.push_str("</a>");
        }
        Node::LineBreak => out.push_str("<br>"),
        Node::Text(text) => out.push_str(&ammonia::clean_text(text)),
        Node::Unknown { children, .. } => children.iter().for_each(|c| write_node(c, out)),
    }
}

fn wrap(tag: &str, children: &[Node], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    children.iter().for_each(|c| write_node(c, out));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn is_safe_href(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    SAFE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}
