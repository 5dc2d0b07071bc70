// src/markup/mod.rs
//! Restricted rich-text markup used in summary, description and achievement
//! fields.
//!
//! A fragment is parsed once into a small closed AST ([`Node`]); lowering to
//! paragraphs/runs ([`lower`]) and re-serialization to HTML ([`html`]) are
//! separate passes over that tree.

pub mod html;
pub mod lower;

use scraper::{ElementRef, Html};

use crate::utils::collapse_markup_whitespace;

pub use html::to_html;
pub use lower::lower_into;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Paragraph(Vec<Node>),
    List(Vec<Node>),
    ListItem(Vec<Node>),
    Bold(Vec<Node>),
    Italic(Vec<Node>),
    Link {
        href: Option<String>,
        children: Vec<Node>,
    },
    LineBreak,
    Text(String),
    /// Any tag outside the supported set; only its children are kept.
    Unknown {
        tag: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(children)
            | Node::List(children)
            | Node::ListItem(children)
            | Node::Bold(children)
            | Node::Italic(children)
            | Node::Link { children, .. }
            | Node::Unknown { children, .. } => children,
            Node::LineBreak | Node::Text(_) => &[],
        }
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::LineBreak => String::new(),
            other => other.children().iter().map(Node::text_content).collect(),
        }
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text(text) => out.push(text.trim()),
            other => other.children().iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// Parse a markup fragment. Empty input yields no nodes; malformed input
/// yields whatever the HTML5 parser recovers.
pub fn parse(fragment: &str) -> Vec<Node> {
    if fragment.trim().is_empty() {
        return Vec::new();
    }

    let normalized = collapse_markup_whitespace(fragment);
    let document = Html::parse_fragment(&normalized);
    convert_children(document.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<Node> {
    parent
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => Some(Node::Text(text.text.to_string())),
            scraper::Node::Element(_) => ElementRef::wrap(child).map(convert_element),
            _ => None,
        })
        .collect()
}

fn convert_element(element: ElementRef<'_>) -> Node {
    let name = element.value().name();
    if name == "br" {
        return Node::LineBreak;
    }

    let children = convert_children(element);
    match name {
        "p" => Node::Paragraph(children),
        "ul" => Node::List(children),
        "li" => Node::ListItem(children),
        "strong" => Node::Bold(children),
        "em" => Node::Italic(children),
        "a" => Node::Link {
            href: element.value().attr("href").map(str::to_string),
            children,
        },
        other => Node::Unknown {
            tag: other.to_string(),
            children,
        },
    }
}

/// Markup reduced to plain text, text nodes separated by single spaces.
pub fn plain_text(fragment: &str) -> String {
    let nodes = parse(fragment);
    let mut parts = Vec::new();
    for node in &nodes {
        node.collect_text(&mut parts);
    }
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
