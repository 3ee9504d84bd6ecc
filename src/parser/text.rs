//! Markup to text-line normalization.

use scraper::{Html, Node};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract the visible text of a page as trimmed, non-empty lines.
pub fn html_to_lines(markup: &str) -> Vec<String> {
    let document = Html::parse_document(markup);
    let mut text = String::with_capacity(markup.len() / 2);

    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(fragment);
    }

    normalized_lines(&text)
}

/// Split text on line boundaries, trim every line and drop the empty ones.
pub fn normalized_lines(text: &str) -> Vec<String> {
    text.split(is_line_boundary)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
