//! # pagelift-html: Page Text Normalization
//!
//! This crate reduces raw, fully-rendered HTML to the plain text that is worth
//! showing to a language model. It drops boilerplate subtrees (navigation,
//! headers, footers, scripts, styles) and concatenates the remaining visible
//! text with blank lines as block separators.
//!
//! Normalization is best-effort and never fails: malformed markup is parsed
//! leniently and whatever text can be recovered is returned.

use regex::Regex;
use scraper::node::Node;
use scraper::Html;

/// Tags whose entire subtree is excluded from the normalized output.
pub const DEFAULT_EXCLUDED_TAGS: &[&str] = &[
    "head", "header", "nav", "footer", "script", "style", "noscript",
];

/// Strips boilerplate markup from `html` and returns the visible plain text.
///
/// Blocks of text are separated by blank lines, mirroring how the page breaks
/// its content visually. Surrounding whitespace is trimmed.
pub fn normalize(html: &str) -> String {
    normalize_with_tags(html, DEFAULT_EXCLUDED_TAGS)
}

/// Like [`normalize`], but with a caller-supplied list of excluded tags.
pub fn normalize_with_tags(html: &str, excluded_tags: &[&str]) -> String {
    let document = Html::parse_document(html);

    let mut blocks: Vec<String> = Vec::new();
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(element) => {
                if excluded_tags
                    .iter()
                    .any(|tag| tag.eq_ignore_ascii_case(element.name()))
                {
                    continue;
                }
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    blocks.push(trimmed.to_string());
                }
            }
            _ => {}
        }
        // Children are pushed in reverse so the stack walks them in
        // document order.
        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }

    collapse_blank_runs(&blocks.join("\n\n"))
}

/// Collapse runs of three or more newlines down to a single blank line.
fn collapse_blank_runs(text: &str) -> String {
    let blanks = match Regex::new(r"\n{3,}") {
        Ok(re) => re,
        Err(_) => return text.trim().to_string(),
    };
    blanks.replace_all(text.trim(), "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
            <head>
                <title>Shop</title>
                <style>body { color: red; }</style>
                <script>track();</script>
            </head>
            <body>
                <header><h1>MegaShop</h1></header>
                <nav><a href="/deals">Deals</a></nav>
                <main>
                    <h2>Blue Suede Shoes</h2>
                    <p>Classic footwear, now in stock.</p>
                </main>
                <footer>Copyright MegaShop</footer>
            </body>
        </html>
    "#;

    #[test]
    fn strips_boilerplate_tags() {
        let text = normalize(PAGE);
        assert!(text.contains("Blue Suede Shoes"));
        assert!(text.contains("Classic footwear, now in stock."));
        assert!(!text.contains("MegaShop"));
        assert!(!text.contains("Deals"));
        assert!(!text.contains("track()"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn separates_blocks_with_blank_lines() {
        let text = normalize(PAGE);
        assert_eq!(text, "Blue Suede Shoes\n\nClassic footwear, now in stock.");
    }

    #[test]
    fn custom_tag_list_overrides_default() {
        let text = normalize_with_tags("<main><p>keep</p><aside>drop</aside></main>", &["aside"]);
        assert!(text.contains("keep"));
        assert!(!text.contains("drop"));
    }

    #[test]
    fn malformed_input_is_best_effort() {
        let text = normalize("<p>unclosed <b>bold text");
        assert!(text.contains("unclosed"));
        assert!(text.contains("bold text"));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }
}
