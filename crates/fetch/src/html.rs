use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements dropped by the plain-text fallback.
pub const FALLBACK_STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "noscript"];

/// Page furniture that never counts as readable content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "form", "iframe", "svg",
    "button", "template",
];

/// Candidate containers for the main content, most specific first.
const CONTENT_ROOTS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "#content",
    "#main-content",
    ".post-content",
    ".entry-content",
    ".article-body",
];

const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote", "pre", "td"];

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e:?}"))
}

fn has_ancestor_in(node: ElementRef<'_>, root: ElementRef<'_>, tags: &[&str]) -> bool {
    node.ancestors()
        .take_while(|a| a.id() != root.id())
        .filter_map(|a| a.value().as_element())
        .any(|e| tags.contains(&e.name()))
}

/// Concatenated text under `root`, skipping any subtree rooted at one of `skip`.
fn visible_text(root: ElementRef<'_>, skip: &[&str]) -> String {
    let mut out = String::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|a| a.id() != root.id())
            .filter_map(|a| a.value().as_element())
            .any(|e| skip.contains(&e.name()));
        if hidden {
            continue;
        }
        out.push_str(text);
        out.push(' ');
    }
    out
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Readable article text: the block-level elements of the main content
/// container, one paragraph each, with navigation and other furniture removed.
pub fn readable_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let root = content_root(&document)?;
    let blocks = selector(&BLOCK_TAGS.join(", "))?;

    let mut paragraphs = Vec::new();
    for block in root.select(&blocks) {
        // Nested blocks (a <p> inside an <li>) are covered by their outermost block.
        if has_ancestor_in(block, root, BOILERPLATE_TAGS) || has_ancestor_in(block, root, BLOCK_TAGS) {
            continue;
        }
        let text = collapse_whitespace(&visible_text(block, BOILERPLATE_TAGS));
        if !text.is_empty() {
            paragraphs.push(text);
        }
    }

    if paragraphs.is_empty() {
        return Ok(collapse_whitespace(&visible_text(root, BOILERPLATE_TAGS)));
    }
    Ok(paragraphs.join("\n\n"))
}

fn content_root(document: &Html) -> Result<ElementRef<'_>> {
    for css in CONTENT_ROOTS {
        let sel = selector(css)?;
        let found = document
            .select(&sel)
            .find(|el| !visible_text(*el, BOILERPLATE_TAGS).trim().is_empty());
        if let Some(el) = found {
            return Ok(el);
        }
    }

    let body = selector("body")?;
    Ok(document.select(&body).next().unwrap_or_else(|| document.root_element()))
}

/// Whole-page text with `strip` elements removed, whitespace collapsed and
/// the result capped at `max_chars`.
pub fn plain_text(html: &str, strip: &[&str], max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let text = collapse_whitespace(&visible_text(document.root_element(), strip));
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head><title>Soil</title><style>p { color: red; }</style></head>
          <body>
            <header><a href="/">Home</a></header>
            <nav><ul><li>Menu item</li></ul></nav>
            <article>
              <h1>Cover crops</h1>
              <p>Cover crops   protect
                 the soil.</p>
              <ul><li><p>Rye</p></li></ul>
              <aside><p>Advertisement</p></aside>
            </article>
            <footer>Copyright</footer>
            <script>var x = 1;</script>
          </body>
        </html>"#;

    #[test]
    fn test_readable_text_keeps_article_blocks() {
        let text = readable_text(PAGE).unwrap();

        assert_eq!(text, "Cover crops\n\nCover crops protect the soil.\n\nRye");
    }

    #[test]
    fn test_readable_text_without_blocks_uses_container_text() {
        let html = "<html><body><main><div>Only   loose text</div></main></body></html>";

        assert_eq!(readable_text(html).unwrap(), "Only loose text");
    }

    #[test]
    fn test_plain_text_strips_furniture() {
        let text = plain_text(PAGE, FALLBACK_STRIP_TAGS, 10_000);

        assert!(text.contains("Cover crops protect the soil."));
        assert!(!text.contains("Menu item"));
        assert!(!text.contains("Home"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_plain_text_truncates_on_char_boundary() {
        let html = "<html><body><p>héllo wörld</p></body></html>";

        assert_eq!(plain_text(html, FALLBACK_STRIP_TAGS, 4), "héll");
    }

    #[test]
    fn test_plain_text_shorter_than_cap_is_untouched() {
        let html = "<html><body><p>abc</p></body></html>";

        assert_eq!(plain_text(html, FALLBACK_STRIP_TAGS, 10), "abc");
        assert_eq!(plain_text(html, FALLBACK_STRIP_TAGS, 0), "");
    }
}
