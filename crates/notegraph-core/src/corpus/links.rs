//! Link and heading extraction from markdown bodies.
//!
//! Inline and reference links come from `pulldown-cmark` events. Wiki links
//! (`[[target]]`, `[[target|label]]`, `[[target#section]]`) are not
//! CommonMark, so they are matched with a regex over runs of adjacent text
//! events, outside code blocks.

use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::model::RawLink;

static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|#]+)(?:#[^\[\]|]*)?(?:\|[^\[\]]*)?\]\]").unwrap_or_else(|e| {
        unreachable!("wiki link pattern is a valid regex: {e}")
    })
});

static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:")
        .unwrap_or_else(|e| unreachable!("scheme pattern is a valid regex: {e}"))
});

/// Links and the first level-1 heading found in a markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub links: Vec<RawLink>,
    pub first_heading: Option<String>,
}

/// Scan a markdown body.
#[must_use]
pub fn extract(body: &str) -> Extracted {
    let mut out = Extracted::default();
    let mut text_run = String::new();
    let mut in_code_block = false;
    let mut heading: Option<String> = None;

    for event in Parser::new_ext(body, Options::ENABLE_TABLES) {
        match event {
            Event::Text(t) => {
                if let Some(h) = heading.as_mut() {
                    h.push_str(&t);
                }
                if !in_code_block {
                    text_run.push_str(&t);
                }
                continue;
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(target) = clean_markdown_target(&dest_url) {
                    out.links.push(RawLink::markdown(target));
                }
            }
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if out.first_heading.is_none() => {
                heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(h) = heading.take() {
                    let h = h.trim();
                    if !h.is_empty() {
                        out.first_heading = Some(h.to_string());
                    }
                }
            }
            Event::Code(c) => {
                if let Some(h) = heading.as_mut() {
                    h.push_str(&c);
                }
            }
            _ => {}
        }
        flush_wiki_links(&mut text_run, &mut out.links);
    }
    flush_wiki_links(&mut text_run, &mut out.links);

    out
}

fn flush_wiki_links(text_run: &mut String, links: &mut Vec<RawLink>) {
    if text_run.is_empty() {
        return;
    }
    for cap in WIKI_LINK.captures_iter(text_run) {
        let target = cap[1].trim();
        if !target.is_empty() {
            links.push(RawLink::wiki(target));
        }
    }
    text_run.clear();
}

/// Normalize a markdown link destination, or `None` for external links and
/// same-document anchors.
fn clean_markdown_target(dest: &str) -> Option<String> {
    let dest = dest.trim();
    if dest.is_empty() || dest.starts_with('#') || URL_SCHEME.is_match(dest) {
        return None;
    }
    let end = dest.find(['#', '?']).unwrap_or(dest.len());
    let path = dest[..end].replace("%20", " ");
    if path.is_empty() { None } else { Some(path) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkKind;

    fn targets(extracted: &Extracted) -> Vec<(&str, LinkKind)> {
        extracted
            .links
            .iter()
            .map(|l| (l.target.as_str(), l.kind))
            .collect()
    }

    #[test]
    fn markdown_links_are_collected() {
        let e = extract("See [rust](rust.md) and [graphs](../graphs/index.md#top).");
        assert_eq!(
            targets(&e),
            vec![
                ("rust.md", LinkKind::Markdown),
                ("../graphs/index.md", LinkKind::Markdown)
            ]
        );
    }

    #[test]
    fn external_links_and_anchors_are_ignored() {
        let e = extract(
            "[web](https://example.com) [mail](mailto:a@b.c) [here](#section) [q](note.md?x=1)",
        );
        assert_eq!(targets(&e), vec![("note.md", LinkKind::Markdown)]);
    }

    #[test]
    fn escaped_spaces_are_decoded() {
        let e = extract("[x](my%20note.md)");
        assert_eq!(targets(&e), vec![("my note.md", LinkKind::Markdown)]);
    }

    #[test]
    fn wiki_links_with_alias_and_section() {
        let e = extract("Links: [[PageRank]], [[graphs/louvain|Louvain]] and [[Brandes#Algorithm]].");
        assert_eq!(
            targets(&e),
            vec![
                ("PageRank", LinkKind::Wiki),
                ("graphs/louvain", LinkKind::Wiki),
                ("Brandes", LinkKind::Wiki)
            ]
        );
    }

    #[test]
    fn code_blocks_are_skipped() {
        let e = extract("```\n[[not-a-link]]\n```\n\nreal [[link]]\n");
        assert_eq!(targets(&e), vec![("link", LinkKind::Wiki)]);
    }

    #[test]
    fn images_are_not_links() {
        let e = extract("![diagram](img/graph.png)");
        assert!(e.links.is_empty());
    }

    #[test]
    fn first_h1_is_captured() {
        let e = extract("intro\n\n## Sub\n\n# The `Title`\n\n# Second\n");
        assert_eq!(e.first_heading.as_deref(), Some("The Title"));
    }
}
