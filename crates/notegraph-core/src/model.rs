//! Content items and the corpus that owns them.
//!
//! A [`Corpus`] is the input side of graph construction: each
//! [`ContentItem`] carries its id, display title, and the raw link targets
//! found in its body. [`Corpus::resolved_links`] turns raw targets into ids
//! of other items in the same corpus; targets that resolve nowhere are
//! dropped, never invented as new ids.

use std::collections::{BTreeSet, HashMap};

/// How a link was written in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKind {
    /// `[text](path/to/note.md)`, resolved relative to the linking note.
    Markdown,
    /// `[[note]]`, resolved by id, file stem, then title or alias.
    Wiki,
}

/// A link target as written, after fragment stripping and unescaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawLink {
    pub target: String,
    pub kind: LinkKind,
}

impl RawLink {
    #[must_use]
    pub fn markdown(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: LinkKind::Markdown,
        }
    }

    #[must_use]
    pub fn wiki(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: LinkKind::Wiki,
        }
    }
}

/// One note in the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Root-relative, `/`-separated path without extension.
    pub id: String,
    /// Display title. Defaults to the file stem.
    pub title: String,
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
    pub links: Vec<RawLink>,
}

impl ContentItem {
    /// Create an item whose title is its id and which has no links.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            aliases: Vec::new(),
            tags: Vec::new(),
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: RawLink) -> Self {
        self.links.push(link);
        self
    }

    /// Last path segment of the id.
    #[must_use]
    pub fn stem(&self) -> &str {
        stem_of(&self.id)
    }
}

/// An indexed collection of [`ContentItem`]s.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    items: Vec<ContentItem>,
    by_id: HashMap<String, usize>,
    by_stem: HashMap<String, Vec<usize>>,
    by_name: HashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus, sorting items by id. Later duplicates of an id are
    /// discarded.
    #[must_use]
    pub fn new(mut items: Vec<ContentItem>) -> Self {
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items.dedup_by(|a, b| a.id == b.id);

        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_stem: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name = HashMap::new();

        for (i, item) in items.iter().enumerate() {
            by_id.insert(item.id.clone(), i);
            by_stem.entry(item.stem().to_lowercase()).or_default().push(i);
            by_name.entry(item.title.to_lowercase()).or_insert(i);
            for alias in &item.aliases {
                by_name.entry(alias.to_lowercase()).or_insert(i);
            }
        }

        Self {
            items,
            by_id,
            by_stem,
            by_name,
        }
    }

    /// Items in id order.
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.by_id.get(id).map(|&i| &self.items[i])
    }

    /// Resolve a raw link written in `from` to the id of a corpus item.
    #[must_use]
    pub fn resolve(&self, link: &RawLink, from: &ContentItem) -> Option<&str> {
        let idx = match link.kind {
            LinkKind::Markdown => self.resolve_path(&link.target, &from.id),
            LinkKind::Wiki => self.resolve_name(&link.target),
        }?;
        Some(self.items[idx].id.as_str())
    }

    /// Ids of corpus items referenced by `item`, deduplicated.
    #[must_use]
    pub fn resolved_links(&self, item: &ContentItem) -> BTreeSet<String> {
        item.links
            .iter()
            .filter_map(|link| self.resolve(link, item))
            .map(str::to_string)
            .collect()
    }

    /// Number of raw links across the corpus that resolve to no item.
    #[must_use]
    pub fn dangling_link_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| {
                item.links
                    .iter()
                    .filter(|link| self.resolve(link, item).is_none())
                    .count()
            })
            .sum()
    }

    fn resolve_path(&self, target: &str, from_id: &str) -> Option<usize> {
        let target = strip_note_extension(target);
        let joined = if let Some(absolute) = target.strip_prefix('/') {
            normalize_path(absolute)
        } else {
            let base = from_id.rsplit_once('/').map_or("", |(dir, _)| dir);
            if base.is_empty() {
                normalize_path(target)
            } else {
                normalize_path(&format!("{base}/{target}"))
            }
        };

        joined
            .and_then(|id| self.by_id.get(&id).copied())
            .or_else(|| self.by_id.get(target).copied())
    }

    fn resolve_name(&self, target: &str) -> Option<usize> {
        let target = strip_note_extension(target.trim());
        if let Some(&i) = self.by_id.get(target) {
            return Some(i);
        }
        let lowered = target.to_lowercase();
        if let Some(candidates) = self.by_stem.get(stem_of(&lowered)) {
            // Ambiguous stems resolve to the first id in sort order.
            if let Some(&i) = candidates.first() {
                return Some(i);
            }
        }
        self.by_name.get(&lowered).copied()
    }
}

fn stem_of(id: &str) -> &str {
    id.rsplit_once('/').map_or(id, |(_, stem)| stem)
}

fn strip_note_extension(target: &str) -> &str {
    target
        .strip_suffix(".md")
        .or_else(|| target.strip_suffix(".markdown"))
        .unwrap_or(target)
}

/// Collapse `.` and `..` segments. Returns `None` when `..` climbs above the
/// corpus root.
fn normalize_path(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            ContentItem::new("index"),
            ContentItem::new("notes/rust").with_title("Rust Language"),
            ContentItem::new("notes/graphs/pagerank"),
            ContentItem {
                aliases: vec!["Brandes".to_string()],
                ..ContentItem::new("notes/graphs/betweenness")
            },
        ])
    }

    #[test]
    fn items_are_sorted_by_id() {
        let c = corpus();
        let ids: Vec<&str> = c.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "index",
                "notes/graphs/betweenness",
                "notes/graphs/pagerank",
                "notes/rust"
            ]
        );
    }

    #[test]
    fn duplicate_ids_are_dropped() {
        let c = Corpus::new(vec![ContentItem::new("a"), ContentItem::new("a")]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn markdown_links_resolve_relative_to_source() {
        let c = corpus();
        let from = c.get("notes/graphs/pagerank").expect("item").clone();
        assert_eq!(
            c.resolve(&RawLink::markdown("betweenness.md"), &from),
            Some("notes/graphs/betweenness")
        );
        assert_eq!(
            c.resolve(&RawLink::markdown("../rust.md"), &from),
            Some("notes/rust")
        );
        assert_eq!(
            c.resolve(&RawLink::markdown("/index.md"), &from),
            Some("index")
        );
    }

    #[test]
    fn markdown_links_escaping_root_do_not_resolve() {
        let c = corpus();
        let from = c.get("index").expect("item").clone();
        assert_eq!(c.resolve(&RawLink::markdown("../../index.md"), &from), None);
    }

    #[test]
    fn wiki_links_resolve_by_id_stem_title_and_alias() {
        let c = corpus();
        let from = c.get("index").expect("item").clone();
        assert_eq!(
            c.resolve(&RawLink::wiki("notes/rust"), &from),
            Some("notes/rust")
        );
        assert_eq!(
            c.resolve(&RawLink::wiki("pagerank"), &from),
            Some("notes/graphs/pagerank")
        );
        assert_eq!(
            c.resolve(&RawLink::wiki("rust language"), &from),
            Some("notes/rust")
        );
        assert_eq!(
            c.resolve(&RawLink::wiki("Brandes"), &from),
            Some("notes/graphs/betweenness")
        );
        assert_eq!(c.resolve(&RawLink::wiki("missing"), &from), None);
    }

    #[test]
    fn resolved_links_dedupe_and_drop_unknown() {
        let item = ContentItem::new("index")
            .with_link(RawLink::wiki("rust"))
            .with_link(RawLink::markdown("notes/rust.md"))
            .with_link(RawLink::wiki("nowhere"));
        let c = Corpus::new(vec![item, ContentItem::new("notes/rust")]);
        let from = c.get("index").expect("item");

        let links = c.resolved_links(from);
        assert_eq!(links.len(), 1);
        assert!(links.contains("notes/rust"));
        assert_eq!(c.dangling_link_count(), 1);
    }

    #[test]
    fn normalize_handles_dot_segments() {
        assert_eq!(normalize_path("a/./b/../c"), Some("a/c".to_string()));
        assert_eq!(normalize_path(".."), None);
    }
}
