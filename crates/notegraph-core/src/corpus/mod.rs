//! Markdown corpus loading.
//!
//! # Overview
//!
//! [`load_corpus`] walks a directory tree and turns every markdown file into
//! a [`ContentItem`]:
//!
//! ```text
//! <root>/notes/rust.md
//!        ↓  id = "notes/rust"
//!        ↓  frontmatter::split / frontmatter::parse  (title, aliases, tags)
//!        ↓  links::extract                          (raw links, first H1)
//! ContentItem { id, title, aliases, tags, links }
//! ```
//!
//! Files that cannot be read and frontmatter that does not parse are logged
//! and skipped; they never abort the load.

pub mod frontmatter;
pub mod links;

use std::path::{Component, Path};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::error::CorpusError;
use crate::model::{ContentItem, Corpus};

/// Load every markdown note under `root`.
///
/// # Errors
///
/// Returns [`CorpusError`] (wrapped in `anyhow`) when `root` is missing, is
/// not a directory, or cannot be walked.
#[instrument(skip(config), fields(root = %root.display()))]
pub fn load_corpus(root: &Path, config: &CorpusConfig) -> Result<Corpus> {
    if !root.exists() {
        return Err(CorpusError::RootMissing(root.to_path_buf()).into());
    }
    if !root.is_dir() {
        return Err(CorpusError::NotADirectory(root.to_path_buf()).into());
    }

    let mut items = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.path(), root, config));

    for entry in walker {
        let entry = entry.map_err(CorpusError::from)?;
        if !entry.file_type().is_file() || !has_note_extension(entry.path(), config) {
            continue;
        }

        match load_note(root, entry.path()) {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {
                debug!(path = %entry.path().display(), "skipping note with non-UTF8 path");
            }
            Err(e) => {
                warn!(path = %entry.path().display(), error = %format!("{e:#}"), "skipping unreadable note");
            }
        }
    }

    let corpus = Corpus::new(items);
    info!(
        notes = corpus.len(),
        dangling_links = corpus.dangling_link_count(),
        "corpus loaded"
    );
    Ok(corpus)
}

/// Build a [`ContentItem`] from a note's id and raw content.
#[must_use]
pub fn parse_note(id: String, content: &str) -> ContentItem {
    let (yaml, body) = frontmatter::split(content);
    let fm = match yaml.map(frontmatter::parse).transpose() {
        Ok(fm) => fm.unwrap_or_default(),
        Err(e) => {
            warn!(id = %id, error = %e, "ignoring malformed frontmatter");
            frontmatter::Frontmatter::default()
        }
    };

    let extracted = links::extract(body);
    let mut item = ContentItem::new(id);
    if let Some(title) = fm
        .title
        .filter(|t| !t.trim().is_empty())
        .or(extracted.first_heading)
    {
        item.title = title;
    } else {
        item.title = item.stem().to_string();
    }
    item.aliases = fm.aliases;
    item.tags = fm.tags;
    item.links = extracted.links;
    item
}

/// Read a single note from disk.
///
/// Returns `None` when `path` is outside `root` or not valid UTF-8.
/// Invalid UTF-8 in the content is replaced, not rejected.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_note(root: &Path, path: &Path) -> Result<Option<ContentItem>> {
    let Some(id) = note_id(root, path) else {
        return Ok(None);
    };
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(parse_note(id, &String::from_utf8_lossy(&bytes))))
}

fn is_excluded(path: &Path, root: &Path, config: &CorpusConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };
    if path.is_dir() && name.starts_with('.') {
        return true;
    }
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.to_string_lossy().replace('\\', "/");
    config
        .exclude
        .iter()
        .any(|ex| name == ex.as_str() || rel == *ex)
}

fn has_note_extension(path: &Path, config: &CorpusConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| config.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}

/// Root-relative, `/`-separated path with the extension removed.
fn note_id(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?.with_extension("");
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
