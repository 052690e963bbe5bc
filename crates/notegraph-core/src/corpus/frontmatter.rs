//! YAML frontmatter splitting and parsing.

use serde::Deserialize;

/// The frontmatter keys notegraph understands. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub aliases: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
}

/// Split a document into its frontmatter block (without fences) and body.
///
/// Frontmatter must start on the first line with `---` and end with a line
/// containing only `---` or `...`. Documents without a closed block are
/// returned whole as body.
#[must_use]
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse a frontmatter block.
///
/// # Errors
///
/// Returns the YAML error when the block is not a valid mapping.
pub fn parse(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml)
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(Option<()>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        OneOrMany::Many(v) => v,
        OneOrMany::Null(_) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_without_frontmatter_returns_body() {
        let (fm, body) = split("# Title\n\ntext");
        assert!(fm.is_none());
        assert_eq!(body, "# Title\n\ntext");
    }

    #[test]
    fn split_extracts_block_and_body() {
        let (fm, body) = split("---\ntitle: Hello\n---\n# Body\n");
        assert_eq!(fm, Some("title: Hello\n"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn unclosed_block_is_body() {
        let doc = "---\ntitle: Hello\n# Body\n";
        let (fm, body) = split(doc);
        assert!(fm.is_none());
        assert_eq!(body, doc);
    }

    #[test]
    fn parse_reads_known_keys() {
        let fm = parse("title: Graphs\naliases: [Networks, Nets]\ntags: math, cs\nauthor: me\n")
            .expect("valid yaml");
        assert_eq!(fm.title.as_deref(), Some("Graphs"));
        assert_eq!(fm.aliases, vec!["Networks", "Nets"]);
        assert_eq!(fm.tags, vec!["math", "cs"]);
    }

    #[test]
    fn parse_empty_block_is_default() {
        assert_eq!(parse("  \n").expect("empty"), Frontmatter::default());
    }

    #[test]
    fn parse_rejects_non_mapping() {
        assert!(parse("- just\n- a list\n").is_err());
    }
}
