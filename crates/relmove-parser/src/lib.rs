//! # relmove Parser
//!
//! Link and embed extraction for Obsidian Flavored Markdown (OFM), built on
//! `pulldown-cmark`.
//!
//! This crate provides:
//! - Wikilinks `[[Note]]` and embeds `![[image.png]]`
//! - Markdown links `[text](note.md)` and images `![alt](image.png)`
//! - **Code block awareness**: references inside code blocks, inline code,
//!   HTML and the frontmatter block are ignored
//! - Link text helpers shared with link resolution ([`link_utils`])
//!
//! Only intra-vault references are reported. External URLs and same-document
//! anchors (`#heading`) are dropped. Display aliases are stripped, subpaths
//! are kept as written.
//!
//! ## Quick Start
//!
//! ```
//! use relmove_parser::parse_links;
//!
//! let content = "See [[Other Note#Intro|intro]] and ![[diagram.png]].\n\n`[[not a link]]`";
//! let refs = parse_links(content);
//!
//! assert_eq!(refs.links.len(), 1);
//! assert_eq!(refs.links[0].link_text, "Other Note#Intro");
//! assert_eq!(refs.embeds[0].link_text, "diagram.png");
//! ```

mod engine;
pub mod link_utils;

pub use engine::LinkEngine;

use relmove_core::DocumentLinks;

/// Extract links and embeds from markdown content, each in source order.
pub fn parse_links(content: &str) -> DocumentLinks {
    LinkEngine::new(content).extract()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_links_mixed_document() {
        let content = r#"---
title: Project
---

# Project

Kick-off notes in [[meetings/kickoff]], spec in [the doc](docs/spec.md).

![[diagram.png]]
![screenshot](assets/shot.jpg)

```rust
let x = "[[not-a-link]]";
```

External: [site](https://example.com), local: [[#Project]]
"#;

        let refs = parse_links(content);
        let links: Vec<_> = refs.links.iter().map(|l| l.link_text.as_str()).collect();
        let embeds: Vec<_> = refs.embeds.iter().map(|l| l.link_text.as_str()).collect();

        assert_eq!(links, vec!["meetings/kickoff", "docs/spec.md"]);
        assert_eq!(embeds, vec!["diagram.png", "assets/shot.jpg"]);
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_links("").is_empty());
        assert!(parse_links("plain text only").is_empty());
    }
}
