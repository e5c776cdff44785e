//! Link extraction engine for Obsidian Flavored Markdown.
//!
//! Two passes over the content:
//! 1. pulldown-cmark pass: markdown links/images, and the byte ranges (code
//!    blocks, inline code, HTML, metadata blocks) where OFM syntax is inert
//! 2. Regex pass: wikilinks `[[..]]` and embeds `![[..]]` outside those ranges
//!
//! Links and embeds are each reported in source order.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use relmove_core::{DocumentLinks, LinkRef};
use std::ops::Range;
use std::sync::LazyLock;

use crate::link_utils::{LinkTarget, classify_url, classify_wikilink, strip_display_text};

/// Wikilink or embed: optional `!`, then [[target]] or [[target|display]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]]+)\]\]").unwrap());

#[inline]
fn has_wikilink(content: &str) -> bool {
    content.contains("[[")
}

/// Byte ranges to exclude from OFM regex parsing.
#[derive(Debug, Default, Clone)]
struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    /// Check if a byte offset falls within any excluded range.
    #[inline]
    fn contains(&self, offset: usize) -> bool {
        // ranges are sorted and disjoint after optimize()
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        if idx == 0 {
            return false;
        }
        offset < self.ranges[idx - 1].end
    }

    fn add(&mut self, range: Range<usize>) {
        self.ranges.push(range);
    }

    /// Sort and merge overlapping ranges for efficient lookup.
    fn optimize(&mut self) {
        if self.ranges.is_empty() {
            return;
        }
        self.ranges.sort_by_key(|r| r.start);

        let mut merged = Vec::with_capacity(self.ranges.len());
        let mut current = self.ranges[0].clone();

        for range in self.ranges.iter().skip(1) {
            if range.start <= current.end {
                current.end = current.end.max(range.end);
            } else {
                merged.push(current);
                current = range.clone();
            }
        }
        merged.push(current);
        self.ranges = merged;
    }
}

/// Positioned references gathered by both passes before ordering.
#[derive(Debug, Default)]
struct Collected {
    links: Vec<(usize, LinkRef)>,
    embeds: Vec<(usize, LinkRef)>,
}

impl Collected {
    fn into_document_links(mut self) -> DocumentLinks {
        self.links.sort_by_key(|(offset, _)| *offset);
        self.embeds.sort_by_key(|(offset, _)| *offset);
        DocumentLinks {
            links: self.links.into_iter().map(|(_, link)| link).collect(),
            embeds: self.embeds.into_iter().map(|(_, link)| link).collect(),
        }
    }
}

/// Extracts the intra-vault references of a single document.
pub struct LinkEngine<'a> {
    content: &'a str,
}

impl<'a> LinkEngine<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Run both passes and return links and embeds in source order.
    pub fn extract(&self) -> DocumentLinks {
        let mut collected = Collected::default();
        let excluded = self.pulldown_pass(&mut collected);
        self.wikilink_pass(&excluded, &mut collected);
        collected.into_document_links()
    }

    fn pulldown_pass(&self, collected: &mut Collected) -> ExcludedRanges {
        let mut excluded = ExcludedRanges::default();

        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(self.content, opts);
        let mut code_block_start: usize = 0;
        let mut metadata_start: usize = 0;

        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    code_block_start = range.start;
                }
                Event::End(TagEnd::CodeBlock) => {
                    excluded.add(code_block_start..range.end);
                }
                Event::Code(_) | Event::Html(_) | Event::InlineHtml(_) => {
                    excluded.add(range.clone());
                }
                Event::Start(Tag::MetadataBlock(_)) => {
                    metadata_start = range.start;
                }
                Event::End(TagEnd::MetadataBlock(_)) => {
                    excluded.add(metadata_start..range.end);
                }
                Event::Start(Tag::Link {
                    link_type, dest_url, ..
                }) => {
                    if link_type == LinkType::Email {
                        continue;
                    }
                    if let LinkTarget::Internal(text) = classify_url(&dest_url) {
                        collected.links.push((range.start, LinkRef::new(text)));
                    }
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    if let LinkTarget::Internal(text) = classify_url(&dest_url) {
                        collected.embeds.push((range.start, LinkRef::new(text)));
                    }
                }
                _ => {}
            }
        }

        excluded.optimize();
        excluded
    }

    fn wikilink_pass(&self, excluded: &ExcludedRanges, collected: &mut Collected) {
        if !has_wikilink(self.content) {
            return;
        }

        for caps in WIKILINK.captures_iter(self.content) {
            let (Some(full_match), Some(bang), Some(raw)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            let global_start = full_match.start();
            let target_start = raw.start();

            if excluded.contains(global_start) || excluded.contains(target_start) {
                continue;
            }

            let LinkTarget::Internal(text) = classify_wikilink(strip_display_text(raw.as_str())) else {
                continue;
            };

            if bang.as_str().is_empty() {
                collected.links.push((global_start, LinkRef::new(text)));
            } else {
                collected.embeds.push((global_start, LinkRef::new(text)));
            }
        }
    }
}
