use std::collections::{BTreeMap, BTreeSet};

use super::{marker, FormatTag, PayloadContent};

/// Message published while the requested formats are still being resolved.
pub const PLACEHOLDER_TEXT: &str = "Resolving copy payloads…";

/// Format tag → content mapping held by one replica.
///
/// Keys are unique; iteration order is the tag order, so two equal sets always
/// serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadSet {
    entries: BTreeMap<FormatTag, PayloadContent>,
}

impl PayloadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single plain-text "resolving" entry published in phase 1 of a copy.
    pub fn placeholder() -> Self {
        Self::new().with(FormatTag::plain_text(), PayloadContent::text(PLACEHOLDER_TEXT))
    }

    pub fn with(mut self, tag: FormatTag, content: PayloadContent) -> Self {
        self.insert(tag, content);
        self
    }

    pub fn insert(&mut self, tag: FormatTag, content: PayloadContent) -> Option<PayloadContent> {
        self.entries.insert(tag, content)
    }

    pub fn get(&self, tag: &FormatTag) -> Option<&PayloadContent> {
        self.entries.get(tag)
    }

    pub fn remove(&mut self, tag: &FormatTag) -> Option<PayloadContent> {
        self.entries.remove(tag)
    }

    pub fn contains(&self, tag: &FormatTag) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &FormatTag> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FormatTag, &PayloadContent)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_size_bytes(&self) -> usize {
        self.entries.values().map(|c| c.size_bytes()).sum()
    }

    /// Drops every entry whose tag is not in `allowed`.
    pub fn retain_formats(&mut self, allowed: &BTreeSet<FormatTag>) {
        self.entries.retain(|tag, _| allowed.contains(tag));
    }

    /// Write-time timestamp embedded in the rich-text entry, if present and parsable.
    pub fn copied_at(&self) -> Option<i64> {
        self.get(&FormatTag::rich_text())
            .and_then(PayloadContent::as_text)
            .and_then(marker::parse_copied_at)
    }

    /// Text-only view of the set: binary entries become base64 data URLs.
    pub fn to_text_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(tag, content)| (tag.0.clone(), content.to_text_encoding(tag.as_str())))
            .collect()
    }

    /// Inverse of [`to_text_map`](Self::to_text_map). Only binary tags decode data URLs.
    pub fn from_text_map(map: BTreeMap<String, String>) -> Self {
        let entries = map
            .into_iter()
            .map(|(tag, value)| {
                let tag = FormatTag(tag);
                let content = PayloadContent::from_text_encoding(value, tag.is_binary());
                (tag, content)
            })
            .collect();
        Self { entries }
    }
}

impl FromIterator<(FormatTag, PayloadContent)> for PayloadSet {
    fn from_iter<I: IntoIterator<Item = (FormatTag, PayloadContent)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PayloadSet {
    type Item = (FormatTag, PayloadContent);
    type IntoIter = std::collections::btree_map::IntoIter<FormatTag, PayloadContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
