use super::model::{FormatPolicy, FormatSelection};
use crate::clipboard::{FormatTag, PayloadSet};

/// Fallback order for [`FormatPolicy::DefaultPriority`]: richest representation first.
pub const DEFAULT_PRIORITY: [&str; 4] = [
    FormatTag::CUSTOM,
    FormatTag::RICH_TEXT,
    FormatTag::PLAIN_TEXT,
    FormatTag::IMAGE,
];

/// Picks the concrete format a paste should render.
///
/// Pure: same inputs, same output. Returns `None` only for `DefaultPriority`
/// when none of the prioritized tags is present.
pub fn select_format(payloads: &PayloadSet, policy: &FormatPolicy) -> Option<FormatSelection> {
    match policy {
        FormatPolicy::Explicit(tag) => Some(FormatSelection {
            tag: tag.clone(),
            content: payloads.get(tag).cloned(),
        }),
        FormatPolicy::DefaultPriority => DEFAULT_PRIORITY
            .iter()
            .map(|raw| FormatTag::from(*raw))
            .find_map(|tag| {
                payloads.get(&tag).cloned().map(|content| FormatSelection {
                    tag,
                    content: Some(content),
                })
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::PayloadContent;

    fn full_set() -> PayloadSet {
        PayloadSet::new()
            .with(FormatTag::plain_text(), PayloadContent::text("plain"))
            .with(FormatTag::rich_text(), PayloadContent::text("<b>rich</b>"))
            .with(FormatTag::image(), PayloadContent::binary(vec![0x89u8, 0x50]))
            .with(FormatTag::custom(), PayloadContent::text("{\"cells\":[]}"))
    }

    #[test]
    fn default_priority_prefers_custom_format() {
        let selection = select_format(&full_set(), &FormatPolicy::DefaultPriority).unwrap();
        assert_eq!(selection.tag, FormatTag::custom());
    }

    #[test]
    fn default_priority_walks_the_fallback_list() {
        let mut set = full_set();
        set.remove(&FormatTag::custom());
        assert_eq!(
            select_format(&set, &FormatPolicy::DefaultPriority).unwrap().tag,
            FormatTag::rich_text()
        );
        set.remove(&FormatTag::rich_text());
        assert_eq!(
            select_format(&set, &FormatPolicy::DefaultPriority).unwrap().tag,
            FormatTag::plain_text()
        );
        set.remove(&FormatTag::plain_text());
        assert_eq!(
            select_format(&set, &FormatPolicy::DefaultPriority).unwrap().tag,
            FormatTag::image()
        );
    }

    #[test]
    fn default_priority_not_found_on_unknown_formats() {
        let set = PayloadSet::new().with(FormatTag::from("text/rtf"), PayloadContent::text("{\\rtf}"));
        assert_eq!(select_format(&set, &FormatPolicy::DefaultPriority), None);
        assert_eq!(select_format(&PayloadSet::new(), &FormatPolicy::DefaultPriority), None);
    }

    #[test]
    fn default_priority_is_deterministic() {
        let set = full_set();
        let first = select_format(&set, &FormatPolicy::DefaultPriority);
        for _ in 0..10 {
            assert_eq!(select_format(&set, &FormatPolicy::DefaultPriority), first);
        }
    }

    #[test]
    fn explicit_format_returns_requested_tag_even_when_absent() {
        let set = PayloadSet::new().with(FormatTag::plain_text(), PayloadContent::text("p"));
        let hit = select_format(&set, &FormatPolicy::Explicit(FormatTag::plain_text())).unwrap();
        assert_eq!(hit.content, Some(PayloadContent::text("p")));

        let miss = select_format(&set, &FormatPolicy::Explicit(FormatTag::image())).unwrap();
        assert_eq!(miss.tag, FormatTag::image());
        assert_eq!(miss.content, None);
    }
}
