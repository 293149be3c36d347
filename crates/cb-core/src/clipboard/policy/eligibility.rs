//! Paste-eligibility gate.
//!
//! - unknown / external origin: plain text and the custom format only
//! - same session: everything
//! - cross session: everything except images

use std::collections::BTreeSet;

use crate::clipboard::{Classification, FormatTag};

/// Whether `tag` may be requested given the current classification.
///
/// `None` means no copy metadata has been observed yet.
pub fn is_eligible(tag: &FormatTag, classification: Option<Classification>) -> bool {
    match classification {
        Some(Classification::SameSession) => true,
        Some(Classification::CrossSession) => tag.as_str() != FormatTag::IMAGE,
        Some(Classification::External) | None => {
            matches!(tag.as_str(), FormatTag::PLAIN_TEXT | FormatTag::CUSTOM)
        }
    }
}

/// The user-facing formats that may be requested next.
pub fn eligible_formats(classification: Option<Classification>) -> BTreeSet<FormatTag> {
    FormatTag::user_formats()
        .into_iter()
        .filter(|tag| is_eligible(tag, classification))
        .collect()
}
