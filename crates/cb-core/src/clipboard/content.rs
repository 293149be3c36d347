use base64::Engine;
use bytes::Bytes;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Content stored under one format tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadContent {
    Text(String),
    Binary(Bytes),
}

impl PayloadContent {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        Self::Binary(bytes.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes() == 0
    }

    /// Encodes the content as a string for text-only stores.
    ///
    /// Binary content becomes a `data:<tag>;base64,...` URL so it can be told apart
    /// from text on the way back.
    pub fn to_text_encoding(&self, media_type: &str) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Binary(b) => format!(
                "{DATA_URL_PREFIX}{media_type}{BASE64_MARKER}{}",
                base64::engine::general_purpose::STANDARD.encode(b)
            ),
        }
    }

    /// Inverse of [`to_text_encoding`](Self::to_text_encoding).
    ///
    /// Data URLs are only decoded when `binary` is set (the tag is a binary
    /// format); text formats always come back verbatim. A value that looks like
    /// a data URL but does not decode is kept as text.
    pub fn from_text_encoding(value: String, binary: bool) -> Self {
        if !binary {
            return Self::Text(value);
        }
        if let Some(rest) = value.strip_prefix(DATA_URL_PREFIX) {
            if let Some(idx) = rest.find(BASE64_MARKER) {
                let encoded = &rest[idx + BASE64_MARKER.len()..];
                if let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(encoded) {
                    return Self::Binary(Bytes::from(bytes));
                }
            }
        }
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_encoding_is_identity_for_text() {
        let content = PayloadContent::text("hello");
        let encoded = content.to_text_encoding("text/plain");
        assert_eq!(encoded, "hello");
        assert_eq!(PayloadContent::from_text_encoding(encoded, false), content);
    }

    #[test]
    fn binary_survives_text_encoding_without_loss() {
        let bytes: Vec<u8> = (0..=255u8).chain([0x89, 0x50, 0x4e, 0x47, 0x00]).collect();
        let content = PayloadContent::binary(bytes.clone());
        let encoded = content.to_text_encoding("image/png");
        assert!(encoded.starts_with("data:image/png;base64,"));

        let decoded = PayloadContent::from_text_encoding(encoded, true);
        assert_eq!(decoded.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn malformed_data_url_stays_text() {
        let value = "data:image/png;base64,@@not-base64@@".to_string();
        assert_eq!(
            PayloadContent::from_text_encoding(value.clone(), true),
            PayloadContent::Text(value)
        );
    }

    #[test]
    fn data_url_under_text_format_stays_text() {
        let value = "data:text/plain;base64,aGVsbG8=".to_string();
        assert_eq!(
            PayloadContent::from_text_encoding(value.clone(), false),
            PayloadContent::Text(value)
        );
    }
}
