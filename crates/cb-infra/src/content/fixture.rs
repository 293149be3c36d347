use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::warn;

use cb_core::ports::{ContentError, ContentProviderPort};
use cb_core::{FormatTag, PayloadContent};

const FIXTURE_TEXT: &str = "Quarterly totals\nNorth\t1200\nSouth\t950";
const FIXTURE_HTML: &str = "<table><tr><th>Region</th><th>Total</th></tr>\
<tr><td>North</td><td>1200</td></tr><tr><td>South</td><td>950</td></tr></table>";
const FIXTURE_CUSTOM: &str =
    r#"{"version":1,"cells":[["Region","Total"],["North",1200],["South",950]]}"#;

/// Serves fixed documents for each format, as if fetched from a server.
#[derive(Debug, Clone, Default)]
pub struct FixtureContentProvider {
    fixtures: BTreeMap<FormatTag, PayloadContent>,
}

impl FixtureContentProvider {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in documents for the four user formats. The image is a generated PNG.
    pub fn builtin() -> Self {
        let provider = Self::empty()
            .with_fixture(FormatTag::plain_text(), PayloadContent::text(FIXTURE_TEXT))
            .with_fixture(FormatTag::rich_text(), PayloadContent::text(FIXTURE_HTML))
            .with_fixture(FormatTag::custom(), PayloadContent::text(FIXTURE_CUSTOM));

        match generated_png() {
            Ok(png) => provider.with_fixture(FormatTag::image(), PayloadContent::binary(png)),
            Err(err) => {
                warn!(error = %err, "Failed to generate fixture image; image format disabled");
                provider
            }
        }
    }

    /// Replaces the image fixture with the file at `path`. The file must be a decodable image.
    pub fn with_image_file(self, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read fixture image failed: {}", path.display()))?;
        image::guess_format(&bytes)
            .with_context(|| format!("fixture image format not recognised: {}", path.display()))?;
        Ok(self.with_fixture(FormatTag::image(), PayloadContent::binary(bytes)))
    }

    pub fn with_fixture(mut self, tag: FormatTag, content: PayloadContent) -> Self {
        self.fixtures.insert(tag, content);
        self
    }
}

fn generated_png() -> Result<Vec<u8>> {
    let img = RgbaImage::from_fn(16, 16, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgba([32, 96, 192, 255])
        } else {
            Rgba([240, 240, 240, 255])
        }
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .context("encode fixture png failed")?;
    Ok(out.into_inner())
}

#[async_trait]
impl ContentProviderPort for FixtureContentProvider {
    async fn resolve(&self, format: &FormatTag) -> Result<PayloadContent, ContentError> {
        self.fixtures
            .get(format)
            .cloned()
            .ok_or_else(|| ContentError::Network {
                format: format.clone(),
                reason: "no fixture for format".into(),
            })
    }
}
