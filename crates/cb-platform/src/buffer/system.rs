use std::borrow::Cow;
use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use arboard::{Clipboard, ImageData};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, warn};

use cb_core::{FormatTag, PayloadContent, PayloadSet};

use crate::ports::SystemBufferPort;

/// The OS clipboard, through `arboard`.
///
/// Only plain text, HTML (with a plain-text alternative) and PNG images are
/// representable. Everything else, including the reserved metadata tag, is
/// dropped on write.
#[derive(Debug, Default)]
pub struct SystemClipboardBuffer;

impl SystemClipboardBuffer {
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<Clipboard> {
        Clipboard::new().context("Failed to access system clipboard")
    }
}

fn encode_png(image: ImageData<'_>) -> Result<Vec<u8>> {
    let width = u32::try_from(image.width).context("image width out of range")?;
    let height = u32::try_from(image.height).context("image height out of range")?;
    let rgba = RgbaImage::from_raw(width, height, image.bytes.into_owned())
        .ok_or_else(|| anyhow!("clipboard image buffer does not match {width}x{height}"))?;
    let mut out = Cursor::new(Vec::new());
    rgba.write_to(&mut out, ImageFormat::Png)
        .context("encode clipboard image as png failed")?;
    Ok(out.into_inner())
}

fn decode_png(bytes: &[u8]) -> Result<ImageData<'static>> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image payload failed")?
        .to_rgba8();
    Ok(ImageData {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        bytes: Cow::Owned(rgba.into_raw()),
    })
}

impl SystemBufferPort for SystemClipboardBuffer {
    fn backend(&self) -> &'static str {
        "system"
    }

    fn read(&self) -> Result<PayloadSet> {
        let mut clipboard = Self::open()?;
        let mut payloads = PayloadSet::new();

        match clipboard.get_text() {
            Ok(text) if !text.is_empty() => {
                payloads.insert(FormatTag::plain_text(), PayloadContent::Text(text));
            }
            Ok(_) | Err(arboard::Error::ContentNotAvailable) => {}
            Err(err) => return Err(anyhow!(err).context("Failed to read text from clipboard")),
        }

        match clipboard.get_image() {
            Ok(image) => {
                let png = encode_png(image)?;
                payloads.insert(FormatTag::image(), PayloadContent::binary(png));
            }
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(err) => debug!(error = %err, "No readable image on system clipboard"),
        }

        Ok(payloads)
    }

    fn write(&self, payloads: &PayloadSet) -> Result<()> {
        let mut clipboard = Self::open()?;

        for tag in payloads.tags() {
            if !matches!(
                tag.as_str(),
                FormatTag::PLAIN_TEXT | FormatTag::RICH_TEXT | FormatTag::IMAGE
            ) {
                warn!(format = %tag, "Format not representable on the system clipboard; dropped");
            }
        }

        let plain = payloads.get(&FormatTag::plain_text()).and_then(|c| c.as_text());
        let html = payloads.get(&FormatTag::rich_text()).and_then(|c| c.as_text());
        let image = payloads.get(&FormatTag::image());

        match (html, plain, image) {
            (Some(html), alt, _) => clipboard
                .set_html(html, alt)
                .context("Failed to write html to clipboard")?,
            (None, Some(text), _) => clipboard
                .set_text(text)
                .context("Failed to write text to clipboard")?,
            (None, None, Some(image)) => clipboard
                .set_image(decode_png(image.as_bytes())?)
                .context("Failed to write image to clipboard")?,
            (None, None, None) => clipboard.clear().context("Failed to clear clipboard")?,
        }

        if image.is_some() && (html.is_some() || plain.is_some()) {
            warn!("System clipboard holds text or an image, not both; image dropped");
        }
        Ok(())
    }
}
