use std::borrow::Cow;

use arboard::{Clipboard, ImageData};
use image::ImageFormat;
use tracing::debug;

/// How a copy request was satisfied. Clipboard trouble is reported, never
/// fatal: image write degrades to a text write, and a failed text write
/// degrades to a notice.
#[derive(Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Image,
    TextFallback,
    Unavailable(String),
}

fn decode_png_rgba(png_bytes: &[u8]) -> Result<(usize, usize, Vec<u8>), String> {
    let image = image::load_from_memory_with_format(png_bytes, ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width as usize, height as usize, rgba.into_raw()))
}

fn set_clipboard_image_rgba(width: usize, height: usize, bytes: Vec<u8>) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|e| e.to_string())?;
    clipboard
        .set_image(ImageData {
            width,
            height,
            bytes: Cow::Owned(bytes),
        })
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn set_clipboard_text(text: &str) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(text).map_err(|e| e.to_string())?;
    Ok(())
}

/// Put the rendered PNG on the clipboard, falling back to the raw payload
/// text when image clipboard support is missing or denied.
pub fn copy_generated(png: &[u8], payload: &str) -> CopyOutcome {
    let image_result = decode_png_rgba(png)
        .and_then(|(width, height, bytes)| set_clipboard_image_rgba(width, height, bytes));

    match image_result {
        Ok(()) => CopyOutcome::Image,
        Err(image_err) => {
            debug!(error = %image_err, "image clipboard write failed, trying text");
            match set_clipboard_text(payload) {
                Ok(()) => CopyOutcome::TextFallback,
                Err(text_err) => CopyOutcome::Unavailable(text_err),
            }
        }
    }
}
