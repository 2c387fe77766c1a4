use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageBuffer, ImageEncoder, Rgba};
use qrcode::QrCode;

use crate::error::{Error, Result};
use crate::models::ErrorCorrection;

pub const MIN_WIDTH: u32 = 256;
pub const MAX_WIDTH: u32 = 1024;
pub const MIN_MARGIN: u32 = 1;
pub const MAX_MARGIN: u32 = 8;

/// Rendering configuration handed to the external QR library. Colors are
/// `#rrggbb` strings; width is the final edge length in pixels; margin is the
/// quiet zone in module units.
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    pub error_correction: ErrorCorrection,
    pub width: u32,
    pub margin: u32,
    pub dark: String,
    pub light: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::H,
            width: 512,
            margin: 4,
            dark: "#1f2937".to_string(),
            light: "#ffffff".to_string(),
        }
    }
}

/// Named dark/light color pairs carried over from the original app.
pub const COLOR_PRESETS: &[(&str, &str, &str)] = &[
    ("Classic", "#000000", "#ffffff"),
    ("Ocean", "#0ea5e9", "#f0f9ff"),
    ("Forest", "#059669", "#f0fdf4"),
    ("Sunset", "#dc2626", "#fef2f2"),
    ("Royal", "#7c3aed", "#faf5ff"),
    ("Gold", "#d97706", "#fffbeb"),
];

pub fn color_preset(name: &str) -> Result<(&'static str, &'static str)> {
    COLOR_PRESETS
        .iter()
        .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name))
        .map(|(_, dark, light)| (*dark, *light))
        .ok_or_else(|| Error::UnknownPreset(name.to_string()))
}

/// Clamp out-of-range numeric options instead of failing on them.
pub fn sanitize_options(options: &EncodeOptions) -> EncodeOptions {
    EncodeOptions {
        error_correction: options.error_correction,
        width: options.width.clamp(MIN_WIDTH, MAX_WIDTH),
        margin: options.margin.clamp(MIN_MARGIN, MAX_MARGIN),
        dark: options.dark.clone(),
        light: options.light.clone(),
    }
}

fn parse_hex_color(text: &str) -> Result<Rgba<u8>> {
    let hex = text
        .strip_prefix('#')
        .ok_or_else(|| Error::InvalidColor(text.to_string()))?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(text.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(text.to_string()))
    };
    Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}

/// Render `payload` as a PNG raster.
///
/// The symbol matrix itself comes from the `qrcode` crate; this function only
/// marshals the options, paints the quiet zone, and scales the result to the
/// requested width. Payloads that exceed the symbol capacity at the chosen
/// error-correction level surface as [`Error::Encode`].
pub fn render_png(payload: &str, options: &EncodeOptions) -> Result<Vec<u8>> {
    let options = sanitize_options(options);
    let dark = parse_hex_color(&options.dark)?;
    let light = parse_hex_color(&options.light)?;

    let code = QrCode::with_error_correction_level(
        payload.as_bytes(),
        options.error_correction.to_ec_level(),
    )?;

    let modules = code.width() as u32;
    let module_px = (options.width / (modules + 2 * options.margin)).max(1);
    let symbol: ImageBuffer<Rgba<u8>, Vec<u8>> = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .dark_color(dark)
        .light_color(light)
        .build();

    // Paint the configurable quiet zone ourselves, then scale to the exact
    // requested edge length.
    let margin_px = options.margin * module_px;
    let edge = modules * module_px + 2 * margin_px;
    let mut canvas = ImageBuffer::from_pixel(edge, edge, light);
    imageops::overlay(&mut canvas, &symbol, margin_px as i64, margin_px as i64);

    let scaled = if edge == options.width {
        canvas
    } else {
        imageops::resize(&canvas, options.width, options.width, FilterType::Nearest)
    };

    encode_rgba_to_png(options.width, options.width, scaled.as_raw())
}

fn encode_rgba_to_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new(&mut out);
    encoder.write_image(rgba, width, height, ColorType::Rgba8.into())?;
    Ok(out)
}
