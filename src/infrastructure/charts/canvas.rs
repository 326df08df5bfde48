//! Off-screen drawing surface and PNG encoding

use std::error::Error;
use std::fmt::Display;
use std::io::Cursor;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;

use crate::domain::charts::ChartKind;
use crate::domain::DomainError;

pub(super) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(super) type DrawResult = Result<(), Box<dyn Error>>;

/// Series colours, cycled by diet index
pub(super) const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(23, 190, 207),
];

/// DejaVu Sans, bundled so text renders on hosts without system fonts
static FONT_BYTES: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

/// Family used by captions, axis labels and annotations
const FONT_FAMILY: &str = "sans-serif";

static FONTS_REGISTERED: OnceLock<bool> = OnceLock::new();

fn register_fonts(kind: ChartKind) -> Result<(), DomainError> {
    let registered = *FONTS_REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).is_ok());

    if registered {
        Ok(())
    } else {
        Err(render_error(kind, "embedded chart font could not be loaded"))
    }
}

pub(super) fn palette(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

pub(super) fn render_error(kind: ChartKind, err: impl Display) -> DomainError {
    DomainError::render(kind.as_str(), err.to_string())
}

/// Draws onto a white RGB canvas of `size` and returns the PNG bytes
pub(super) fn render_png<F>(kind: ChartKind, size: (u32, u32), draw: F) -> Result<Vec<u8>, DomainError>
where
    F: FnOnce(&Canvas<'_>) -> DrawResult,
{
    register_fonts(kind)?;

    let (width, height) = size;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];

    // plotters panics on some backend failures; those surface as render errors too
    catch_unwind(AssertUnwindSafe(|| {
        let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| render_error(kind, e))?;
        draw(&root).map_err(|e| render_error(kind, e))?;
        root.present().map_err(|e| render_error(kind, e))
    }))
    .map_err(|panic| render_error(kind, panic_message(panic.as_ref())))??;

    encode_png(kind, width, height, pixels)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "drawing panicked".to_string())
}

fn encode_png(kind: ChartKind, width: u32, height: u32, pixels: Vec<u8>) -> Result<Vec<u8>, DomainError> {
    let image = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| render_error(kind, "pixel buffer does not match canvas size"))?;

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| render_error(kind, e))?;

    Ok(png.into_inner())
}

/// Upper axis bound leaving some headroom above `max`
pub(super) fn axis_ceiling(max: f64) -> f64 {
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

#[cfg(test)]
pub(super) const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
