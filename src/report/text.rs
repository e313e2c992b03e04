// src/report/text.rs
use rusttype::{point, Font, Scale};
use std::path::Path;
use tiny_skia::{Paint, Pixmap, PremultipliedColorU8, Rect, Transform};

// Common locations across macOS and Linux distributions.
const SYSTEM_FONT_PATHS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
];

// Placeholder glyph box, relative to the font size.
const PLACEHOLDER_ADVANCE: f32 = 0.55;
const PLACEHOLDER_HEIGHT: f32 = 0.7;

/// Draws single lines of text onto a pixmap with rusttype. Without a usable
/// font every non-space character becomes a solid placeholder box.
pub struct TextPainter {
    font: Option<Font<'static>>,
}

impl TextPainter {
    /// Tries `explicit` first, then the usual system font locations.
    pub fn load(explicit: Option<&Path>) -> Self {
        let candidates = explicit
            .into_iter()
            .map(Path::to_path_buf)
            .chain(SYSTEM_FONT_PATHS.iter().map(|p| Path::new(p).to_path_buf()));

        for path in candidates {
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            match Font::try_from_vec(data) {
                Some(font) => {
                    tracing::debug!("Loaded chart font {}", path.display());
                    return Self { font: Some(font) };
                }
                None => tracing::warn!("{} is not a usable font", path.display()),
            }
        }

        tracing::warn!("No font found for chart text, drawing placeholder boxes");
        Self::without_font()
    }

    pub fn without_font() -> Self {
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Horizontal extent of `text` at `size` pixels.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        match &self.font {
            Some(font) => font
                .layout(text, Scale::uniform(size), point(0.0, 0.0))
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0),
            None => text.chars().count() as f32 * size * PLACEHOLDER_ADVANCE,
        }
    }

    /// Draws `text` with its left edge at `x` and its baseline at `baseline`.
    pub fn draw(&self, pixmap: &mut Pixmap, text: &str, x: f32, baseline: f32, size: f32, rgb: (u8, u8, u8)) {
        match &self.font {
            Some(font) => draw_glyphs(pixmap, font, text, x, baseline, size, rgb),
            None => draw_placeholders(pixmap, text, x, baseline, size, rgb),
        }
    }
}

fn draw_glyphs(
    pixmap: &mut Pixmap,
    font: &Font<'static>,
    text: &str,
    x: f32,
    baseline: f32,
    size: f32,
    rgb: (u8, u8, u8),
) {
    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let pixels = pixmap.pixels_mut();

    for glyph in font.layout(text, Scale::uniform(size), point(x, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = bb.min.x + gx as i32;
            let py = bb.min.y + gy as i32;
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let idx = (py * width + px) as usize;
            pixels[idx] = blend(pixels[idx], rgb, coverage);
        });
    }
}

fn draw_placeholders(pixmap: &mut Pixmap, text: &str, x: f32, baseline: f32, size: f32, rgb: (u8, u8, u8)) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb.0, rgb.1, rgb.2, 255);

    let advance = size * PLACEHOLDER_ADVANCE;
    let box_height = size * PLACEHOLDER_HEIGHT;
    for (i, c) in text.chars().enumerate() {
        if c.is_whitespace() {
            continue;
        }
        let left = x + i as f32 * advance;
        if let Some(rect) = Rect::from_xywh(left + 1.0, baseline - box_height, advance - 2.0, box_height) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
}

/// Source-over blend of an opaque colour at `coverage` onto a premultiplied pixel.
fn blend(dst: PremultipliedColorU8, rgb: (u8, u8, u8), coverage: f32) -> PremultipliedColorU8 {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;

    let alpha = mix(255, dst.alpha());
    let r = mix(rgb.0, dst.red()).min(alpha);
    let g = mix(rgb.1, dst.green()).min(alpha);
    let b = mix(rgb.2, dst.blue()).min(alpha);
    PremultipliedColorU8::from_rgba(r, g, b, alpha).unwrap_or(dst)
}
