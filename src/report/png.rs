// src/report/png.rs
use crate::report::text::TextPainter;
use crate::report::{ChartRenderer, ProportionChart};
use crate::utils::error::ReportError;
use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

// 8x6 inches at 100 dpi.
const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 600;
const PIE_CENTER: (f32, f32) = (300.0, 300.0);
const PIE_RADIUS: f32 = 220.0;
const START_ANGLE_DEG: f32 = 140.0;
const LEGEND_X: f32 = 580.0;
const LEGEND_Y: f32 = 120.0;
const SWATCH: f32 = 24.0;
const LEGEND_ROW: f32 = SWATCH + 12.0;
const TITLE_SIZE: f32 = 24.0;
const TITLE_BASELINE: f32 = 44.0;
const LEGEND_SIZE: f32 = 18.0;
const PERCENT_SIZE: f32 = 16.0;
const MIN_LABELLED_SWEEP_DEG: f32 = 15.0;
const TEXT_RGB: (u8, u8, u8) = (0x20, 0x20, 0x20);

const PALETTE: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

/// Renders labelled pie charts to PNG files with tiny-skia.
pub struct PngPieRenderer {
    output_dir: PathBuf,
    text: TextPainter,
}

impl PngPieRenderer {
    /// `font` is tried before the usual system font locations.
    pub fn with_font<P: AsRef<Path>>(output_dir: P, font: Option<&Path>) -> Self {
        let text = TextPainter::load(font);
        tracing::debug!("Chart text uses a real font: {}", text.has_font());
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            text,
        }
    }

    pub fn chart_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", slugify(title)))
    }

    fn draw(&self, chart: &ProportionChart) -> Result<Pixmap, ReportError> {
        let mut pixmap = Pixmap::new(CANVAS_WIDTH, CANVAS_HEIGHT)
            .ok_or(ReportError::Canvas(CANVAS_WIDTH, CANVAS_HEIGHT))?;
        pixmap.fill(Color::WHITE);

        let title_width = self.text.text_width(&chart.title, TITLE_SIZE);
        let title_x = ((CANVAS_WIDTH as f32 - title_width) / 2.0).max(4.0);
        self.text.draw(&mut pixmap, &chart.title, title_x, TITLE_BASELINE, TITLE_SIZE, TEXT_RGB);

        let total = chart.total();
        let mut edge = Paint::default();
        edge.set_color(Color::WHITE);
        let stroke = Stroke { width: 2.0, ..Stroke::default() };

        let mut start = START_ANGLE_DEG;
        for (index, (slice, line)) in chart.slices.iter().zip(chart.legend_lines()).enumerate() {
            let paint = palette_paint(index);
            let share = (slice.value / total) as f32;
            let sweep = share * 360.0;

            if sweep > 0.0 {
                if let Some(wedge) = wedge_path(start, sweep) {
                    pixmap.fill_path(&wedge, &paint, FillRule::Winding, Transform::identity(), None);
                    pixmap.stroke_path(&wedge, &edge, &stroke, Transform::identity(), None);
                }
                if sweep >= MIN_LABELLED_SWEEP_DEG {
                    self.draw_wedge_percentage(&mut pixmap, start + sweep / 2.0, share * 100.0);
                }
            }
            start += sweep;

            let y = LEGEND_Y + index as f32 * LEGEND_ROW;
            if let Some(rect) = Rect::from_xywh(LEGEND_X, y, SWATCH, SWATCH) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
            self.text.draw(&mut pixmap, &line, legend_text_x(), y + SWATCH - 5.0, LEGEND_SIZE, TEXT_RGB);
        }

        Ok(pixmap)
    }

    /// Centres the `%1.1f%%` label at 60% of the radius along the wedge bisector.
    fn draw_wedge_percentage(&self, pixmap: &mut Pixmap, mid_deg: f32, pct: f32) {
        let label = format!("{:.1}%", pct);
        let rad = mid_deg * PI / 180.0;
        let (cx, cy) = PIE_CENTER;
        let x = cx + 0.6 * PIE_RADIUS * rad.cos() - self.text.text_width(&label, PERCENT_SIZE) / 2.0;
        let y = cy - 0.6 * PIE_RADIUS * rad.sin() + PERCENT_SIZE / 3.0;
        self.text.draw(pixmap, &label, x, y, PERCENT_SIZE, TEXT_RGB);
    }
}

impl ChartRenderer for PngPieRenderer {
    fn render(&mut self, chart: &ProportionChart) -> Result<PathBuf, ReportError> {
        if chart.total() <= 0.0 {
            return Err(ReportError::EmptyChart(chart.title.clone()));
        }

        let pixmap = self.draw(chart)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.chart_path(&chart.title);
        pixmap
            .save_png(&path)
            .map_err(|e| ReportError::Encode(e.to_string()))?;
        tracing::info!("Saved chart '{}' to {}", chart.title, path.display());

        println!("{}", chart.title);
        for line in chart.legend_lines() {
            println!("  {}", line);
        }

        Ok(path)
    }
}

fn legend_text_x() -> f32 {
    LEGEND_X + SWATCH + 10.0
}

fn palette_paint(index: usize) -> Paint<'static> {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

/// Closed wedge from `start_deg` sweeping counter-clockwise by `sweep_deg`.
fn wedge_path(start_deg: f32, sweep_deg: f32) -> Option<tiny_skia::Path> {
    let (cx, cy) = PIE_CENTER;
    let steps = sweep_deg.ceil().max(2.0) as usize;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for step in 0..=steps {
        let deg = start_deg + sweep_deg * step as f32 / steps as f32;
        let rad = deg * PI / 180.0;
        // Screen y grows downwards, so subtract to go counter-clockwise.
        pb.line_to(cx + PIE_RADIUS * rad.cos(), cy - PIE_RADIUS * rad.sin());
    }
    pb.close();
    pb.finish()
}

fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
