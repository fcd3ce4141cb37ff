//! Page layout in millimetres, top-left origin.
//!
//! Blocks are placed top to bottom at a cursor. Before a block is placed its
//! height is estimated; if it would cross the bottom margin a new page is
//! started and the cursor returns to the top margin.

use dino_types::ReportConfig;

use super::ReportTable;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const LINE_SPACING: f32 = 1.4;
const TABLE_ROW_MM: f32 = 7.0;
const TABLE_FONT_PT: f32 = 9.0;
const CELL_PADDING_MM: f32 = 2.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        gray: f32,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
    },
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
    /// `y` is the top edge; `index` refers to the decoded image list.
    Image {
        index: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

pub fn line_height(size: f32) -> f32 {
    size * MM_PER_PT * LINE_SPACING
}

pub fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * MM_PER_PT * AVG_GLYPH_WIDTH
}

/// Cut `text` so it fits in `width` millimetres, marking the cut with `...`.
fn fit_text(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * MM_PER_PT * AVG_GLYPH_WIDTH)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

pub struct PageLayout<'a> {
    config: &'a ReportConfig,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> PageLayout<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            pages: vec![Page::default()],
            cursor: config.margin_top_mm,
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn bottom(&self) -> f32 {
        self.config.page_height_mm - self.config.margin_bottom_mm
    }

    fn usable_height(&self) -> f32 {
        self.bottom() - self.config.margin_top_mm
    }

    fn left(&self) -> f32 {
        self.config.margin_left_mm
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.config.margin_top_mm;
    }

    /// Start a new page if a block of `height` does not fit. Returns `true`
    /// when a page was started.
    pub fn ensure(&mut self, height: f32) -> bool {
        let at_top = (self.cursor - self.config.margin_top_mm).abs() < f32::EPSILON;
        if self.cursor + height > self.bottom() && !at_top {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn advance(&mut self, mm: f32) {
        self.cursor += mm;
    }

    fn line_at(&mut self, x: f32, text: &str, size: f32, style: FontStyle, gray: f32) {
        let height = line_height(size);
        self.ensure(height);
        let baseline = self.cursor + size * MM_PER_PT;
        self.push(DrawOp::Text {
            x,
            y: baseline,
            size,
            style,
            gray,
            text: text.to_string(),
        });
        self.cursor += height;
    }

    pub fn line(&mut self, text: &str, size: f32, style: FontStyle) {
        let x = self.left();
        self.line_at(x, text, size, style, 0.0);
    }

    pub fn indented_line(&mut self, text: &str, size: f32, style: FontStyle) {
        let x = self.left() + 5.0;
        self.line_at(x, text, size, style, 0.0);
    }

    pub fn centered_line(&mut self, text: &str, size: f32, style: FontStyle, gray: f32) {
        let center = self.config.page_width_mm / 2.0;
        let x = (center - approx_text_width(text, size) / 2.0).max(self.left());
        self.line_at(x, text, size, style, gray);
    }

    /// Free text wrapped to the configured width, kept on one page when it fits.
    pub fn wrapped(&mut self, text: &str, size: f32, style: FontStyle) {
        let columns = self.config.wrap_columns.max(1);
        let lines: Vec<String> = text
            .split('\n')
            .flat_map(|line| {
                let wrapped = textwrap::wrap(line, columns);
                if wrapped.is_empty() {
                    vec![String::new()]
                } else {
                    wrapped.into_iter().map(|l| l.into_owned()).collect()
                }
            })
            .collect();
        let block = lines.len() as f32 * line_height(size);
        self.ensure(block.min(self.usable_height()));
        for line in &lines {
            self.line(line, size, style);
        }
    }

    fn table_row(&mut self, cells: &[String], widths: f32, header: bool) {
        let y = self.cursor;
        if header {
            let width = widths * cells.len() as f32;
            self.push(DrawOp::Fill {
                x: self.left(),
                y,
                width,
                height: TABLE_ROW_MM,
                gray: 0.88,
            });
        }
        let style = if header {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        };
        for (i, cell) in cells.iter().enumerate() {
            let x = self.left() + i as f32 * widths + CELL_PADDING_MM;
            self.push(DrawOp::Text {
                x,
                y: y + TABLE_ROW_MM - CELL_PADDING_MM,
                size: TABLE_FONT_PT,
                style,
                gray: 0.0,
                text: fit_text(cell, widths - 2.0 * CELL_PADDING_MM, TABLE_FONT_PT),
            });
        }
        self.push(DrawOp::Rule {
            x1: self.left(),
            x2: self.left() + widths * cells.len() as f32,
            y: y + TABLE_ROW_MM,
        });
        self.cursor += TABLE_ROW_MM;
    }

    /// Table with equal column widths; the header repeats on every page.
    pub fn table(&mut self, table: &ReportTable) {
        let columns = table
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(table.headers.len()))
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return;
        }
        let widths = self.config.content_width_mm() / columns as f32;

        self.ensure(TABLE_ROW_MM * 2.0);
        self.table_row(&table.headers, widths, true);
        for row in &table.rows {
            if self.ensure(TABLE_ROW_MM) {
                self.table_row(&table.headers, widths, true);
            }
            self.table_row(row, widths, false);
        }
    }

    /// Image at the configured width, shrunk only if taller than a page.
    ///
    /// `reserve` keeps a preceding caption on the same page.
    pub fn image(&mut self, index: usize, aspect: f32, reserve: f32) {
        let mut width = self.config.image_width_mm;
        let mut height = width * aspect;
        let max_height = self.usable_height() - reserve;
        if height > max_height && aspect > 0.0 {
            height = max_height;
            width = height / aspect;
        }
        self.ensure(height);
        let y = self.cursor;
        self.push(DrawOp::Image {
            index,
            x: self.left(),
            y,
            width,
            height,
        });
        self.cursor += height;
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReportConfig {
        ReportConfig::default()
    }

    #[test]
    fn breaks_page_when_block_would_cross_bottom() {
        let config = config();
        let mut layout = PageLayout::new(&config);
        layout.advance(250.0);
        assert!(layout.ensure(10.0));
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.cursor(), config.margin_top_mm);
        assert!(!layout.ensure(10.0));
    }

    #[test]
    fn long_table_spans_pages_and_repeats_header() {
        let config = config();
        let mut layout = PageLayout::new(&config);
        let table = ReportTable {
            caption: None,
            headers: vec!["Time".into(), "Survival".into()],
            rows: (0..80).map(|i| vec![i.to_string(), "0.5".into()]).collect(),
        };
        layout.table(&table);
        let pages = layout.finish();
        assert!(pages.len() >= 3);
        for page in &pages {
            let first_text = page.ops.iter().find_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            });
            assert_eq!(first_text, Some("Time"));
        }
    }

    #[test]
    fn image_keeps_aspect_ratio_at_fixed_width() {
        let config = config();
        let mut layout = PageLayout::new(&config);
        layout.image(0, 0.5, 0.0);
        let pages = layout.finish();
        assert_eq!(
            pages[0].ops[0],
            DrawOp::Image {
                index: 0,
                x: 15.0,
                y: 20.0,
                width: 180.0,
                height: 90.0
            }
        );
    }

    #[test]
    fn tall_image_is_scaled_to_fit_a_page() {
        let config = config();
        let mut layout = PageLayout::new(&config);
        layout.image(0, 3.0, 0.0);
        let pages = layout.finish();
        let DrawOp::Image { width, height, .. } = pages[0].ops[0] else {
            panic!("expected image");
        };
        assert!(height <= 257.0 + f32::EPSILON);
        assert!((height / width - 3.0).abs() < 1e-4);
    }

    #[test]
    fn wrapped_text_respects_column_limit() {
        let config = ReportConfig {
            wrap_columns: 20,
            ..config()
        };
        let mut layout = PageLayout::new(&config);
        layout.wrapped("the quick brown fox jumps over the lazy dog", 11.0, FontStyle::Regular);
        let pages = layout.finish();
        let lines: Vec<_> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert!(lines.len() >= 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn fit_text_truncates_long_cells() {
        assert_eq!(fit_text("short", 50.0, 9.0), "short");
        let cut = fit_text(&"x".repeat(100), 20.0, 9.0);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() < 100);
    }
}
