use ae_core::{Article, Error, OutputFormat, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use crate::ArticleWriter;

// A4 portrait, all lengths in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 15.0;
const CELL_PADDING: f32 = 1.0;
const LINE_HEIGHT: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
const PT_TO_MM: f32 = 25.4 / 72.0;
const TAB: &str = "    ";

/// Helvetica advance widths for U+0020..=U+007E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
const DEFAULT_WIDTH: u16 = 556;

/// A row of text placed on a page, `x`/`y` being the baseline origin
/// measured from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Lays the body out line by line on A4 pages with the built-in
/// Helvetica font.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter;

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ArticleWriter for PdfWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, article: &Article) -> Result<Vec<u8>> {
        let pages = layout(&article.body)?;
        debug!("Laid out \"{}\" on {} page(s)", article.title, pages.len());

        let (doc, first_page, first_layer) =
            PdfDocument::new(article.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Pdf(e.to_string()))?;

        for (index, lines) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", index + 1))
            };
            let layer = doc.get_page(page).get_layer(layer);

            for line in lines.iter().filter(|l| !l.text.is_empty()) {
                layer.use_text(line.text.as_str(), FONT_SIZE_PT, Mm(line.x), Mm(line.y), &font);
            }
        }

        doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
    }
}

/// Split `body` into pages of placed rows.
///
/// Each source line gets at least one row, long lines wrap on spaces and
/// words wider than the page break by character. Fails on the first
/// character the built-in font encoding cannot represent.
pub fn layout(body: &str) -> Result<Vec<Vec<PlacedLine>>> {
    let max_width = PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING;
    let page_break = PAGE_HEIGHT - BOTTOM_MARGIN;
    let baseline_offset = LINE_HEIGHT / 2.0 + 0.3 * FONT_SIZE_PT * PT_TO_MM;

    let mut pages = vec![Vec::new()];
    let mut y = MARGIN;

    for (index, raw) in body.split('\n').enumerate() {
        let line = clean_line(raw, index + 1)?;

        for row in wrap_line(&line, max_width) {
            if y + LINE_HEIGHT > page_break {
                pages.push(Vec::new());
                y = MARGIN;
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: row,
                    x: MARGIN + CELL_PADDING,
                    y: PAGE_HEIGHT - (y + baseline_offset),
                });
            }
            y += LINE_HEIGHT;
        }
    }

    Ok(pages)
}

fn clean_line(raw: &str, line_no: usize) -> Result<String> {
    let mut line = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\t' => line.push_str(TAB),
            c if c.is_control() => {}
            c if (c as u32) > 0xFF => {
                return Err(Error::Encoding(format!(
                    "character '{}' (U+{:04X}) on line {} cannot be represented by the built-in PDF font",
                    c, c as u32, line_no
                )))
            }
            c => line.push(c),
        }
    }
    Ok(line)
}

fn wrap_line(line: &str, max_width: f32) -> Vec<String> {
    let space = char_width(' ');
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for word in line.split(' ') {
        let word_width = text_width(word);
        let separator = if current.is_empty() { 0.0 } else { space };

        if !current.is_empty() && width + separator + word_width > max_width {
            rows.push(std::mem::take(&mut current));
            width = 0.0;
        }

        if word_width > max_width {
            for c in word.chars() {
                let w = char_width(c);
                if !current.is_empty() && width + w > max_width {
                    rows.push(std::mem::take(&mut current));
                    width = 0.0;
                }
                current.push(c);
                width += w;
            }
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
            width += space;
        }
        current.push_str(word);
        width += word_width;
    }

    rows.push(current);
    rows
}

fn char_width(c: char) -> f32 {
    let units = match c as u32 {
        code @ 0x20..=0x7E => HELVETICA_WIDTHS[(code - 0x20) as usize],
        _ => DEFAULT_WIDTH,
    };
    units as f32 / 1000.0 * FONT_SIZE_PT * PT_TO_MM
}

fn text_width(text: &str) -> f32 {
    text.chars().map(char_width).sum()
}
