//! Page compositor
//!
//! The display is 8 pages of 128 column bytes; bit 0 of a byte is the top
//! pixel row of its page. A text placed at pixel row `y` covers rows
//! `y..y + 8`, so it touches at most two adjacent pages. Each page is
//! rebuilt from scratch by OR-ing the contribution of every text.

use crate::backend::{DisplayError, DisplayTransport};
use crate::font::{shape, CharShape, COMMA_MARK};

/// Display width in columns
pub const WIDTH: usize = 128;

/// Number of 8-row pages
pub const PAGE_COUNT: usize = 8;

/// Pixel rows per page
pub const PAGE_HEIGHT: u16 = 8;

/// One page worth of column bytes
pub type PageLine = [u8; WIDTH];

/// Text at a pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedText<'a> {
    /// Text to draw
    pub text: &'a str,
    /// Left column
    pub x: u8,
    /// Top pixel row
    pub y: u8,
}

impl<'a> PlacedText<'a> {
    /// Place a text
    pub const fn new(text: &'a str, x: u8, y: u8) -> Self {
        Self { text, x, y }
    }
}

/// Part of a glyph column that lands on a page
///
/// A text starting inside the page is shifted down by its offset from the
/// page top; a text that started on the page above contributes its
/// remaining bottom rows.
pub fn contribution(column: u8, y: u8, page: u8) -> u8 {
    let top = page as u16 * PAGE_HEIGHT;
    let y = y as u16;

    if y >= top && y < top + PAGE_HEIGHT {
        column << (y - top)
    } else if y < top && top - y < PAGE_HEIGHT {
        column >> (top - y)
    } else {
        0
    }
}

fn put(line: &mut PageLine, x: usize, value: u8) {
    if let Some(cell) = line.get_mut(x) {
        *cell |= value;
    }
}

fn draw_text(line: &mut PageLine, placed: &PlacedText<'_>, page: u8) {
    let mut x = placed.x as usize;
    for c in placed.text.chars() {
        if x >= WIDTH {
            break;
        }
        let char_shape = shape(c);
        match char_shape {
            CharShape::Glyph(glyph) => {
                for (i, &column) in glyph.iter().enumerate() {
                    put(line, x + i, contribution(column, placed.y, page));
                }
            }
            CharShape::Comma => put(line, x, contribution(COMMA_MARK, placed.y, page)),
            CharShape::Space | CharShape::Unsupported => {}
        }
        x += char_shape.advance();
    }
}

/// Rebuild one page from the placed texts
pub fn compose_page(texts: &[PlacedText<'_>], page: u8, line: &mut PageLine) {
    line.fill(0);
    for placed in texts {
        draw_text(line, placed, page);
    }
}

/// Streams composed pages into a transport
pub struct Renderer {
    line: PageLine,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer
    pub const fn new() -> Self {
        Self { line: [0; WIDTH] }
    }

    /// Last composed page
    pub fn line(&self) -> &PageLine {
        &self.line
    }

    /// Compose and send all pages
    pub async fn render<T: DisplayTransport>(
        &mut self,
        texts: &[PlacedText<'_>],
        transport: &mut T,
    ) -> Result<(), DisplayError> {
        for page in 0..PAGE_COUNT as u8 {
            while !transport.is_ready() {
                embassy_futures::yield_now().await;
            }
            compose_page(texts, page, &mut self.line);
            transport.begin_page(page).await?;
            transport.send_line(&self.line).await?;
        }
        Ok(())
    }
}
