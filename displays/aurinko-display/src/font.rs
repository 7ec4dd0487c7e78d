//! 5x8 glyph table
//!
//! Each glyph is five column bytes, bit 0 being the top pixel row. Only the
//! characters the charger UI prints are present: capitals, `ä`/`ö` (written
//! as `a`/`o`), digits, `/`, `:` and the two selection markers.

/// Columns per glyph
pub const GLYPH_WIDTH: usize = 5;

/// Cursor advance after a glyph or space
pub const GLYPH_ADVANCE: usize = 6;

/// Cursor advance after a comma or period
pub const COMMA_ADVANCE: usize = 2;

/// Column byte drawn for a comma or period
pub const COMMA_MARK: u8 = 0xC0;

/// Glyph bitmap
pub type Glyph = [u8; GLYPH_WIDTH];

const LETTERS: usize = 26;
const A_UMLAUT: usize = LETTERS;
const O_UMLAUT: usize = LETTERS + 1;
const SLASH: usize = LETTERS + 2;
const GREATER: usize = SLASH + 12;
const LESS: usize = GREATER + 1;

/// Glyphs in table order: A-Z, ä, ö, `/`, 0-9, `:`, `>`, `<`
pub const FONT: [Glyph; 42] = [
    [0x7E, 0x09, 0x09, 0x09, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x41, 0x3E], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x0F, 0x30, 0x40, 0x30, 0x0F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x20, 0x55, 0x54, 0x55, 0x78], // ä
    [0x38, 0x45, 0x44, 0x45, 0x38], // ö
    [0x00, 0x60, 0x1C, 0x03, 0x00], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x24, 0x00, 0x00, 0x00], // :
    [0x00, 0x22, 0x14, 0x08, 0x00], // >
    [0x00, 0x08, 0x14, 0x22, 0x00], // <
];

/// How a character is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharShape {
    /// Five glyph columns, then a gap
    Glyph(&'static Glyph),
    /// Empty cell
    Space,
    /// Narrow decimal mark
    Comma,
    /// Not drawable; skipped without moving the cursor
    Unsupported,
}

impl CharShape {
    /// Columns the cursor moves after this character
    pub const fn advance(self) -> usize {
        match self {
            CharShape::Glyph(_) | CharShape::Space => GLYPH_ADVANCE,
            CharShape::Comma => COMMA_ADVANCE,
            CharShape::Unsupported => 0,
        }
    }
}

/// Look up how a character is drawn
pub fn shape(c: char) -> CharShape {
    let index = match c {
        'A'..='Z' => c as usize - 'A' as usize,
        'a' => A_UMLAUT,
        'o' => O_UMLAUT,
        '/'..=':' => SLASH + (c as usize - '/' as usize),
        '>' => GREATER,
        '<' => LESS,
        ' ' => return CharShape::Space,
        ',' | '.' => return CharShape::Comma,
        _ => return CharShape::Unsupported,
    };
    CharShape::Glyph(&FONT[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(shape('A'), CharShape::Glyph(&[0x7E, 0x09, 0x09, 0x09, 0x7E]));
        assert_eq!(shape('Z'), CharShape::Glyph(&[0x61, 0x51, 0x49, 0x45, 0x43]));
    }

    #[test]
    fn test_umlauts() {
        assert_eq!(shape('a'), CharShape::Glyph(&FONT[26]));
        assert_eq!(shape('o'), CharShape::Glyph(&FONT[27]));
    }

    #[test]
    fn test_digits_and_punctuation() {
        assert_eq!(shape('/'), CharShape::Glyph(&FONT[28]));
        assert_eq!(shape('0'), CharShape::Glyph(&[0x3E, 0x51, 0x49, 0x45, 0x3E]));
        assert_eq!(shape('9'), CharShape::Glyph(&[0x06, 0x49, 0x49, 0x29, 0x1E]));
        assert_eq!(shape(':'), CharShape::Glyph(&[0x00, 0x24, 0x00, 0x00, 0x00]));
        assert_eq!(shape('>'), CharShape::Glyph(&[0x00, 0x22, 0x14, 0x08, 0x00]));
        assert_eq!(shape('<'), CharShape::Glyph(&[0x00, 0x08, 0x14, 0x22, 0x00]));
    }

    #[test]
    fn test_advances() {
        assert_eq!(shape('B').advance(), 6);
        assert_eq!(shape(' ').advance(), 6);
        assert_eq!(shape(',').advance(), 2);
        assert_eq!(shape('.').advance(), 2);
        assert_eq!(shape('b').advance(), 0);
        assert_eq!(shape('?').advance(), 0);
        assert_eq!(shape('ä').advance(), 0);
    }
}
