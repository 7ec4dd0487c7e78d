//! Live text slots and value formatting

use heapless::String;

use super::view::MAX_LIVE_FIELDS;

/// Visible characters per slot
pub const SLOT_WIDTH: usize = 7;

/// Text of one live slot
pub type LiveText = String<SLOT_WIDTH>;

/// Decimal separator shown in values
pub const DECIMAL_SEPARATOR: u8 = b',';

/// Selection marker
pub const MARKER: u8 = b'>';

/// Closing selection marker
pub const CLOSING_MARKER: u8 = b'<';

/// Build slot text from ASCII cells
fn from_cells(cells: &[u8]) -> LiveText {
    let mut text = LiveText::new();
    for &cell in cells.iter().take(SLOT_WIDTH) {
        // Capacity is SLOT_WIDTH, so this cannot fail
        let _ = text.push(cell as char);
    }
    text
}

/// Build slot text from a string, truncating to the slot width
pub fn text(s: &str) -> LiveText {
    let mut out = LiveText::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Seven spaces
pub fn blank() -> LiveText {
    from_cells(&[b' '; SLOT_WIDTH])
}

/// Seven spaces with a marker character at `position`
pub fn marker_at(position: usize, marker: u8) -> LiveText {
    let mut cells = [b' '; SLOT_WIDTH];
    if let Some(cell) = cells.get_mut(position) {
        *cell = marker;
    }
    from_cells(&cells)
}

/// Format a value as `III,DD` followed by a unit letter
///
/// The value is scaled by 100 and truncated. Negative and NaN values show
/// as zero; only the three lowest integer digits are kept.
pub fn format_measurement(value: f32, unit: char) -> LiveText {
    let mut cells = [b' '; SLOT_WIDTH];
    // Float to int casts saturate; NaN and negatives become 0
    let mut scaled = (value * 100.0) as u32;

    cells[5] = b'0' + (scaled % 10) as u8;
    scaled /= 10;
    cells[4] = b'0' + (scaled % 10) as u8;
    scaled /= 10;
    cells[3] = DECIMAL_SEPARATOR;

    if scaled == 0 {
        cells[2] = b'0';
    } else {
        for pos in (0..3).rev() {
            if scaled == 0 {
                break;
            }
            cells[pos] = b'0' + (scaled % 10) as u8;
            scaled /= 10;
        }
    }

    cells[6] = if unit.is_ascii() { unit as u8 } else { b' ' };
    from_cells(&cells)
}

/// Live slots of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSlots {
    slots: [LiveText; MAX_LIVE_FIELDS],
}

impl Default for LiveSlots {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveSlots {
    /// Create all-empty slots
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| LiveText::new()),
        }
    }

    /// Text of a slot (empty when out of range)
    pub fn get(&self, index: usize) -> &str {
        self.slots.get(index).map(|s| s.as_str()).unwrap_or("")
    }

    /// Replace a slot's text; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, value: LiveText) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = value;
        }
    }

    /// All slots in binding order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.as_str())
    }
}
