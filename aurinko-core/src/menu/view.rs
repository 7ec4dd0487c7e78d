//! View tables
//!
//! Every view is a constant list of text fields. Fixed fields carry their
//! own text; live fields are filled from the menu's live slots, bound in
//! declaration order. A lowercase `a`/`o` renders as `ä`/`ö`.

/// Maximum number of fields in any view
pub const MAX_FIELDS: usize = 15;

/// Maximum number of live fields in any view
pub const MAX_LIVE_FIELDS: usize = 8;

/// Where a field takes its text from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldContent {
    /// Constant text
    Fixed(&'static str),
    /// Next live slot
    Live,
}

/// Text placed at a pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextField {
    /// Field text source
    pub content: FieldContent,
    /// Left column (0-127)
    pub x: u8,
    /// Top pixel row (0-63)
    pub y: u8,
}

const fn fixed(text: &'static str, x: u8, y: u8) -> TextField {
    TextField {
        content: FieldContent::Fixed(text),
        x,
        y,
    }
}

const fn live(x: u8, y: u8) -> TextField {
    TextField {
        content: FieldContent::Live,
        x,
        y,
    }
}

const PANEL_FIELDS: [TextField; 15] = [
    fixed("PANEELI", 0, 2),
    fixed("JaNNITE", 47, 2),
    fixed("VIRTA", 96, 2),
    fixed("1", 20, 15),
    fixed("2", 20, 28),
    fixed("3", 20, 41),
    fixed("4", 20, 54),
    live(45, 15),
    live(85, 15),
    live(45, 28),
    live(85, 28),
    live(45, 41),
    live(85, 41),
    live(45, 54),
    live(85, 54),
];

const BATTERY_FIELDS: [TextField; 5] = [
    fixed("AKKU", 53, 2),
    fixed("JaNNITE", 10, 20),
    fixed("VIRTA", 80, 20),
    live(5, 38),
    live(70, 38),
];

const MENU_1_FIELDS: [TextField; 9] = [
    fixed("VIRITYS 1/3", 15, 2),
    fixed("PANEELI 1: JaNNITE", 10, 15),
    fixed("PANEELI 1: VIRTA", 10, 28),
    fixed("PANEELI 2: JaNNITE", 10, 41),
    fixed("PANEELI 2: VIRTA", 10, 54),
    live(5, 15),
    live(5, 28),
    live(5, 41),
    live(5, 54),
];

const MENU_2_FIELDS: [TextField; 9] = [
    fixed("VIRITYS 2/3", 15, 2),
    fixed("PANEELI 3: JaNNITE", 10, 15),
    fixed("PANEELI 3: VIRTA", 10, 28),
    fixed("PANEELI 4: JaNNITE", 10, 41),
    fixed("PANEELI 4: VIRTA", 10, 54),
    live(5, 15),
    live(5, 28),
    live(5, 41),
    live(5, 54),
];

const MENU_3_FIELDS: [TextField; 9] = [
    fixed("VIRITYS 3/3", 15, 2),
    fixed("AKKU: JaNNITE", 10, 15),
    fixed("AKKU: VIRTA", 10, 28),
    fixed("TALLENNA", 10, 41),
    fixed("PERUUTA", 10, 54),
    live(5, 15),
    live(5, 28),
    live(5, 41),
    live(5, 54),
];

/// Shared by both calibration point views
const CALIBRATION_FIELDS: [TextField; 12] = [
    live(40, 2),  // source
    live(90, 2),  // panel number
    fixed("ASETA", 15, 15),
    live(50, 15), // quantity
    live(95, 15), // progress
    live(40, 28), // reference value
    live(7, 41),  // back marker
    fixed("TAKAISIN", 13, 41),
    live(60, 41), // choice markers
    fixed("OK", 84, 41),
    fixed("MITTAUS", 19, 54),
    live(67, 54), // measured value
];

/// Live slot of each calibration view field
pub mod calibration_slot {
    /// "PANEELI" or "  AKKU "
    pub const SOURCE: usize = 0;
    /// Panel digit, blank for the battery
    pub const PANEL: usize = 1;
    /// Quantity label
    pub const QUANTITY: usize = 2;
    /// "1/2" or "2/2"
    pub const PROGRESS: usize = 3;
    /// Reference value with unit
    pub const REFERENCE: usize = 4;
    /// Marker in front of "TAKAISIN"
    pub const BACK_MARKER: usize = 5;
    /// Markers around "TAKAISIN"/"OK"
    pub const CHOICE: usize = 6;
    /// Live measurement with unit
    pub const MEASURED: usize = 7;
}

/// Menu view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewId {
    /// Panel voltages and currents
    PanelView,
    /// Battery voltage and current
    BatteryView,
    /// Calibration menu, panels 1-2
    CalibMenu1,
    /// Calibration menu, panels 3-4
    CalibMenu2,
    /// Calibration menu, battery, save and cancel
    CalibMenu3,
    /// Calibration, first reference point
    CalibChannel1,
    /// Calibration, second reference point
    CalibChannel2,
    /// Nothing shown yet
    #[default]
    NoView,
}

impl ViewId {
    /// Fields of this view in draw order
    pub const fn fields(self) -> &'static [TextField] {
        match self {
            ViewId::PanelView => &PANEL_FIELDS,
            ViewId::BatteryView => &BATTERY_FIELDS,
            ViewId::CalibMenu1 => &MENU_1_FIELDS,
            ViewId::CalibMenu2 => &MENU_2_FIELDS,
            ViewId::CalibMenu3 => &MENU_3_FIELDS,
            ViewId::CalibChannel1 | ViewId::CalibChannel2 => &CALIBRATION_FIELDS,
            ViewId::NoView => &[],
        }
    }

    /// Number of live fields, which is the number of slots in use
    pub fn live_count(self) -> usize {
        self.fields()
            .iter()
            .filter(|field| field.content == FieldContent::Live)
            .count()
    }

    /// Number of selectable positions
    pub const fn selectable(self) -> u8 {
        match self {
            ViewId::CalibMenu1 | ViewId::CalibMenu2 | ViewId::CalibMenu3 => 4,
            ViewId::CalibChannel1 | ViewId::CalibChannel2 => 2,
            _ => 1,
        }
    }

    /// Zero-based page of a calibration menu view
    pub const fn menu_page(self) -> Option<u8> {
        match self {
            ViewId::CalibMenu1 => Some(0),
            ViewId::CalibMenu2 => Some(1),
            ViewId::CalibMenu3 => Some(2),
            _ => None,
        }
    }

    /// Check if this is one of the calibration point views
    pub const fn is_calibration(self) -> bool {
        matches!(self, ViewId::CalibChannel1 | ViewId::CalibChannel2)
    }
}
