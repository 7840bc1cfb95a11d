//! Zone catalog and hit-testing
//!
//! Pure geometry in the logical 400x400 canvas space. Rendering and input
//! validation both consume this catalog; neither owns it.

/// One selectable tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Red, Zone::Blue, Zone::Green, Zone::Yellow];

    pub fn index(self) -> usize {
        match self {
            Zone::Red => 0,
            Zone::Blue => 1,
            Zone::Green => 2,
            Zone::Yellow => 3,
        }
    }

    /// Static catalog entry (colors, rect, tone)
    pub fn spec(self) -> &'static ZoneSpec {
        &ZONES[self.index()]
    }
}

/// Axis-aligned rectangle in logical canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Strict containment: points on the border do not count as hits
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.x && x < self.x + self.w && y > self.y && y < self.y + self.h
    }
}

/// Immutable per-zone data
#[derive(Debug)]
pub struct ZoneSpec {
    /// Base fill color
    pub color: &'static str,
    /// Fill while highlighted
    pub highlight: &'static str,
    /// Tile rect on the logical canvas
    pub rect: Rect,
    /// Oscillator frequency for this tile's tone
    pub tone_hz: f32,
}

/// Tile edge length
pub const TILE_SIZE: f64 = 140.0;
/// Corner radius for tile rendering
pub const TILE_CORNER: f64 = 25.0;

static ZONES: [ZoneSpec; 4] = [
    ZoneSpec {
        color: "#ff4d4d",
        highlight: "#ff9999",
        rect: Rect::new(50.0, 50.0, TILE_SIZE, TILE_SIZE),
        tone_hz: 329.63,
    },
    ZoneSpec {
        color: "#4d94ff",
        highlight: "#99c2ff",
        rect: Rect::new(210.0, 50.0, TILE_SIZE, TILE_SIZE),
        tone_hz: 261.63,
    },
    ZoneSpec {
        color: "#4dff4d",
        highlight: "#99ff99",
        rect: Rect::new(50.0, 210.0, TILE_SIZE, TILE_SIZE),
        tone_hz: 220.0,
    },
    ZoneSpec {
        color: "#ffff4d",
        highlight: "#ffff99",
        rect: Rect::new(210.0, 210.0, TILE_SIZE, TILE_SIZE),
        tone_hz: 164.81,
    },
];

/// Left edge of each bonus cup
pub const CUP_SLOTS: [f64; 3] = [60.0, 160.0, 260.0];
/// Cup hit width (the trapezoid is hit-tested as its bounding slot)
pub const CUP_WIDTH: f64 = 80.0;
/// Shared vertical extent of all cups
pub const CUP_TOP: f64 = 150.0;
pub const CUP_BOTTOM: f64 = 250.0;
/// Where the revealed ball is drawn
pub const BALL_RADIUS: f64 = 15.0;
pub const BALL_Y: f64 = 230.0;

/// Map a logical-canvas point to the tile it lands on, if any
pub fn point_to_zone(x: f64, y: f64) -> Option<Zone> {
    Zone::ALL
        .into_iter()
        .find(|zone| zone.spec().rect.contains(x, y))
}

/// Map a logical-canvas point to a bonus cup index, if any
pub fn point_to_cup(x: f64, y: f64) -> Option<usize> {
    if y <= CUP_TOP || y >= CUP_BOTTOM {
        return None;
    }
    CUP_SLOTS
        .iter()
        .position(|&cx| x > cx && x < cx + CUP_WIDTH)
}

/// Center of a cup's visible body, in x
pub fn cup_center_x(cup: usize) -> f64 {
    CUP_SLOTS[cup] + CUP_WIDTH / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_to_zone_centers() {
        assert_eq!(point_to_zone(120.0, 120.0), Some(Zone::Red));
        assert_eq!(point_to_zone(280.0, 120.0), Some(Zone::Blue));
        assert_eq!(point_to_zone(120.0, 280.0), Some(Zone::Green));
        assert_eq!(point_to_zone(280.0, 280.0), Some(Zone::Yellow));
    }

    #[test]
    fn test_point_to_zone_gutter_misses() {
        // Vertical gutter between the tile columns
        assert_eq!(point_to_zone(200.0, 120.0), None);
        // Horizontal gutter between the tile rows
        assert_eq!(point_to_zone(120.0, 200.0), None);
        // Outside the board entirely
        assert_eq!(point_to_zone(-10.0, 120.0), None);
        assert_eq!(point_to_zone(395.0, 395.0), None);
    }

    #[test]
    fn test_rect_edges_excluded() {
        let rect = Zone::Red.spec().rect;
        assert!(!rect.contains(rect.x, 120.0));
        assert!(!rect.contains(rect.x + rect.w, 120.0));
        assert!(rect.contains(rect.x + 1.0, rect.y + 1.0));
    }

    #[test]
    fn test_point_to_cup() {
        assert_eq!(point_to_cup(100.0, 200.0), Some(0));
        assert_eq!(point_to_cup(200.0, 200.0), Some(1));
        assert_eq!(point_to_cup(300.0, 200.0), Some(2));
        // Between cups
        assert_eq!(point_to_cup(145.0, 200.0), None);
        // Above and below the cup band
        assert_eq!(point_to_cup(100.0, 100.0), None);
        assert_eq!(point_to_cup(100.0, 300.0), None);
    }

    proptest! {
        #[test]
        fn point_to_zone_agrees_with_rect_scan(x in -50.0f64..450.0, y in -50.0f64..450.0) {
            let scanned = Zone::ALL.into_iter().find(|z| z.spec().rect.contains(x, y));
            prop_assert_eq!(point_to_zone(x, y), scanned);
        }

        #[test]
        fn cup_hits_stay_in_band(x in -50.0f64..450.0, y in -50.0f64..450.0) {
            if let Some(cup) = point_to_cup(x, y) {
                prop_assert!(cup < CUP_SLOTS.len());
                prop_assert!(y > CUP_TOP && y < CUP_BOTTOM);
            }
        }
    }
}
